//! Ephemeral per-session view state and the pure views derived from it
//!
//! Everything here is process-local and reset on reload. The state is one
//! value updated through discrete transitions, which keeps the edit-mode
//! invariant (at most one item editing) mechanically checkable.

use crate::models::{Task, TaskId};

/// Filter applied to the synchronized list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Tab order as presented to the user
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Done",
        }
    }

    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Keep the elements of `tasks` matching `filter`, preserving their order
#[must_use]
pub fn filtered(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Counters over the unfiltered list, independent of the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskStats {
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Footer summary line; `None` while the list is empty
    #[must_use]
    pub fn remaining_summary(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        Some(match self.active {
            0 => "All tasks completed!".to_string(),
            1 => "1 task remaining".to_string(),
            n => format!("{n} tasks remaining"),
        })
    }
}

/// Fixed empty-state copy, one variant per filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: &'static str,
    pub headline: &'static str,
    pub hint: &'static str,
}

#[must_use]
pub const fn empty_state(filter: Filter) -> EmptyState {
    match filter {
        Filter::All => EmptyState {
            icon: "📭",
            headline: "No tasks yet",
            hint: "Add a new task to get started!",
        },
        Filter::Active => EmptyState {
            icon: "📝",
            headline: "No active tasks",
            hint: "All tasks are completed!",
        },
        Filter::Completed => EmptyState {
            icon: "🎉",
            headline: "No completed tasks yet",
            hint: "Complete some tasks to see them here",
        },
    }
}

/// Edit-mode state: at most one item may be in edit at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing { id: TaskId, draft: String },
}

/// Ephemeral session view state, updated via discrete transitions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filter: Filter,
    pub composer: String,
    pub composer_busy: bool,
    pub edit: EditMode,
    pub menu_open: bool,
}

impl ViewState {
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    /// Mark a composer submission in flight
    ///
    /// Returns false (and changes nothing) when a submission is already
    /// pending, guarding against duplicate creates.
    pub fn begin_submit(&mut self) -> bool {
        if self.composer_busy {
            return false;
        }
        self.composer_busy = true;
        true
    }

    /// Clear the busy flag; the draft is cleared only on success
    pub fn finish_submit(&mut self, created: bool) {
        self.composer_busy = false;
        if created {
            self.composer.clear();
        }
    }

    /// Enter edit mode on `task`, draft initialized from its persisted text
    ///
    /// Selecting a different item while already editing abandons the
    /// previous draft without saving (last-selection-wins).
    pub fn begin_edit(&mut self, task: &Task) {
        self.edit = EditMode::Editing {
            id: task.id.clone(),
            draft: task.text.clone(),
        };
    }

    /// Update the in-progress draft; ignored while not editing
    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        if let EditMode::Editing { draft, .. } = &mut self.edit {
            *draft = text.into();
        }
    }

    /// Leave edit mode, discarding any draft (cancel, or post-save)
    pub fn end_edit(&mut self) {
        self.edit = EditMode::Viewing;
    }

    /// The item currently in edit, if any
    #[must_use]
    pub const fn editing_id(&self) -> Option<&TaskId> {
        match &self.edit {
            EditMode::Editing { id, .. } => Some(id),
            EditMode::Viewing => None,
        }
    }

    #[must_use]
    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::OwnerId;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            owner_id: OwnerId::new("user-1"),
            text: format!("text-{id}"),
            completed,
            created_at: Some(1),
            updated_at: Some(1),
        }
    }

    fn sample_list() -> Vec<Task> {
        vec![
            task("1", false),
            task("2", true),
            task("3", false),
            task("4", true),
            task("5", false),
        ]
    }

    #[test]
    fn test_filter_all_is_identity() {
        let list = sample_list();
        assert_eq!(filtered(&list, Filter::All), list);
    }

    #[test]
    fn test_filters_partition_the_list() {
        let list = sample_list();
        let active = filtered(&list, Filter::Active);
        let completed = filtered(&list, Filter::Completed);

        assert!(active.iter().all(|task| !task.completed));
        assert!(completed.iter().all(|task| task.completed));
        assert_eq!(active.len() + completed.len(), list.len());
    }

    #[test]
    fn test_stats_ignore_active_filter() {
        let list = sample_list();
        let stats = TaskStats::of(&list);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.completed, 2);
    }

    #[test]
    fn test_remaining_summary() {
        assert_eq!(TaskStats::of(&[]).remaining_summary(), None);
        assert_eq!(
            TaskStats::of(&[task("1", false)]).remaining_summary(),
            Some("1 task remaining".to_string())
        );
        assert_eq!(
            TaskStats::of(&sample_list()).remaining_summary(),
            Some("3 tasks remaining".to_string())
        );
        assert_eq!(
            TaskStats::of(&[task("1", true)]).remaining_summary(),
            Some("All tasks completed!".to_string())
        );
    }

    #[test]
    fn test_empty_state_has_three_fixed_variants() {
        let variants: Vec<EmptyState> = Filter::ALL.iter().map(|f| empty_state(*f)).collect();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].headline, "No tasks yet");
        assert_eq!(variants[1].headline, "No active tasks");
        assert_eq!(variants[2].headline, "No completed tasks yet");
    }

    #[test]
    fn test_begin_edit_initializes_draft_from_task() {
        let mut state = ViewState::default();
        let target = task("1", false);

        state.begin_edit(&target);
        assert_eq!(
            state.edit,
            EditMode::Editing {
                id: TaskId::new("1"),
                draft: "text-1".to_string()
            }
        );
        assert!(state.is_editing(&TaskId::new("1")));
    }

    #[test]
    fn test_begin_edit_last_selection_wins() {
        let mut state = ViewState::default();
        state.begin_edit(&task("1", false));
        state.set_edit_draft("half-typed change");

        state.begin_edit(&task("2", false));
        assert_eq!(
            state.edit,
            EditMode::Editing {
                id: TaskId::new("2"),
                draft: "text-2".to_string()
            }
        );
    }

    #[test]
    fn test_end_edit_returns_to_viewing() {
        let mut state = ViewState::default();
        state.begin_edit(&task("1", false));
        state.end_edit();
        assert_eq!(state.edit, EditMode::Viewing);
        assert_eq!(state.editing_id(), None);
    }

    #[test]
    fn test_set_edit_draft_ignored_while_viewing() {
        let mut state = ViewState::default();
        state.set_edit_draft("orphan text");
        assert_eq!(state.edit, EditMode::Viewing);
    }

    #[test]
    fn test_begin_submit_guards_against_duplicates() {
        let mut state = ViewState::default();
        assert!(state.begin_submit());
        assert!(!state.begin_submit());

        state.finish_submit(false);
        assert!(!state.composer_busy);
        assert!(state.begin_submit());
    }

    #[test]
    fn test_finish_submit_clears_composer_only_on_success() {
        let mut state = ViewState::default();
        state.set_composer("buy milk");

        state.begin_submit();
        state.finish_submit(false);
        assert_eq!(state.composer, "buy milk");

        state.begin_submit();
        state.finish_submit(true);
        assert_eq!(state.composer, "");
    }

    #[test]
    fn test_menu_toggle() {
        let mut state = ViewState::default();
        state.toggle_menu();
        assert!(state.menu_open);
        state.close_menu();
        assert!(!state.menu_open);
    }
}
