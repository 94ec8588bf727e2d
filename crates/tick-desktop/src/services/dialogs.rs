//! Native confirmation and notice dialogs
//!
//! Destructive actions (delete, sign-out) go through an explicit
//! confirmation step returning a bool, decoupled from the action itself.
//! Failure notices are blocking and require acknowledgment.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Confirmation step for destructive actions
pub trait Confirm {
    /// Ask the user; true means proceed
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Native message-box implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

impl Confirm for NativeDialogs {
    fn confirm(&self, title: &str, message: &str) -> bool {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show()
            == MessageDialogResult::Yes
    }
}

/// Ask before deleting a task
#[must_use]
pub fn confirm_delete() -> bool {
    NativeDialogs.confirm("Delete task", "Are you sure you want to delete this task?")
}

/// Ask before terminating the session
#[must_use]
pub fn confirm_sign_out() -> bool {
    NativeDialogs.confirm("Sign out", "Are you sure you want to sign out?")
}

/// Blocking failure notice
pub fn notify_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned answers stand in for the native dialog in tests
    struct CannedConfirm(bool);

    impl Confirm for CannedConfirm {
        fn confirm(&self, _title: &str, _message: &str) -> bool {
            self.0
        }
    }

    fn delete_if_confirmed(confirm: &dyn Confirm) -> bool {
        confirm.confirm("Delete task", "Are you sure?")
    }

    #[test]
    fn test_confirmation_gates_the_action() {
        assert!(delete_if_confirmed(&CannedConfirm(true)));
        assert!(!delete_if_confirmed(&CannedConfirm(false)));
    }
}
