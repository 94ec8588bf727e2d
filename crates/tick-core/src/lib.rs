//! tick-core - Core library for Tick
//!
//! This crate contains the shared models, the remote task store client, and
//! the list synchronization logic consumed by the desktop shell.

pub mod auth;
pub mod error;
pub mod models;
pub mod service;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

pub use error::{Error, Result};
pub use models::{NewTask, OwnerId, Task, TaskId};
