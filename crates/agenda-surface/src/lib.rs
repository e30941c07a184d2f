//! Notification surface: the single subscriber that turns bridge events into
//! visible toasts.
//!
//! This crate owns the authoritative list of visible notifications, assigns
//! each one a local identity, and removes it after a fixed delay or when the
//! user dismisses it. It also loads the application configuration, which
//! carries that delay.

pub mod config;
mod entry;
mod surface;

pub use crate::entry::{EntryId, NotificationEntry};
pub use crate::surface::{MountError, NotificationSurface};
