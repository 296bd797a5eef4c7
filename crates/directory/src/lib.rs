//! Persistent user directory and per-identity session modes.
//!
//! One record per Telegram user (profile fields plus the selected region),
//! backed by sqlite, and a transient in-memory registry for the operator's
//! broadcast-authoring mode.

pub mod error;
pub mod session;
pub mod users;

pub use {
    error::{Error, Result},
    session::{SessionMode, SessionModes},
    users::{SqliteUserDirectory, UserDirectory, UserProfile, UserRecord},
};
