//! Shared domain layer for Chatreel.
//!
//! Holds the chat-export data model, the error taxonomy, timezone-aware
//! calendar-day keying and the fixed-locale formatting helpers used by the
//! derivation and scene crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ReelError, Result};
