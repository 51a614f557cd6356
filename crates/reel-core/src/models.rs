use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ReelError, Result};

/// One member of the conversation, as listed in the export header.
///
/// Identity is the name string; the export does not enforce uniqueness and
/// neither does the loader beyond part-merge deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name of the participant.
    pub name: String,
}

/// A single message record read from a chat export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the sender. May name someone absent from the
    /// participant list (people who left the conversation still appear here).
    pub sender_name: String,
    /// Milliseconds since the Unix epoch when the message was sent.
    pub timestamp_ms: i64,
    /// Text body. Absent for media-only messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Message type tag from the export, e.g. `"Generic"` or `"Share"`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Whether the sender unsent (retracted) this message.
    #[serde(default)]
    pub is_unsent: bool,
}

/// The normalized in-memory chat dataset.
///
/// Built once by the loader and treated as read-only for the rest of the
/// run; every derivation takes it by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDataset {
    /// Conversation members from the export header, first-part order.
    pub participants: Vec<Participant>,
    /// All messages, in export order (newest-first in real exports, but the
    /// loader makes no ordering promise).
    pub messages: Vec<Message>,
    /// Path of the file or directory this dataset was loaded from.
    pub source: PathBuf,
}

impl ChatDataset {
    /// The first message in export order.
    ///
    /// Fails with [`ReelError::EmptyExport`] rather than producing a
    /// degenerate default; downstream scaling needs a real conversation span.
    pub fn first_message(&self) -> Result<&Message> {
        self.messages
            .first()
            .ok_or_else(|| ReelError::EmptyExport(self.source.clone()))
    }

    /// The last message in export order.
    pub fn last_message(&self) -> Result<&Message> {
        self.messages
            .last()
            .ok_or_else(|| ReelError::EmptyExport(self.source.clone()))
    }

    /// Total number of messages in the dataset.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
