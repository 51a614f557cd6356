//! Chat export discovery and loading.
//!
//! Reads Messenger-style export files (a `participants` array plus a
//! `messages` array) and converts them into a validated [`ChatDataset`] for
//! the aggregation pipeline. Large conversations are exported as several
//! `message_N.json` parts; pointing the loader at a directory merges them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reel_core::error::{ReelError, Result};
use reel_core::models::{ChatDataset, Message, Participant};
use serde::Deserialize;
use tracing::{debug, warn};

/// On-disk shape of one export part. Both arrays are required; an export
/// missing either is a schema error, not an empty dataset.
#[derive(Debug, Deserialize)]
struct RawExport {
    participants: Vec<Participant>,
    messages: Vec<Message>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` export parts recursively under `dir`, sorted by path.
///
/// Part files are named `message_1.json`, `message_2.json`, … so the path
/// sort doubles as the part order.
pub fn find_export_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Export path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load a chat export into a [`ChatDataset`].
///
/// `path` may be a single export file or a directory of part files. The
/// result is validated: a structurally malformed part fails with a
/// descriptive [`ReelError::Schema`], and an export with zero messages fails
/// with [`ReelError::EmptyExport`]. No partial dataset is ever returned.
pub fn load_chat_export(path: &Path) -> Result<ChatDataset> {
    let parts = if path.is_dir() {
        let files = find_export_files(path);
        if files.is_empty() {
            return Err(ReelError::NoExportFiles(path.to_path_buf()));
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut participants: Vec<Participant> = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut messages: Vec<Message> = Vec::new();

    for part_path in &parts {
        let part = read_part(part_path)?;
        debug!(
            "Part {}: {} participants, {} messages",
            part_path.display(),
            part.participants.len(),
            part.messages.len(),
        );

        // Participants repeat across parts; keep first-encounter order.
        for participant in part.participants {
            if seen_names.insert(participant.name.clone()) {
                participants.push(participant);
            }
        }
        messages.extend(part.messages);
    }

    if messages.is_empty() {
        return Err(ReelError::EmptyExport(path.to_path_buf()));
    }

    debug!(
        "Loaded {} messages from {} part(s) under {}",
        messages.len(),
        parts.len(),
        path.display()
    );

    Ok(ChatDataset {
        participants,
        messages,
        source: path.to_path_buf(),
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read and validate a single export part.
fn read_part(path: &Path) -> Result<RawExport> {
    let text = std::fs::read_to_string(path).map_err(|source| ReelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|err| ReelError::Schema {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_part(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    fn sample_export(names: &[&str], messages: &[(&str, i64)]) -> String {
        let participants: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({ "name": n }))
            .collect();
        let messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|(sender, ts)| {
                serde_json::json!({
                    "sender_name": sender,
                    "timestamp_ms": ts,
                    "content": "salut",
                    "type": "Generic",
                    "is_unsent": false,
                })
            })
            .collect();
        serde_json::json!({ "participants": participants, "messages": messages }).to_string()
    }

    // ── find_export_files ─────────────────────────────────────────────────────

    #[test]
    fn test_find_export_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_part(dir.path(), "message_2.json", "{}");
        write_part(dir.path(), "message_1.json", "{}");
        write_part(dir.path(), "notes.txt", "ignored");

        let files = find_export_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["message_1.json", "message_2.json"]);
    }

    #[test]
    fn test_find_export_files_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("inbox").join("groupchat");
        std::fs::create_dir_all(&sub).unwrap();
        write_part(&sub, "message_1.json", "{}");

        let files = find_export_files(dir.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_export_files_nonexistent_path() {
        let files = find_export_files(Path::new("/tmp/does-not-exist-chatreel-test"));
        assert!(files.is_empty());
    }

    // ── load_chat_export (single file) ────────────────────────────────────────

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        let body = sample_export(&["Alice", "Bob"], &[("Alice", 100), ("Bob", 200)]);
        let path = write_part(dir.path(), "message_1.json", &body);

        let dataset = load_chat_export(&path).unwrap();
        assert_eq!(dataset.participants.len(), 2);
        assert_eq!(dataset.messages.len(), 2);
        assert_eq!(dataset.messages[0].sender_name, "Alice");
        assert_eq!(dataset.source, path);
    }

    #[test]
    fn test_load_rejects_missing_messages_array() {
        let dir = TempDir::new().unwrap();
        let path = write_part(
            dir.path(),
            "broken.json",
            r#"{"participants": [{"name": "Alice"}]}"#,
        );

        let err = load_chat_export(&path).unwrap_err();
        match err {
            ReelError::Schema { detail, .. } => assert!(detail.contains("messages")),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_non_numeric_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = write_part(
            dir.path(),
            "broken.json",
            r#"{
                "participants": [{"name": "Alice"}],
                "messages": [{"sender_name": "Alice", "timestamp_ms": "hier"}]
            }"#,
        );

        assert!(matches!(
            load_chat_export(&path),
            Err(ReelError::Schema { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_part(dir.path(), "broken.json", "{not json{{");
        assert!(matches!(
            load_chat_export(&path),
            Err(ReelError::Schema { .. })
        ));
    }

    #[test]
    fn test_load_empty_export_fails_fast() {
        let dir = TempDir::new().unwrap();
        let body = sample_export(&["Alice"], &[]);
        let path = write_part(dir.path(), "message_1.json", &body);

        assert!(matches!(
            load_chat_export(&path),
            Err(ReelError::EmptyExport(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_chat_export(Path::new("/tmp/no-such-export-chatreel.json")).unwrap_err();
        assert!(matches!(err, ReelError::FileRead { .. }));
    }

    // ── load_chat_export (directory of parts) ─────────────────────────────────

    #[test]
    fn test_load_directory_merges_parts_in_order() {
        let dir = TempDir::new().unwrap();
        write_part(
            dir.path(),
            "message_1.json",
            &sample_export(&["Alice", "Bob"], &[("Alice", 100)]),
        );
        write_part(
            dir.path(),
            "message_2.json",
            &sample_export(&["Alice", "Bob"], &[("Bob", 200), ("Alice", 300)]),
        );

        let dataset = load_chat_export(dir.path()).unwrap();
        // Participants deduplicated across parts, first-encounter order.
        let names: Vec<&str> = dataset
            .participants
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        // Messages concatenated in part order.
        let timestamps: Vec<i64> = dataset.messages.iter().map(|m| m.timestamp_ms).collect();
        assert_eq!(timestamps, vec![100, 200, 300]);
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_chat_export(dir.path()),
            Err(ReelError::NoExportFiles(_))
        ));
    }

    #[test]
    fn test_load_directory_with_one_broken_part_fails() {
        // No partial dataset: any malformed part aborts the whole load.
        let dir = TempDir::new().unwrap();
        write_part(
            dir.path(),
            "message_1.json",
            &sample_export(&["Alice"], &[("Alice", 100)]),
        );
        write_part(dir.path(), "message_2.json", "{broken");

        assert!(matches!(
            load_chat_export(dir.path()),
            Err(ReelError::Schema { .. })
        ));
    }
}
