//! In-memory, per-user notes.
//!
//! Process lifetime only: nothing is persisted, the map is reset on restart,
//! and entries are never evicted or deleted. Each sequence is keyed by the
//! verified subject, so one user's requests can never observe another's
//! notes.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A single note. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

/// Per-user note sequences, most-recent-first.
///
/// Appends mutate exactly one map entry under that entry's lock, so
/// concurrent requests for different users never contend and two appends for
/// the same user serialise cleanly.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: DashMap<String, Vec<Note>>,
    last_id: AtomicI64,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's notes in stored order (newest first); empty if none.
    pub fn list_for(&self, sub: &str) -> Vec<Note> {
        self.notes
            .get(sub)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Prepend a note for the user and return it. The caller validates and
    /// trims `text`; the store expects it non-empty.
    pub fn append_for(&self, sub: &str, text: &str) -> Note {
        let note = Note {
            id: self.next_id(),
            text: text.to_string(),
        };
        self.notes
            .entry(sub.to_string())
            .or_default()
            .insert(0, note.clone());
        note
    }

    /// Millisecond-timestamp ids with a monotonic floor: the issued id is
    /// `max(now_millis, last + 1)`, so ids stay strictly increasing and
    /// unique for the process lifetime even for same-millisecond appends.
    fn next_id(&self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let prev = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|current| current);
        now.max(prev + 1)
    }
}
