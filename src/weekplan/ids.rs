//! Identifier rules for weeks, sections and notes.
//!
//! Week and section ids are user supplied. They are trimmed on the way in and
//! an empty result is never accepted. Uniqueness is checked by whichever store
//! owns the scope: the week store for weeks, a week's section store for its
//! sections.
//!
//! Note ids are generated as `{section_id}-{millis}`. The generator never
//! hands out the same stamp twice in a session and skips any id already taken
//! in the week, so two notes added within the same millisecond still differ.

use chrono::{DateTime, Utc};

/// Trims raw input. Returns `None` when nothing is left.
pub fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn note_id(section_id: &str, stamp: i64) -> String {
    format!("{}-{}", section_id, stamp)
}

#[derive(Debug, Clone, Default)]
pub struct NoteIdGen {
    last_stamp: i64,
}

impl NoteIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh note id for `section_id` at time `now`.
    ///
    /// `taken` reports ids already present in the week.
    pub fn next<F>(&mut self, section_id: &str, now: DateTime<Utc>, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut stamp = now.timestamp_millis().max(self.last_stamp + 1);
        let mut id = note_id(section_id, stamp);
        while taken(&id) {
            stamp += 1;
            id = note_id(section_id, stamp);
        }
        self.last_stamp = stamp;
        id
    }
}
