//! # Persistence Bridge
//!
//! Translates between planner state and raw [`SlotStore`] payloads.
//!
//! Loading never fails. A missing slot, an unreadable store or a payload that
//! does not parse as a valid section list all produce the configured default
//! sections, with a warning in the log. Saving does fail, because losing a
//! write silently is worse than telling the caller.
//!
//! The bridge is only driven from command code, after a mutation has been
//! applied or when the active week changes. Reading planner state through
//! the API never reaches storage.

use super::SlotStore;
use crate::error::{PlannerError, Result};
use crate::model::SectionStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Key of the slot holding week order and selection.
pub const INDEX_KEY: &str = "planner";
const WEEK_SLOT_PREFIX: &str = "notes_";

pub fn week_slot_key(week_id: &str) -> String {
    format!("{}{}", WEEK_SLOT_PREFIX, week_id)
}

/// Week-level state persisted next to the week slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerIndex {
    pub weeks: Vec<String>,
    #[serde(default)]
    pub selected: Option<String>,
    /// Minimized sections of the selected week.
    #[serde(default)]
    pub minimized: BTreeSet<String>,
}

pub struct Bridge<S: SlotStore> {
    store: S,
    default_sections: Vec<String>,
}

impl<S: SlotStore> Bridge<S> {
    pub fn new(store: S, default_sections: Vec<String>) -> Self {
        Self {
            store,
            default_sections,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// A fresh section store seeded with the configured defaults.
    pub fn default_sections(&self) -> SectionStore {
        SectionStore::seeded(&self.default_sections)
    }

    /// Reads the stored sections of `week_id`, or the defaults.
    pub fn load(&self, week_id: &str) -> SectionStore {
        let key = week_slot_key(week_id);
        let payload = match self.store.read_slot(&key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                log::debug!("no stored slot for week {}, using defaults", week_id);
                return self.default_sections();
            }
            Err(e) => {
                log::warn!("could not read slot {}: {}; using defaults", key, e);
                return self.default_sections();
            }
        };
        match serde_json::from_str::<SectionStore>(&payload) {
            Ok(sections) => sections,
            Err(e) => {
                log::warn!("slot {} is not a valid section list: {}; using defaults", key, e);
                self.default_sections()
            }
        }
    }

    pub fn save(&mut self, week_id: &str, sections: &SectionStore) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(sections).map_err(PlannerError::Serialization)?;
        self.store.write_slot(&week_slot_key(week_id), &payload)?;
        log::debug!("saved week {} ({} sections)", week_id, sections.len());
        Ok(())
    }

    pub fn remove(&mut self, week_id: &str) -> Result<()> {
        self.store.remove_slot(&week_slot_key(week_id))
    }

    /// Copies the slot of `old` to `new`, leaving `old` in place. Returns
    /// whether there was anything to copy.
    pub fn copy(&mut self, old: &str, new: &str) -> Result<bool> {
        let Some(payload) = self.store.read_slot(&week_slot_key(old))? else {
            return Ok(false);
        };
        self.store.write_slot(&week_slot_key(new), &payload)?;
        log::debug!("copied slot of week {} to {}", old, new);
        Ok(true)
    }

    /// Notes stored for `week_id`, counted from its slot as [`load`](Self::load)
    /// would read it.
    pub fn note_count(&self, week_id: &str) -> usize {
        self.load(week_id).note_count()
    }

    /// Week ids that have a slot in storage, sorted.
    pub fn stored_weeks(&self) -> Result<Vec<String>> {
        let mut weeks: Vec<String> = self
            .store
            .slot_keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(WEEK_SLOT_PREFIX).map(String::from))
            .collect();
        weeks.sort();
        Ok(weeks)
    }

    /// Reads the planner index. `None` when absent or unreadable.
    pub fn load_index(&self) -> Option<PlannerIndex> {
        let payload = match self.store.read_slot(INDEX_KEY) {
            Ok(payload) => payload?,
            Err(e) => {
                log::warn!("could not read planner index: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(index) => Some(index),
            Err(e) => {
                log::warn!("planner index is corrupt: {}; starting fresh", e);
                None
            }
        }
    }

    pub fn save_index(&mut self, index: &PlannerIndex) -> Result<()> {
        let payload = serde_json::to_string_pretty(index).map_err(PlannerError::Serialization)?;
        self.store.write_slot(INDEX_KEY, &payload)
    }
}
