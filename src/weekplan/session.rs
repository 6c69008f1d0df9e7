//! # Session State
//!
//! Everything the planner knows at runtime, in one explicit struct: the week
//! store, which week is active, which of its sections are minimized, and the
//! note id generator. Commands receive the session by `&mut` and nothing else
//! holds planner state.
//!
//! ## Initialization
//!
//! [`Session::restore`] is the one place a session is built, and it runs in a
//! fixed order:
//!
//! 1. Week list and selection come from the planner index slot, or from the
//!    configured default weeks when there is no index.
//! 2. Every week is seeded with the default sections.
//! 3. The selected week (the stored selection if it still exists, else the
//!    first week) is loaded from its slot, replacing its seed. If the slot is
//!    missing the seed stays. Storage and defaults are never both applied.

use crate::ids::{normalize_label, NoteIdGen};
use crate::model::{SectionStore, Week, WeekStore};
use crate::store::bridge::{Bridge, PlannerIndex};
use crate::store::SlotStore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) weeks: WeekStore,
    pub(crate) selected: Option<String>,
    pub(crate) minimized: BTreeSet<String>,
    pub(crate) note_ids: NoteIdGen,
}

impl Session {
    pub fn restore<S: SlotStore>(bridge: &Bridge<S>, default_weeks: &[String]) -> Self {
        let index = bridge.load_index().unwrap_or_else(|| PlannerIndex {
            weeks: default_weeks.to_vec(),
            ..PlannerIndex::default()
        });

        let mut weeks = WeekStore::new();
        for raw in &index.weeks {
            if let Some(id) = normalize_label(raw) {
                let _ = weeks.add(id, bridge.default_sections());
            }
        }

        let stored_selection = index.selected.filter(|id| weeks.contains(id));
        let restored_selection = stored_selection.is_some();
        let selected = stored_selection.or_else(|| weeks.first().map(|w| w.id.clone()));

        let mut session = Session {
            weeks,
            selected: None,
            minimized: BTreeSet::new(),
            note_ids: NoteIdGen::new(),
        };
        if let Some(id) = selected {
            let sections = bridge.load(&id);
            let minimized: BTreeSet<String> = if restored_selection {
                index
                    .minimized
                    .into_iter()
                    .filter(|s| sections.contains_section(s))
                    .collect()
            } else {
                BTreeSet::new()
            };
            session.activate(id, sections);
            session.minimized = minimized;
        }
        log::debug!(
            "session restored: {} weeks, selected {:?}",
            session.weeks.len(),
            session.selected
        );
        session
    }

    pub fn weeks(&self) -> &WeekStore {
        &self.weeks
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active_week(&self) -> Option<&Week> {
        self.weeks.get(self.selected.as_deref()?)
    }

    pub fn active_sections(&self) -> Option<&SectionStore> {
        self.active_week().map(|w| &w.sections)
    }

    pub fn is_minimized(&self, section_id: &str) -> bool {
        self.minimized.contains(section_id)
    }

    pub fn minimized(&self) -> &BTreeSet<String> {
        &self.minimized
    }

    /// Makes `id` the active week with freshly loaded `sections`.
    ///
    /// Minimized flags belong to the previously active week and are dropped
    /// when switching to a different one.
    pub(crate) fn activate(&mut self, id: String, sections: SectionStore) {
        if self.selected.as_deref() != Some(id.as_str()) {
            self.minimized.clear();
        }
        if let Some(week) = self.weeks.get_mut(&id) {
            week.sections = sections;
        }
        self.selected = Some(id);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        self.minimized.clear();
    }

    /// Snapshot of the week-level state for the planner index slot.
    pub fn index(&self) -> PlannerIndex {
        PlannerIndex {
            weeks: self.weeks.ids().into_iter().map(String::from).collect(),
            selected: self.selected.clone(),
            minimized: self.minimized.clone(),
        }
    }
}
