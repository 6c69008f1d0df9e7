//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every planner operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`Session`] and the [`Bridge`] to storage
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Rolls back** the session when a command fails with a storage error
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Reader methods (`weeks`, `active_sections`, ...) only look at the session
//! and never reach storage. The exception is [`PlannerApi::week_note_counts`],
//! which counts inactive weeks from their slots.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O to the terminal**: no stdout, stderr, or formatting
//!
//! ## Generic Over SlotStore
//!
//! `PlannerApi<S: SlotStore>` runs on any backend:
//! - Production: `PlannerApi<FileStore>`
//! - Testing: `PlannerApi<InMemoryStore>`
//!
//! API tests only check dispatch and rollback; command behavior is covered
//! by the command modules.

use crate::commands::{self, transact};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::model::{SectionStore, WeekStore};
use crate::reconcile::DragResult;
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;
use std::collections::BTreeSet;

pub struct PlannerApi<S: SlotStore> {
    session: Session,
    bridge: Bridge<S>,
}

impl<S: SlotStore> PlannerApi<S> {
    /// Builds the session from whatever `store` holds, falling back to the
    /// configured defaults.
    pub fn open(store: S, config: &PlannerConfig) -> Self {
        let bridge = Bridge::new(store, config.default_sections.clone());
        let session = Session::restore(&bridge, &config.default_weeks);
        Self { session, bridge }
    }

    // --- Readers ---

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn weeks(&self) -> &WeekStore {
        self.session.weeks()
    }

    pub fn selected_week(&self) -> Option<&str> {
        self.session.selected()
    }

    pub fn active_sections(&self) -> Option<&SectionStore> {
        self.session.active_sections()
    }

    pub fn is_minimized(&self, section_id: &str) -> bool {
        self.session.is_minimized(section_id)
    }

    pub fn minimized(&self) -> &BTreeSet<String> {
        self.session.minimized()
    }

    /// Every week with its note count, in list order. The active week is
    /// counted from the session, the others from storage, since the session
    /// only holds a loaded copy of the active week.
    pub fn week_note_counts(&self) -> Vec<(&str, usize)> {
        let selected = self.session.selected();
        self.session
            .weeks()
            .weeks()
            .iter()
            .map(|week| {
                let count = if selected == Some(week.id.as_str()) {
                    week.sections.note_count()
                } else {
                    self.bridge.note_count(&week.id)
                };
                (week.id.as_str(), count)
            })
            .collect()
    }

    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    pub fn into_store(self) -> S {
        self.bridge.into_store()
    }

    // --- Weeks ---

    pub fn add_week(&mut self, name: &str) -> Result<commands::CmdResult> {
        self.run(|session, bridge| commands::weeks::add(session, bridge, name))
    }

    pub fn delete_week(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = id.trim();
        self.run(|session, bridge| commands::weeks::delete(session, bridge, id))
    }

    pub fn rename_week(&mut self, old: &str, new: &str) -> Result<commands::CmdResult> {
        let old = old.trim();
        self.run(|session, bridge| commands::weeks::rename(session, bridge, old, new))
    }

    pub fn reorder_weeks(&mut self, from: usize, to: usize) -> Result<commands::CmdResult> {
        self.run(|session, bridge| commands::weeks::reorder(session, bridge, from, to))
    }

    pub fn select_week(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = id.trim();
        self.run(|session, bridge| commands::weeks::select(session, bridge, id))
    }

    // --- Sections of the active week ---

    pub fn add_section(&mut self, name: &str) -> Result<commands::CmdResult> {
        self.run(|session, bridge| commands::sections::add(session, bridge, name))
    }

    pub fn delete_section(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = id.trim();
        self.run(|session, bridge| commands::sections::delete(session, bridge, id))
    }

    pub fn rename_section(&mut self, id: &str, new_name: &str) -> Result<commands::CmdResult> {
        let id = id.trim();
        self.run(|session, bridge| commands::sections::rename(session, bridge, id, new_name))
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Result<commands::CmdResult> {
        self.run(|session, bridge| commands::sections::reorder(session, bridge, from, to))
    }

    pub fn toggle_minimized(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = id.trim();
        self.run(|session, bridge| commands::sections::toggle_minimized(session, bridge, id))
    }

    // --- Notes of the active week ---

    pub fn add_note(&mut self, section_id: &str, content: &str) -> Result<commands::CmdResult> {
        let section_id = section_id.trim();
        self.run(|session, bridge| commands::notes::add(session, bridge, section_id, content))
    }

    pub fn delete_note(&mut self, section_id: &str, note_id: &str) -> Result<commands::CmdResult> {
        let section_id = section_id.trim();
        let note_id = note_id.trim();
        self.run(|session, bridge| commands::notes::delete(session, bridge, section_id, note_id))
    }

    pub fn edit_note_content(
        &mut self,
        note_id: &str,
        content: &str,
    ) -> Result<commands::CmdResult> {
        let note_id = note_id.trim();
        self.run(|session, bridge| commands::notes::edit(session, bridge, note_id, content))
    }

    pub fn toggle_complete(&mut self, note_id: &str) -> Result<commands::CmdResult> {
        let note_id = note_id.trim();
        self.run(|session, bridge| commands::notes::toggle(session, bridge, note_id))
    }

    pub fn move_note(
        &mut self,
        source_section: &str,
        source_index: usize,
        dest_section: &str,
        dest_index: usize,
    ) -> Result<commands::CmdResult> {
        let source_section = source_section.trim();
        let dest_section = dest_section.trim();
        self.run(|session, bridge| {
            commands::notes::move_note(
                session,
                bridge,
                source_section,
                source_index,
                dest_section,
                dest_index,
            )
        })
    }

    pub fn apply_note_drop(&mut self, drag: &DragResult<String>) -> Result<commands::CmdResult> {
        self.run(|session, bridge| commands::notes::apply_drop(session, bridge, drag))
    }

    // --- Maintenance ---

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        self.run(commands::doctor::run)
    }

    fn run<F>(&mut self, op: F) -> Result<commands::CmdResult>
    where
        F: FnOnce(&mut Session, &mut Bridge<S>) -> Result<commands::CmdResult>,
    {
        transact(&mut self.session, &mut self.bridge, op)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
