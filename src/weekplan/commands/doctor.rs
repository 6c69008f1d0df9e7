use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Outcome, Result};
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;

use super::helpers::save_index;

/// Reconciles the planner index with the week slots actually in storage.
///
/// A slot whose week is missing from the index (left behind when its removal
/// failed after a week delete or rename) is recovered by appending its week to
/// the list. Weeks without a slot are fine: they load the default sections.
pub fn run<S: SlotStore>(session: &mut Session, bridge: &mut Bridge<S>) -> Result<CmdResult> {
    let orphans: Vec<String> = bridge
        .stored_weeks()?
        .into_iter()
        .filter(|id| !session.weeks.contains(id))
        .collect();

    if orphans.is_empty() {
        let mut result = CmdResult::new(Outcome::Applied);
        result.add_message(CmdMessage::info("No inconsistencies found."));
        return Ok(result);
    }

    let mut recovered = Vec::new();
    for id in orphans {
        let sections = bridge.load(&id);
        if session.weeks.add(id.clone(), sections).is_applied() {
            recovered.push(id);
        }
    }
    if session.selected.is_none() {
        if let Some(first) = session.weeks.first().map(|w| w.id.clone()) {
            let sections = bridge.load(&first);
            session.activate(first, sections);
        }
    }
    save_index(session, bridge)?;
    log::info!("doctor recovered weeks: {:?}", recovered);

    let mut result = CmdResult::new(Outcome::Applied);
    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    result.add_message(CmdMessage::info(format!(
        "  - Recovered {} week(s) found in storage but missing from the index: {}",
        recovered.len(),
        recovered.join(", ")
    )));
    Ok(result)
}
