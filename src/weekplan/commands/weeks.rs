use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Outcome, Rejection, Result};
use crate::ids::normalize_label;
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;

use super::helpers::save_index;

/// Appends a week seeded with the default sections and asks the router to
/// show it. Selection itself is unchanged until the router calls [`select`].
pub fn add<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    raw_id: &str,
) -> Result<CmdResult> {
    let Some(id) = normalize_label(raw_id) else {
        return Ok(CmdResult::rejected(Rejection::Empty));
    };
    if let Outcome::Rejected(r) = session.weeks.add(id.clone(), bridge.default_sections()) {
        return Ok(CmdResult::rejected(r));
    }
    save_index(session, bridge)?;
    log::info!("week added: {}", id);

    Ok(CmdResult::applied(format!("Week added: {}", id)).with_navigation(id))
}

/// Removes a week and its slot. Deleting the selected week selects its
/// previous neighbor, or the new first week, or nothing.
///
/// The index is written before the slot is removed. A slot that outlives a
/// failed removal is reported and left for [`doctor`](super::doctor).
pub fn delete<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    id: &str,
) -> Result<CmdResult> {
    let was_selected = session.selected() == Some(id);
    let Some((idx, _)) = session.weeks.remove(id) else {
        return Ok(CmdResult::rejected(Rejection::NotFound(id.to_string())));
    };

    let mut result = CmdResult::applied(format!("Week deleted: {}", id));
    if was_selected {
        let next = session
            .weeks
            .at(idx.saturating_sub(1))
            .map(|w| w.id.clone());
        match next {
            Some(next) => {
                let sections = bridge.load(&next);
                session.activate(next.clone(), sections);
                result = result.with_navigation(next);
            }
            None => session.clear_selection(),
        }
    }
    save_index(session, bridge)?;
    if let Err(e) = bridge.remove(id) {
        log::error!("week {} deleted but its slot remains: {}", id, e);
        result.add_message(leftover_slot_message(id));
    }
    log::info!("week deleted: {} (selected {:?})", id, session.selected());

    Ok(result)
}

/// Relabels a week. Its stored slot moves to the new key, and selection
/// follows the week if it was active.
///
/// The slot is copied, then the index is written, then the old slot is
/// removed, so a failure at any step leaves the notes reachable.
pub fn rename<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    old: &str,
    raw_new: &str,
) -> Result<CmdResult> {
    let Some(new) = normalize_label(raw_new) else {
        return Ok(CmdResult::rejected(Rejection::Empty));
    };
    if let Outcome::Rejected(r) = session.weeks.check_rename(old, &new) {
        return Ok(CmdResult::rejected(r));
    }

    let copied = bridge.copy(old, &new)?;
    if let Outcome::Rejected(r) = session.weeks.rename(old, new.clone()) {
        return Ok(CmdResult::rejected(r));
    }
    let mut result = CmdResult::applied(format!("Week renamed: {} -> {}", old, new));
    if session.selected() == Some(old) {
        session.selected = Some(new.clone());
        result = result.with_navigation(new.clone());
    }

    if let Err(e) = save_index(session, bridge) {
        if copied {
            if let Err(cleanup) = bridge.remove(&new) {
                log::warn!("could not drop copied slot of {}: {}", new, cleanup);
            }
        }
        return Err(e);
    }
    if copied {
        if let Err(e) = bridge.remove(old) {
            log::error!("week {} renamed but its old slot remains: {}", old, e);
            result.add_message(leftover_slot_message(old));
        }
    }
    log::info!("week renamed: {} -> {}", old, new);

    Ok(result)
}

fn leftover_slot_message(id: &str) -> CmdMessage {
    CmdMessage::error(format!(
        "Stored notes of \"{}\" could not be removed; `weekplan doctor` will restore them",
        id
    ))
}

pub fn reorder<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    let outcome = session.weeks.reorder(from, to);
    if outcome.is_applied() {
        save_index(session, bridge)?;
    }
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Week moved: {} -> {}", from + 1, to + 1)
    }))
}

/// Makes `id` the active week, reloading its sections from storage.
pub fn select<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    id: &str,
) -> Result<CmdResult> {
    if !session.weeks.contains(id) {
        return Ok(CmdResult::rejected(Rejection::NotFound(id.to_string())));
    }
    let sections = bridge.load(id);
    session.activate(id.to_string(), sections);
    save_index(session, bridge)?;
    log::debug!("week selected: {}", id);

    Ok(CmdResult::applied(format!("Week selected: {}", id)))
}
