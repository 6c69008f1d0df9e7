use crate::error::{Outcome, Rejection, Result};
use crate::ids::NoteIdGen;
use crate::model::SectionStore;
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;

/// Runs a command and restores the session if it fails with a storage error.
///
/// Rejections are `Ok` and never mutate, so only `Err` needs undoing. Slots
/// already written before the failure are left as they are.
pub(crate) fn transact<S, T, F>(session: &mut Session, bridge: &mut Bridge<S>, op: F) -> Result<T>
where
    S: SlotStore,
    F: FnOnce(&mut Session, &mut Bridge<S>) -> Result<T>,
{
    let before = session.clone();
    match op(session, bridge) {
        Ok(value) => Ok(value),
        Err(e) => {
            log::error!("command failed, session rolled back: {}", e);
            *session = before;
            Err(e)
        }
    }
}

/// Applies `op` to the active week's sections and saves the week when it
/// changed anything.
pub(crate) fn mutate_active<S, F>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    op: F,
) -> Result<Outcome>
where
    S: SlotStore,
    F: FnOnce(&mut SectionStore, &mut NoteIdGen) -> Outcome,
{
    let Some(selected) = session.selected.clone() else {
        return Ok(Rejection::NoActiveWeek.into());
    };
    let Some(week) = session.weeks.get_mut(&selected) else {
        return Ok(Rejection::NoActiveWeek.into());
    };
    let outcome = op(&mut week.sections, &mut session.note_ids);
    if outcome.is_applied() {
        bridge.save(&week.id, &week.sections)?;
    }
    Ok(outcome)
}

pub(crate) fn save_index<S: SlotStore>(session: &Session, bridge: &mut Bridge<S>) -> Result<()> {
    bridge.save_index(&session.index())
}
