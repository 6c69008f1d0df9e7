use crate::commands::CmdResult;
use crate::error::{Rejection, Result};
use crate::ids::normalize_label;
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;

use super::helpers::{mutate_active, save_index};

pub fn add<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    raw_name: &str,
) -> Result<CmdResult> {
    let Some(name) = normalize_label(raw_name) else {
        return Ok(CmdResult::rejected(Rejection::Empty));
    };
    let outcome = mutate_active(session, bridge, |sections, _| {
        sections.add_section(name.clone())
    })?;
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Section added: {}", name)
    }))
}

/// Deletes a section with all of its notes.
pub fn delete<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    id: &str,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| sections.delete_section(id))?;
    if outcome.is_applied() && session.minimized.remove(id) {
        save_index(session, bridge)?;
    }
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Section deleted: {}", id)
    }))
}

/// Renames a section. Its notes and minimized state come along.
pub fn rename<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    id: &str,
    raw_name: &str,
) -> Result<CmdResult> {
    let Some(name) = normalize_label(raw_name) else {
        return Ok(CmdResult::rejected(Rejection::Empty));
    };
    let outcome = mutate_active(session, bridge, |sections, _| {
        sections.rename_section(id, name.clone())
    })?;
    if outcome.is_applied() && session.minimized.remove(id) {
        session.minimized.insert(name.clone());
        save_index(session, bridge)?;
    }
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Section renamed: {} -> {}", id, name)
    }))
}

pub fn reorder<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| {
        sections.reorder_sections(from, to)
    })?;
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Section moved: {} -> {}", from + 1, to + 1)
    }))
}

/// Flips the minimized flag of a section in the active week. Only the
/// planner index is written; the week's slot does not change.
pub fn toggle_minimized<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    id: &str,
) -> Result<CmdResult> {
    let Some(sections) = session.active_sections() else {
        return Ok(CmdResult::rejected(Rejection::NoActiveWeek));
    };
    if !sections.contains_section(id) {
        return Ok(CmdResult::rejected(Rejection::NotFound(id.to_string())));
    }

    let minimized = if session.minimized.remove(id) {
        false
    } else {
        session.minimized.insert(id.to_string());
        true
    };
    save_index(session, bridge)?;

    let state = if minimized { "minimized" } else { "expanded" };
    Ok(CmdResult::applied(format!("Section {}: {}", state, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::weeks;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn setup(store: InMemoryStore) -> (Session, Bridge<InMemoryStore>) {
        let bridge = Bridge::new(store, vec!["Monday".into(), "Tuesday".into()]);
        let session = Session::restore(&bridge, &["week1".to_string()]);
        (session, bridge)
    }

    fn section_ids(session: &Session) -> Vec<String> {
        session
            .active_sections()
            .unwrap()
            .sections()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn add_appends_and_saves_week() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        let result = add(&mut session, &mut bridge, " Wednesday ").unwrap();

        assert!(result.is_applied());
        assert_eq!(section_ids(&session), vec!["Monday", "Tuesday", "Wednesday"]);
        assert_eq!(bridge.load("week1").len(), 3);
    }

    #[test]
    fn add_duplicate_is_rejected_without_writing() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        let result = add(&mut session, &mut bridge, "Monday").unwrap();
        assert_eq!(
            result.rejection(),
            Some(&Rejection::Duplicate("Monday".into()))
        );
        assert!(bridge.store().is_empty());
    }

    #[test]
    fn delete_drops_notes_and_minimized_flag() {
        let store = StoreFixture::new()
            .with_week("week1", &[("Monday", &["a", "b"]), ("Tuesday", &[])])
            .build();
        let (mut session, mut bridge) = setup(store);
        toggle_minimized(&mut session, &mut bridge, "Monday").unwrap();

        let result = delete(&mut session, &mut bridge, "Monday").unwrap();
        assert!(result.is_applied());
        assert_eq!(section_ids(&session), vec!["Tuesday"]);
        assert_eq!(session.active_sections().unwrap().note_count(), 0);
        assert!(!session.is_minimized("Monday"));
        assert!(bridge.load_index().unwrap().minimized.is_empty());
    }

    #[test]
    fn rename_keeps_notes_and_minimized_state() {
        let store = StoreFixture::new()
            .with_week("week1", &[("Monday", &["Buy milk"])])
            .build();
        let (mut session, mut bridge) = setup(store);
        toggle_minimized(&mut session, &mut bridge, "Monday").unwrap();

        let result = rename(&mut session, &mut bridge, "Monday", "Mon").unwrap();
        assert!(result.is_applied());
        let sections = session.active_sections().unwrap();
        assert_eq!(sections.owner_of("Monday-1"), Some("Mon"));
        assert!(session.is_minimized("Mon"));
        assert!(!session.is_minimized("Monday"));
        assert_eq!(bridge.load("week1").sections()[0].name, "Mon");
    }

    #[test]
    fn rename_to_same_name_is_no_change() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        let result = rename(&mut session, &mut bridge, "Monday", "Monday").unwrap();
        assert_eq!(result.rejection(), Some(&Rejection::NoChange));
    }

    #[test]
    fn reorder_moves_section() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        add(&mut session, &mut bridge, "Wednesday").unwrap();
        reorder(&mut session, &mut bridge, 2, 0).unwrap();
        assert_eq!(section_ids(&session), vec!["Wednesday", "Monday", "Tuesday"]);
    }

    #[test]
    fn toggle_minimized_round_trips_and_only_writes_index() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        toggle_minimized(&mut session, &mut bridge, "Tuesday").unwrap();
        assert!(session.is_minimized("Tuesday"));
        assert_eq!(bridge.store().read_slot("notes_week1").unwrap(), None);

        toggle_minimized(&mut session, &mut bridge, "Tuesday").unwrap();
        assert!(!session.is_minimized("Tuesday"));

        let unknown = toggle_minimized(&mut session, &mut bridge, "Sunday").unwrap();
        assert_eq!(
            unknown.rejection(),
            Some(&Rejection::NotFound("Sunday".into()))
        );
    }

    #[test]
    fn section_commands_need_an_active_week() {
        let (mut session, mut bridge) = setup(InMemoryStore::new());
        weeks::delete(&mut session, &mut bridge, "week1").unwrap();

        let result = add(&mut session, &mut bridge, "Monday").unwrap();
        assert_eq!(result.rejection(), Some(&Rejection::NoActiveWeek));
        let result = toggle_minimized(&mut session, &mut bridge, "Monday").unwrap();
        assert_eq!(result.rejection(), Some(&Rejection::NoActiveWeek));
    }
}
