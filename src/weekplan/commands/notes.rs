use crate::commands::CmdResult;
use crate::error::{Rejection, Result};
use crate::ids::normalize_label;
use crate::model::Note;
use crate::reconcile::{DragResult, Position};
use crate::session::Session;
use crate::store::bridge::Bridge;
use crate::store::SlotStore;
use chrono::Utc;

use super::helpers::mutate_active;

/// Appends a note to `section_id`. The result carries the generated id.
pub fn add<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    section_id: &str,
    raw_content: &str,
) -> Result<CmdResult> {
    let Some(content) = normalize_label(raw_content) else {
        return Ok(CmdResult::rejected(Rejection::Empty));
    };
    let mut created = None;
    let outcome = mutate_active(session, bridge, |sections, ids| {
        if !sections.contains_section(section_id) {
            return Rejection::NotFound(section_id.to_string()).into();
        }
        let id = ids.next(section_id, Utc::now(), |candidate| {
            sections.contains_note(candidate)
        });
        created = Some(id.clone());
        sections.add_note(section_id, Note::new(id, content))
    })?;

    let mut result = CmdResult::from_outcome(outcome, || format!("Note added to {}", section_id));
    if result.is_applied() {
        if let Some(id) = created {
            log::debug!("note {} added to {}", id, section_id);
            result = result.with_created_id(id);
        }
    }
    Ok(result)
}

pub fn delete<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    section_id: &str,
    note_id: &str,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| {
        sections.delete_note(section_id, note_id)
    })?;
    Ok(CmdResult::from_outcome(outcome, || {
        format!("Note deleted from {}", section_id)
    }))
}

/// Replaces a note's content as given. Unchanged content is a no-op.
pub fn edit<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    note_id: &str,
    content: &str,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| {
        sections.edit_note(note_id, content.to_string())
    })?;
    Ok(CmdResult::from_outcome(outcome, || "Note updated".to_string()))
}

pub fn toggle<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    note_id: &str,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| sections.toggle_note(note_id))?;
    let done = session
        .active_sections()
        .and_then(|sections| sections.note(note_id))
        .map(|note| note.completed)
        .unwrap_or(false);
    Ok(CmdResult::from_outcome(outcome, || {
        if done {
            "Note completed".to_string()
        } else {
            "Note reopened".to_string()
        }
    }))
}

/// Moves the note at `source_index` of `source_section` to `dest_index` of
/// `dest_section`. Both sections may be the same.
pub fn move_note<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    source_section: &str,
    source_index: usize,
    dest_section: &str,
    dest_index: usize,
) -> Result<CmdResult> {
    let drag = DragResult::new(
        Position::new(source_section.to_string(), source_index),
        Position::new(dest_section.to_string(), dest_index),
    );
    apply_drop(session, bridge, &drag)
}

/// Applies the result of a drag gesture. A drag without destination is
/// reported as cancelled.
pub fn apply_drop<S: SlotStore>(
    session: &mut Session,
    bridge: &mut Bridge<S>,
    drag: &DragResult<String>,
) -> Result<CmdResult> {
    let outcome = mutate_active(session, bridge, |sections, _| sections.move_note(drag))?;
    Ok(CmdResult::from_outcome(outcome, || {
        match &drag.destination {
            Some(dest) if dest.container != drag.source.container => {
                format!("Note moved to {}", dest.container)
            }
            _ => "Note moved".to_string(),
        }
    }))
}
