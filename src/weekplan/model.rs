//! # Planner Model
//!
//! The containers that make up a plan, from the inside out:
//!
//! - [`Note`]: one line of text with a completion flag.
//! - [`Section`]: a named, ordered list of notes (usually a day).
//! - [`SectionStore`]: the ordered sections of one week.
//! - [`Week`] / [`WeekStore`]: the ordered weeks of the planner.
//!
//! Every mutating method validates first and mutates second, returning an
//! [`Outcome`]. A rejected call leaves the container exactly as it was.
//!
//! ## Note ownership index
//!
//! Note ids are unique across a week, and several operations address a note
//! by id alone (edit, toggle). `SectionStore` keeps a `note id -> section id`
//! map next to the ordered sections so those lookups do not scan every
//! section. All mutations keep the map in step with the sections, and
//! [`SectionStore::is_consistent`] checks that they agree.
//!
//! ## Serialized shape
//!
//! A `SectionStore` serializes as the bare ordered array of sections:
//!
//! ```json
//! [{ "id": "Monday", "name": "Monday",
//!    "notes": [{ "id": "Monday-1700000000000", "content": "Buy milk", "completed": false }] }]
//! ```
//!
//! Deserializing rebuilds the index and refuses payloads with repeated
//! section or note ids.

use crate::error::{Outcome, Rejection};
use crate::reconcile::{self, Containers, DragResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

impl Note {
    pub fn new(id: String, content: String) -> Self {
        Self {
            id,
            content,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique within the week. Also the storage key for drops into this section.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Section {
    pub fn new(name: String) -> Self {
        Self {
            id: name.clone(),
            name,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionStore {
    sections: Vec<Section>,
    owners: HashMap<String, String>,
}

impl TryFrom<Vec<Section>> for SectionStore {
    type Error = Rejection;

    fn try_from(sections: Vec<Section>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        let mut owners = HashMap::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(Rejection::Duplicate(section.id.clone()));
            }
            for note in &section.notes {
                if owners
                    .insert(note.id.clone(), section.id.clone())
                    .is_some()
                {
                    return Err(Rejection::Duplicate(note.id.clone()));
                }
            }
        }
        Ok(Self { sections, owners })
    }
}

impl From<SectionStore> for Vec<Section> {
    fn from(store: SectionStore) -> Self {
        store.sections
    }
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sections named after `names`, skipping blanks and repeats.
    pub fn seeded<S: AsRef<str>>(names: &[S]) -> Self {
        let mut store = Self::new();
        for name in names {
            if let Some(name) = crate::ids::normalize_label(name.as_ref()) {
                let _ = store.add_section(name);
            }
        }
        store
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn contains_section(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    pub fn contains_note(&self, note_id: &str) -> bool {
        self.owners.contains_key(note_id)
    }

    /// Section currently holding `note_id`.
    pub fn owner_of(&self, note_id: &str) -> Option<&str> {
        self.owners.get(note_id).map(String::as_str)
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        let owner = self.owner_of(note_id)?;
        self.section(owner)?.notes.iter().find(|n| n.id == note_id)
    }

    pub fn note_count(&self) -> usize {
        self.owners.len()
    }

    fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    fn note_mut(&mut self, note_id: &str) -> Option<&mut Note> {
        let owner = self.owners.get(note_id)?.clone();
        let idx = self.section_index(&owner)?;
        self.sections[idx].notes.iter_mut().find(|n| n.id == note_id)
    }

    pub fn add_section(&mut self, name: String) -> Outcome {
        if name.trim().is_empty() {
            return Rejection::Empty.into();
        }
        if self.contains_section(&name) {
            return Rejection::Duplicate(name).into();
        }
        self.sections.push(Section::new(name));
        Outcome::Applied
    }

    pub fn delete_section(&mut self, id: &str) -> Outcome {
        let Some(idx) = self.section_index(id) else {
            return Rejection::NotFound(id.to_string()).into();
        };
        let removed = self.sections.remove(idx);
        for note in &removed.notes {
            self.owners.remove(&note.id);
        }
        Outcome::Applied
    }

    /// Changes a section's id and name together. Its notes keep their ids.
    pub fn rename_section(&mut self, id: &str, new_name: String) -> Outcome {
        if new_name.trim().is_empty() {
            return Rejection::Empty.into();
        }
        if new_name == id {
            return Rejection::NoChange.into();
        }
        let Some(idx) = self.section_index(id) else {
            return Rejection::NotFound(id.to_string()).into();
        };
        if self.contains_section(&new_name) {
            return Rejection::Duplicate(new_name).into();
        }

        let section = &mut self.sections[idx];
        for note in &section.notes {
            self.owners.insert(note.id.clone(), new_name.clone());
        }
        section.id = new_name.clone();
        section.name = new_name;
        Outcome::Applied
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Outcome {
        reconcile::reorder(&mut self.sections, from, to)
    }

    /// Appends `note` to the end of `section_id`.
    pub fn add_note(&mut self, section_id: &str, note: Note) -> Outcome {
        if note.content.trim().is_empty() {
            return Rejection::Empty.into();
        }
        let Some(idx) = self.section_index(section_id) else {
            return Rejection::NotFound(section_id.to_string()).into();
        };
        if self.contains_note(&note.id) {
            return Rejection::Duplicate(note.id).into();
        }
        self.owners.insert(note.id.clone(), section_id.to_string());
        self.sections[idx].notes.push(note);
        Outcome::Applied
    }

    /// Removes `note_id` from `section_id` only.
    pub fn delete_note(&mut self, section_id: &str, note_id: &str) -> Outcome {
        let Some(idx) = self.section_index(section_id) else {
            return Rejection::NotFound(section_id.to_string()).into();
        };
        let notes = &mut self.sections[idx].notes;
        let Some(pos) = notes.iter().position(|n| n.id == note_id) else {
            return Rejection::NotFound(note_id.to_string()).into();
        };
        notes.remove(pos);
        self.owners.remove(note_id);
        Outcome::Applied
    }

    pub fn edit_note(&mut self, note_id: &str, content: String) -> Outcome {
        let Some(note) = self.note_mut(note_id) else {
            return Rejection::NotFound(note_id.to_string()).into();
        };
        if note.content == content {
            return Rejection::NoChange.into();
        }
        note.content = content;
        Outcome::Applied
    }

    pub fn toggle_note(&mut self, note_id: &str) -> Outcome {
        let Some(note) = self.note_mut(note_id) else {
            return Rejection::NotFound(note_id.to_string()).into();
        };
        note.completed = !note.completed;
        Outcome::Applied
    }

    /// Moves a note within a section or across sections.
    pub fn move_note(&mut self, drag: &DragResult<String>) -> Outcome {
        reconcile::apply(self, drag)
    }

    /// True when section ids are distinct and the ownership index matches
    /// the notes actually held by each section.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        let mut held = 0;
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return false;
            }
            for note in &section.notes {
                held += 1;
                if self.owner_of(&note.id) != Some(section.id.as_str()) {
                    return false;
                }
            }
        }
        held == self.owners.len()
    }
}

impl Containers for SectionStore {
    type Key = String;
    type Item = Note;

    fn len_of(&self, key: &String) -> Option<usize> {
        self.section(key).map(|s| s.notes.len())
    }

    fn remove_at(&mut self, key: &String, index: usize) -> Option<Note> {
        let idx = self.section_index(key)?;
        let notes = &mut self.sections[idx].notes;
        if index >= notes.len() {
            return None;
        }
        let note = notes.remove(index);
        self.owners.remove(&note.id);
        Some(note)
    }

    fn insert_at(&mut self, key: &String, index: usize, note: Note) {
        if let Some(idx) = self.section_index(key) {
            self.owners.insert(note.id.clone(), key.clone());
            self.sections[idx].notes.insert(index, note);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub id: String,
    /// Last loaded contents, or the default seed if never selected.
    pub sections: SectionStore,
}

impl Week {
    pub fn new(id: String, sections: SectionStore) -> Self {
        Self { id, sections }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekStore {
    weeks: Vec<Week>,
}

impl WeekStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn ids(&self) -> Vec<&str> {
        self.weeks.iter().map(|w| w.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.weeks.iter().position(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Week> {
        self.weeks.iter_mut().find(|w| w.id == id)
    }

    pub fn first(&self) -> Option<&Week> {
        self.weeks.first()
    }

    pub fn at(&self, index: usize) -> Option<&Week> {
        self.weeks.get(index)
    }

    pub fn add(&mut self, id: String, sections: SectionStore) -> Outcome {
        if id.trim().is_empty() {
            return Rejection::Empty.into();
        }
        if self.contains(&id) {
            return Rejection::Duplicate(id).into();
        }
        self.weeks.push(Week::new(id, sections));
        Outcome::Applied
    }

    /// Removes the week, returning where it was and what it held.
    pub fn remove(&mut self, id: &str) -> Option<(usize, Week)> {
        let idx = self.position(id)?;
        Some((idx, self.weeks.remove(idx)))
    }

    /// Checks whether `old` could be renamed to `new` without changing anything.
    pub fn check_rename(&self, old: &str, new: &str) -> Outcome {
        if new.trim().is_empty() {
            return Rejection::Empty.into();
        }
        if new == old {
            return Rejection::NoChange.into();
        }
        if !self.contains(old) {
            return Rejection::NotFound(old.to_string()).into();
        }
        if self.contains(new) {
            return Rejection::Duplicate(new.to_string()).into();
        }
        Outcome::Applied
    }

    /// Relabels a week in place, keeping its position and sections.
    pub fn rename(&mut self, old: &str, new: String) -> Outcome {
        if let Outcome::Rejected(r) = self.check_rename(old, &new) {
            return Outcome::Rejected(r);
        }
        if let Some(week) = self.get_mut(old) {
            week.id = new;
        }
        Outcome::Applied
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Outcome {
        reconcile::reorder(&mut self.weeks, from, to)
    }
}
