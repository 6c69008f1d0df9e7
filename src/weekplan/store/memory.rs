use super::SlotStore;
use crate::error::{PlannerError, Result};
use std::collections::HashMap;

/// In-memory slot storage for testing and embedding.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: HashMap<String, String>,
    simulate_write_error: bool,
    failing_slot: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write or remove fail.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Make writes and removes of `key` alone fail. `None` clears it.
    pub fn set_failing_slot(&mut self, key: Option<&str>) {
        self.failing_slot = key.map(String::from);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        if self.simulate_write_error || self.failing_slot.as_deref() == Some(key) {
            return Err(PlannerError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl SlotStore for InMemoryStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, payload: &str) -> Result<()> {
        self.check_writable(key)?;
        self.slots.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove_slot(&mut self, key: &str) -> Result<()> {
        self.check_writable(key)?;
        self.slots.remove(key);
        Ok(())
    }

    fn slot_keys(&self) -> Result<Vec<String>> {
        Ok(self.slots.keys().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, Section, SectionStore};
    use crate::store::bridge::week_slot_key;

    /// Builds an `InMemoryStore` with pre-populated week slots.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Stores `sections` (name, note contents) as the slot of `week_id`.
        pub fn with_week(mut self, week_id: &str, sections: &[(&str, &[&str])]) -> Self {
            let sections: Vec<Section> = sections
                .iter()
                .map(|(name, notes)| {
                    let mut section = Section::new(name.to_string());
                    section.notes = notes
                        .iter()
                        .enumerate()
                        .map(|(i, content)| {
                            Note::new(format!("{}-{}", name, i + 1), content.to_string())
                        })
                        .collect();
                    section
                })
                .collect();
            let store = SectionStore::try_from(sections).unwrap();
            let payload = serde_json::to_string(&store).unwrap();
            self.store
                .write_slot(&week_slot_key(week_id), &payload)
                .unwrap();
            self
        }

        /// Writes a raw payload, e.g. to simulate corrupt data.
        pub fn with_raw_slot(mut self, key: &str, payload: &str) -> Self {
            self.store.write_slot(key, payload).unwrap();
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_remove() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.read_slot("k").unwrap(), None);

        store.write_slot("k", "v1").unwrap();
        store.write_slot("k", "v2").unwrap();
        assert_eq!(store.read_slot("k").unwrap(), Some("v2".to_string()));
        assert_eq!(store.slot_keys().unwrap(), vec!["k".to_string()]);

        store.remove_slot("k").unwrap();
        store.remove_slot("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn simulated_write_error() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        assert!(store.write_slot("k", "v").is_err());
        assert!(store.remove_slot("k").is_err());
        assert_eq!(store.read_slot("k").unwrap(), None);
    }

    #[test]
    fn failing_slot_only_affects_that_key() {
        let mut store = InMemoryStore::new();
        store.set_failing_slot(Some("planner"));
        assert!(store.write_slot("planner", "{}").is_err());
        store.write_slot("notes_week1", "[]").unwrap();

        store.set_failing_slot(None);
        store.write_slot("planner", "{}").unwrap();
        assert_eq!(store.len(), 2);
    }
}
