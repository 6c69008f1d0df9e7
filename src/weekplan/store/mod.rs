//! # Storage Layer
//!
//! The planner persists through a plain key-value interface, [`SlotStore`]:
//! string keys, string payloads, get/set/remove. Everything that knows what a
//! payload means lives one level up in [`bridge::Bridge`].
//!
//! ## Slots
//!
//! ```text
//! planner          # week order, selection, minimized sections (JSON object)
//! notes_{weekId}   # one week's sections and notes (JSON array)
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per slot in a data directory, written
//!   atomically.
//! - [`memory::InMemoryStore`]: a `HashMap`, for tests and embedding.

use crate::error::Result;

pub mod bridge;
pub mod fs;
pub mod memory;

/// Durable key-value storage for planner slots.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` when the slot does not exist.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a slot.
    fn write_slot(&mut self, key: &str, payload: &str) -> Result<()>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove_slot(&mut self, key: &str) -> Result<()>;

    /// Keys of every slot currently stored, in no particular order.
    fn slot_keys(&self) -> Result<Vec<String>>;
}
