//! # Weekplan Architecture
//!
//! Weekplan is a **UI-agnostic weekly planner core**. A plan is a list of
//! weeks; each week holds ordered sections (usually days), and each section
//! holds ordered notes that can be edited, completed and dragged around.
//! The `weekplan` binary is one client of this library, not the point of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders the week, sets up logging      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns Session + Bridge, trims raw input                   │
//! │  - Rolls the session back when storage fails                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Applies model operations, decides what to persist        │
//! │  - Returns CmdResult (outcome, navigation, messages)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, reconcile.rs, ids.rs)                     │
//! │  - Pure containers: validate first, mutate second           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Bridge: JSON slots <-> SectionStore, never fails on load │
//! │  - SlotStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Outcomes versus errors
//!
//! Asking for something impossible (an empty name, a duplicate, a note that
//! does not exist, a drop outside a list) is not an error. It yields
//! `Ok(CmdResult)` whose outcome is [`error::Outcome::Rejected`], and nothing
//! changes. `Err(PlannerError)` only comes from storage writes and setup.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process and only emits diagnostics through the `log` facade. The binary
//! decides where log records go (see [`logging`]).
//!
//! ## Testing Strategy
//!
//! 1. **Model and commands**: thorough unit tests against `InMemoryStore`.
//! 2. **API**: dispatch and rollback only.
//! 3. **Storage**: `FileStore` against a temp dir.
//! 4. **Binary**: `tests/` drives the real executable with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Week, section and note commands
//! - [`session`]: Runtime state (weeks, selection, minimized sections)
//! - [`model`]: Notes, sections, weeks and their stores
//! - [`reconcile`]: Drag-and-drop moves over ordered containers
//! - [`ids`]: Label normalization and note id generation
//! - [`store`]: Slot storage and the persistence bridge
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`logging`]: Logger bootstrap for the binary
//! - [`error`]: Error, rejection and outcome types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod init;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod store;
