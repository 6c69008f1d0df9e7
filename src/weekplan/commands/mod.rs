//! # Command Layer
//!
//! Planner logic, one module per level of the hierarchy:
//!
//! - [`weeks`]: add, delete, rename, reorder and select weeks.
//! - [`sections`]: add, delete, rename, reorder and minimize sections of the
//!   active week.
//! - [`notes`]: add, delete, edit, toggle and move notes of the active week.
//! - [`doctor`]: recover week slots missing from the planner index.
//!
//! Each command applies a pure container operation from [`crate::model`],
//! then persists whatever it touched through the [`Bridge`]: the active
//! week's slot after section and note changes, the planner index after week
//! changes, selection changes and minimize toggles.
//!
//! Commands return a [`CmdResult`]. A rejected request is still `Ok`: the
//! result carries the [`Outcome`] and a warning message for the UI. `Err` is
//! reserved for storage failures.
//!
//! [`Bridge`]: crate::store::bridge::Bridge

use crate::error::{Outcome, Rejection};

pub mod doctor;
mod helpers;
pub mod notes;
pub mod sections;
pub mod weeks;

pub(crate) use helpers::transact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdResult {
    pub outcome: Outcome,
    /// Week the router should show next (after add, rename, or deleting the
    /// selected week).
    pub navigate_to: Option<String>,
    /// Id generated by the command, e.g. for a new note.
    pub created_id: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    /// A result without messages.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            navigate_to: None,
            created_id: None,
            messages: Vec::new(),
        }
    }

    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Applied,
            navigate_to: None,
            created_id: None,
            messages: vec![CmdMessage::success(message)],
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        let message = CmdMessage::warning(capitalize(&rejection.to_string()));
        Self {
            outcome: Outcome::Rejected(rejection),
            navigate_to: None,
            created_id: None,
            messages: vec![message],
        }
    }

    /// Builds a result from a container outcome, using `message` on success.
    pub fn from_outcome(outcome: Outcome, message: impl FnOnce() -> String) -> Self {
        match outcome {
            Outcome::Applied => Self::applied(message()),
            Outcome::Rejected(r) => Self::rejected(r),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.outcome.rejection()
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_navigation(mut self, week_id: impl Into<String>) -> Self {
        self.navigate_to = Some(week_id.into());
        self
    }

    pub fn with_created_id(mut self, id: impl Into<String>) -> Self {
        self.created_id = Some(id.into());
        self
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_result_carries_warning() {
        let result = CmdResult::rejected(Rejection::Empty);
        assert!(!result.is_applied());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, "Name cannot be empty");
    }

    #[test]
    fn from_outcome_only_builds_message_on_success() {
        let result = CmdResult::from_outcome(Outcome::Applied, || "done".to_string());
        assert!(result.is_applied());
        assert_eq!(result.messages[0].content, "done");

        let result = CmdResult::from_outcome(Rejection::NoChange.into(), || {
            panic!("message built for a rejection")
        });
        assert_eq!(result.rejection(), Some(&Rejection::NoChange));
    }
}
