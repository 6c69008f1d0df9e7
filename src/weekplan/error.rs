use thiserror::Error;

/// Failures that escape the planner core.
///
/// Only storage writes and environment setup produce these. Loading a slot
/// never fails, and user mistakes are reported as a [`Rejection`] instead.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Why an operation left the state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("name cannot be empty")]
    Empty,

    #[error("\"{0}\" already exists")]
    Duplicate(String),

    #[error("nothing to change")]
    NoChange,

    #[error("\"{0}\" not found")]
    NotFound(String),

    #[error("position {index} is out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("no week is selected")]
    NoActiveWeek,

    #[error("move cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Empty or duplicate identifier, or a request that changes nothing.
    Validation,
    /// The referenced week, section, note or position does not exist.
    LookupMiss,
    /// A drag that ended without a destination.
    Cancelled,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::Empty | Rejection::Duplicate(_) | Rejection::NoChange => {
                RejectionKind::Validation
            }
            Rejection::NotFound(_) | Rejection::OutOfRange { .. } | Rejection::NoActiveWeek => {
                RejectionKind::LookupMiss
            }
            Rejection::Cancelled => RejectionKind::Cancelled,
        }
    }
}

/// Result of a pure container operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(r) => Some(r),
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}
