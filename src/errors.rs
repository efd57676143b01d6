//! Error handling for the election service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type alias for the election service
pub type Result<T> = std::result::Result<T, Error>;

/// Business-rule refusals raised by the voting rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionKind {
    ElectionClosed,
    RollNumberRequired,
    CandidateNotFound,
    AlreadyVoted,
}

impl RejectionKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::ElectionClosed => "ELECTION_CLOSED",
            Self::RollNumberRequired => "ROLL_NUMBER_REQUIRED",
            Self::CandidateNotFound => "CANDIDATE_NOT_FOUND",
            Self::AlreadyVoted => "ALREADY_VOTED",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Main error type for the election service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bad input shape or a value outside a closed enumeration
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// Unknown identifier on an admin operation
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Vote refused by the rule engine
    #[error("Vote rejected ({kind}): {message}")]
    Rejected {
        kind: RejectionKind,
        message: String,
    },

    /// Durable storage failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Filesystem errors from the file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a new rejection
    pub fn rejected(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable error kind for transport layers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Rejected { kind, .. } => kind.code(),
            Self::Storage { .. } | Self::Io(_) => "STORAGE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// The rejection kind, if this is a rule-engine refusal
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            Self::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! storage_error {
    ($msg:expr) => {
        $crate::Error::storage($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::storage(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! rejection {
    ($kind:expr, $msg:expr) => {
        $crate::Error::rejected($kind, $msg)
    };
    ($kind:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::Error::rejected($kind, format!($fmt, $($arg)*))
    };
}
