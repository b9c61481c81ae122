// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the application-service layer.

use enroll_core::CoreError;

/// Errors surfaced at the session boundary.
///
/// These are distinct from core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The referenced item does not exist.
    ItemOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of items in the session.
        len: usize,
    },
    /// Input is frozen while a submission is in progress.
    InputFrozen,
    /// Submission cannot start while the form has invalid items.
    NotReady {
        /// The number of items that are not fully valid.
        invalid_count: usize,
    },
    /// An internal invariant was violated.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemOutOfRange { index, len } => {
                write!(f, "Item {index} does not exist ({len} items)")
            }
            Self::InputFrozen => {
                write!(f, "Input is frozen while a submission is in progress")
            }
            Self::NotReady { invalid_count } => {
                write!(
                    f,
                    "Cannot start submission: {invalid_count} items are not valid"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly across the boundary.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IndexOutOfRange { index, len } => Self::ItemOutOfRange { index, len },
            CoreError::InputDisabled => Self::InputFrozen,
            CoreError::InvalidPhaseTransition { from, to } => Self::Internal {
                message: format!("invalid phase transition from {from} to {to}"),
            },
        }
    }
}
