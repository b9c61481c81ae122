// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by the collection and phase machinery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A record index does not exist. This indicates a caller bug, not
    /// user input, and fails loudly.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of records in the collection.
        len: usize,
    },
    /// The collection is frozen (countdown or submission in progress)
    /// and does not accept mutation.
    InputDisabled,
    /// A submission phase transition is not permitted.
    InvalidPhaseTransition {
        /// The current phase.
        from: String,
        /// The requested phase.
        to: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Record index {index} is out of range for a collection of {len} records"
                )
            }
            Self::InputDisabled => {
                write!(f, "The collection is frozen and does not accept mutation")
            }
            Self::InvalidPhaseTransition { from, to } => {
                write!(f, "Cannot transition from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
