// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-field validity tracking.

use crate::error::FieldError;
use crate::types::FieldName;

/// The validity of a single field.
///
/// `Pending` occurs only for the username field while a remote
/// availability check is in flight; country and birthday are always
/// resolved synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityState {
    /// The field passed validation (or has not yet been filled in).
    #[default]
    Valid,
    /// A remote check for this field is in flight.
    Pending,
    /// The field failed validation.
    Invalid(FieldError),
}

impl ValidityState {
    /// Returns true if the field is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns true if a remote check is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the validation error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<FieldError> {
        match self {
            Self::Invalid(err) => Some(*err),
            Self::Valid | Self::Pending => None,
        }
    }
}

/// The combined per-field validity of one enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordValidity {
    /// Validity of the country field.
    pub country: ValidityState,
    /// Validity of the username field.
    pub username: ValidityState,
    /// Validity of the birthday field.
    pub birthday: ValidityState,
}

impl RecordValidity {
    /// Returns true iff all three fields are `Valid`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.country.is_valid() && self.username.is_valid() && self.birthday.is_valid()
    }

    /// Returns the validity of the named field.
    #[must_use]
    pub const fn field(&self, field: FieldName) -> ValidityState {
        match field {
            FieldName::Country => self.country,
            FieldName::Username => self.username,
            FieldName::Birthday => self.birthday,
        }
    }

    /// Replaces the validity of the named field.
    pub const fn set_field(&mut self, field: FieldName, state: ValidityState) {
        match field {
            FieldName::Country => self.country = state,
            FieldName::Username => self.username = state,
            FieldName::Birthday => self.birthday = state,
        }
    }
}
