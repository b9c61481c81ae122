// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use enroll_domain::{
    FieldError, FieldName, RecordValidity, UserRecord, ValidityState, missing_required_fields,
};

/// Internal identity of a record within a collection.
///
/// Indices are the only external addressing mechanism; this id exists so
/// that asynchronous username-check results can be routed back to the
/// record that requested them (and discarded once it is removed),
/// independent of index shifts caused by removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u64);

impl RecordId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record-{}", self.0)
    }
}

/// One enrollment record: the three raw field values plus their
/// per-field validity.
///
/// A record is **valid** iff all three validity states are `Valid` and
/// all three values are non-empty. Requiredness folds into record-level
/// validity so that a freshly appended record counts as invalid until
/// the user fills it in, while the field validators keep treating empty
/// input as not-yet-erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    pub(crate) country: String,
    pub(crate) username: String,
    pub(crate) birthday: String,
    pub(crate) validity: RecordValidity,
    /// Generation token for the username availability check. Bumped on
    /// every username edit; a completing check whose token is stale is
    /// discarded (last-value-wins).
    pub(crate) check_seq: u64,
}

impl Record {
    pub(crate) fn new(id: RecordId) -> Self {
        Self {
            id,
            country: String::new(),
            username: String::new(),
            birthday: String::new(),
            validity: RecordValidity::default(),
            check_seq: 0,
        }
    }

    /// The record's internal identity.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// The raw country value.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The raw username value.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The raw birthday value.
    #[must_use]
    pub fn birthday(&self) -> &str {
        &self.birthday
    }

    /// The per-field validity of this record.
    #[must_use]
    pub const fn validity(&self) -> &RecordValidity {
        &self.validity
    }

    /// Returns the raw value of the named field.
    #[must_use]
    pub fn field_value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Country => &self.country,
            FieldName::Username => &self.username,
            FieldName::Birthday => &self.birthday,
        }
    }

    /// Returns true iff every field is `Valid` and non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
            && missing_required_fields(&self.country, &self.username, &self.birthday).is_empty()
    }

    /// Returns true while a username availability check is in flight.
    #[must_use]
    pub const fn is_username_pending(&self) -> bool {
        self.validity.username.is_pending()
    }

    /// The per-field issues to surface inline next to each field.
    ///
    /// Combines the validators' errors with the requiredness check, so
    /// an empty required field is annotated as `Required` while a filled
    /// but rejected field carries its format/availability error.
    #[must_use]
    pub fn field_issues(&self) -> Vec<(FieldName, FieldError)> {
        let mut issues: Vec<(FieldName, FieldError)> = Vec::new();

        for field in [FieldName::Country, FieldName::Username, FieldName::Birthday] {
            if self.field_value(field).is_empty() {
                issues.push((field, FieldError::Required));
            } else if let ValidityState::Invalid(error) = self.validity.field(field) {
                issues.push((field, error));
            }
        }

        issues
    }

    /// Flattens this record into its wire representation.
    #[must_use]
    pub fn to_user_record(&self) -> UserRecord {
        UserRecord {
            country: self.country.clone(),
            username: self.username.clone(),
            birthday: self.birthday.clone(),
        }
    }
}
