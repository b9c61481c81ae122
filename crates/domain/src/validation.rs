// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Synchronous field validators.
//!
//! All validators treat an empty value as `Valid`: an untouched field is
//! incomplete, not wrong. Requiredness is a separately composed check
//! applied at submission gating via [`missing_required_fields`].

use crate::error::FieldError;
use crate::types::{AVAILABLE_COUNTRIES, FieldName};
use crate::validity::ValidityState;
use time::Date;

/// Validates a country value against the enumerated country set.
///
/// # Arguments
///
/// * `value` - The raw country input
///
/// # Returns
///
/// * `Valid` for an empty value or a member of [`AVAILABLE_COUNTRIES`]
/// * `Invalid(UnknownCountry)` for any other value
#[must_use]
pub fn validate_country(value: &str) -> ValidityState {
    if value.is_empty() || AVAILABLE_COUNTRIES.contains(&value) {
        ValidityState::Valid
    } else {
        ValidityState::Invalid(FieldError::UnknownCountry)
    }
}

/// Validates that a birthday is not in the future.
///
/// # Arguments
///
/// * `value` - The raw birthday input (ISO 8601 date)
/// * `today` - The current date at evaluation time
///
/// # Returns
///
/// * `Valid` for an empty value or a date on or before `today`
/// * `Invalid(FutureBirthday)` for a date strictly after `today`
///
/// A value that does not parse as a date is not rejected here; the date
/// picker at the boundary only produces ISO dates, and requiredness is
/// enforced separately at gating time.
#[must_use]
pub fn validate_birthday(value: &str, today: Date) -> ValidityState {
    if value.is_empty() {
        return ValidityState::Valid;
    }

    match Date::parse(value, &time::format_description::well_known::Iso8601::DEFAULT) {
        Ok(date) if date > today => ValidityState::Invalid(FieldError::FutureBirthday),
        Ok(_) | Err(_) => ValidityState::Valid,
    }
}

/// Returns the fields that are required but still empty.
///
/// All three fields of a record are required. This check is applied at
/// submission gating, not while the user is still typing.
#[must_use]
pub fn missing_required_fields(country: &str, username: &str, birthday: &str) -> Vec<FieldName> {
    let mut missing: Vec<FieldName> = Vec::new();

    if country.is_empty() {
        missing.push(FieldName::Country);
    }
    if username.is_empty() {
        missing.push(FieldName::Username);
    }
    if birthday.is_empty() {
        missing.push(FieldName::Birthday);
    }

    missing
}
