// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FieldError;
use crate::types::FieldName;
use crate::validation::{missing_required_fields, validate_birthday, validate_country};
use crate::validity::ValidityState;
use time::macros::date;

#[test]
fn test_empty_country_is_valid() {
    assert_eq!(validate_country(""), ValidityState::Valid);
}

#[test]
fn test_known_country_is_valid() {
    assert_eq!(validate_country("DE"), ValidityState::Valid);
    assert_eq!(validate_country("FR"), ValidityState::Valid);
}

#[test]
fn test_unknown_country_is_invalid() {
    assert_eq!(
        validate_country("XX"),
        ValidityState::Invalid(FieldError::UnknownCountry)
    );
}

#[test]
fn test_country_codes_are_case_sensitive() {
    // The country set holds upper-case alpha-2 codes only.
    assert_eq!(
        validate_country("de"),
        ValidityState::Invalid(FieldError::UnknownCountry)
    );
}

#[test]
fn test_empty_birthday_is_valid() {
    assert_eq!(
        validate_birthday("", date!(2026 - 08 - 07)),
        ValidityState::Valid
    );
}

#[test]
fn test_future_birthday_is_invalid() {
    assert_eq!(
        validate_birthday("2999-01-01", date!(2026 - 08 - 07)),
        ValidityState::Invalid(FieldError::FutureBirthday)
    );
}

#[test]
fn test_past_birthday_is_valid() {
    assert_eq!(
        validate_birthday("1990-01-01", date!(2026 - 08 - 07)),
        ValidityState::Valid
    );
}

#[test]
fn test_birthday_on_the_current_date_is_valid() {
    assert_eq!(
        validate_birthday("2026-08-07", date!(2026 - 08 - 07)),
        ValidityState::Valid
    );
}

#[test]
fn test_birthday_one_day_ahead_is_invalid() {
    assert_eq!(
        validate_birthday("2026-08-08", date!(2026 - 08 - 07)),
        ValidityState::Invalid(FieldError::FutureBirthday)
    );
}

#[test]
fn test_unparseable_birthday_is_not_rejected() {
    // The date picker at the boundary only produces ISO dates; requiredness
    // is enforced separately, so a junk value passes the format validator.
    assert_eq!(
        validate_birthday("not-a-date", date!(2026 - 08 - 07)),
        ValidityState::Valid
    );
}

#[test]
fn test_missing_required_fields_all_empty() {
    let missing = missing_required_fields("", "", "");
    assert_eq!(
        missing,
        vec![FieldName::Country, FieldName::Username, FieldName::Birthday]
    );
}

#[test]
fn test_missing_required_fields_partial() {
    let missing = missing_required_fields("DE", "", "1990-01-01");
    assert_eq!(missing, vec![FieldName::Username]);
}

#[test]
fn test_missing_required_fields_none() {
    let missing = missing_required_fields("DE", "free", "1990-01-01");
    assert!(missing.is_empty());
}
