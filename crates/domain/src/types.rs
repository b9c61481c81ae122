// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The fixed set of countries an enrollment record may select.
///
/// ISO 3166-1 alpha-2 codes. Membership is checked by
/// [`crate::validate_country`]; any other non-empty value is rejected.
pub const AVAILABLE_COUNTRIES: &[&str] = &[
    "AT", "BE", "CH", "DE", "DK", "ES", "FR", "IT", "NL", "PL", "PT", "SE",
];

/// Identifies one of the three fields of an enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// The country selection.
    Country,
    /// The username, checked remotely for availability.
    Username,
    /// The birthday (ISO 8601 date).
    Birthday,
}

impl FieldName {
    /// Returns the string representation of the field name.
    ///
    /// This is used for API serialization and error reporting.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Username => "username",
            Self::Birthday => "birthday",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flattened enrollment record as it crosses the wire.
///
/// This is the submission payload item: the ordered list sent to the
/// remote submit endpoint is `Vec<UserRecord>`, with no per-item
/// wrapper around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The selected country code.
    pub country: String,
    /// The chosen username.
    pub username: String,
    /// The birthday as an ISO 8601 date string.
    pub birthday: String,
}
