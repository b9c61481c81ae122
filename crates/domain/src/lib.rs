// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;
mod validity;

#[cfg(test)]
mod tests;

pub use error::FieldError;
pub use types::{AVAILABLE_COUNTRIES, FieldName, UserRecord};
pub use validation::{missing_required_fields, validate_birthday, validate_country};
pub use validity::{RecordValidity, ValidityState};
