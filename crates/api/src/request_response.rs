// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session request and response data transfer objects.

use enroll_core::{Record, SubmissionPhase};
use serde::{Deserialize, Serialize};

/// Request body for editing one field of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFieldRequest {
    /// The new raw value.
    pub value: String,
}

/// Response for a successful item append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemResponse {
    /// The index of the new item.
    pub index: usize,
}

/// Response for a submission toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// The phase after the toggle was applied.
    pub phase: PhaseView,
}

/// The submission phase as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhaseView {
    /// No submission in progress.
    Idle,
    /// The confirmation countdown is running.
    Countdown {
        /// Seconds remaining.
        remaining: u8,
    },
    /// The remote submit call is in flight.
    Submitting,
}

impl From<SubmissionPhase> for PhaseView {
    fn from(phase: SubmissionPhase) -> Self {
        match phase {
            SubmissionPhase::Idle => Self::Idle,
            SubmissionPhase::Countdown(remaining) => Self::Countdown { remaining },
            SubmissionPhase::Submitting => Self::Submitting,
        }
    }
}

/// One inline per-field annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// The field the issue belongs to.
    pub field: String,
    /// The stable error key.
    pub error: String,
    /// The user-facing message.
    pub message: String,
}

/// One item of the session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    /// The item's index (the addressing mechanism for edits/removal).
    pub index: usize,
    /// The raw country value.
    pub country: String,
    /// The raw username value.
    pub username: String,
    /// The raw birthday value.
    pub birthday: String,
    /// Whether the item is fully valid.
    pub valid: bool,
    /// Whether a username availability check is in flight.
    pub username_pending: bool,
    /// Inline annotations for the item's fields.
    pub issues: Vec<FieldIssue>,
}

impl ItemView {
    /// Builds the view of one record.
    #[must_use]
    pub fn from_record(index: usize, record: &Record) -> Self {
        let issues: Vec<FieldIssue> = record
            .field_issues()
            .into_iter()
            .map(|(field, error)| FieldIssue {
                field: field.as_str().to_string(),
                error: error.as_str().to_string(),
                message: error.to_string(),
            })
            .collect();

        Self {
            index,
            country: record.country().to_string(),
            username: record.username().to_string(),
            birthday: record.birthday().to_string(),
            valid: record.is_valid(),
            username_pending: record.is_username_pending(),
            issues,
        }
    }
}

/// The authoritative snapshot of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// The submission phase.
    pub phase: PhaseView,
    /// The number of items that are not fully valid.
    pub invalid_count: usize,
    /// Whether the collection currently accepts input.
    pub enabled: bool,
    /// The items in submission order.
    pub items: Vec<ItemView>,
}
