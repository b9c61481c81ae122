// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ordered, mutable collection of enrollment records.
//!
//! Insertion order is significant: it is the order of the submission
//! payload. Indices are the only external addressing mechanism. The
//! aggregate invalid count is recomputed after every mutation and
//! republished through the invalid-count signal when it changes.

use crate::error::CoreError;
use crate::record::{Record, RecordId};
use crate::signal::{InvalidCountSignal, SubscriptionId};
use enroll_domain::{FieldName, UserRecord, ValidityState, validate_birthday, validate_country};
use time::{Date, OffsetDateTime};

/// Directive returned from a username edit, telling the async layer
/// what to do with the in-flight availability check for that record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameProbe {
    /// Start a fresh debounced availability check for `value`. Any check
    /// already in flight for this record must be abandoned first, and a
    /// completing check may only be applied with this `seq`.
    Start {
        /// The record the check belongs to.
        record_id: RecordId,
        /// The generation token the result must carry to be applied.
        seq: u64,
        /// The username to check.
        value: String,
    },
    /// The username became empty: abandon any in-flight check. The field
    /// is already `Valid` again (requiredness applies at gating).
    Clear {
        /// The record whose check is abandoned.
        record_id: RecordId,
    },
}

/// The ordered set of enrollment records composing the whole form.
pub struct Collection {
    records: Vec<Record>,
    enabled: bool,
    invalid_count: usize,
    signal: InvalidCountSignal,
    next_record_id: u64,
}

impl Collection {
    /// Creates a collection seeded with one fresh, all-empty record.
    #[must_use]
    pub fn new() -> Self {
        let mut collection: Self = Self {
            records: Vec::new(),
            enabled: true,
            invalid_count: 0,
            signal: InvalidCountSignal::new(),
            next_record_id: 0,
        };
        let seed: Record = collection.allocate_record();
        collection.records.push(seed);
        collection.refresh_invalid_count();
        collection
    }

    fn allocate_record(&mut self) -> Record {
        let id: RecordId = RecordId::new(self.next_record_id);
        self.next_record_id += 1;
        Record::new(id)
    }

    /// Appends a new all-empty record and returns its index.
    ///
    /// The new record contributes to the invalid count until its
    /// required fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InputDisabled` while the collection is frozen.
    pub fn append(&mut self) -> Result<usize, CoreError> {
        self.ensure_enabled()?;

        let record: Record = self.allocate_record();
        self.records.push(record);
        self.refresh_invalid_count();
        Ok(self.records.len() - 1)
    }

    /// Removes the record at `index` and returns its id so that any
    /// asynchronous wiring for it can be torn down.
    ///
    /// Removing the last remaining record is permitted; an empty
    /// collection is legal transient state for which `is_form_valid`
    /// is false.
    ///
    /// # Errors
    ///
    /// * `CoreError::InputDisabled` while the collection is frozen
    /// * `CoreError::IndexOutOfRange` if `index` does not exist (this is
    ///   a caller bug and fails loudly)
    pub fn remove_at(&mut self, index: usize) -> Result<RecordId, CoreError> {
        self.ensure_enabled()?;

        if index >= self.records.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let removed: Record = self.records.remove(index);
        self.refresh_invalid_count();
        Ok(removed.id())
    }

    /// Applies an edit to one field of the record at `index`.
    ///
    /// Country and birthday are validated synchronously. A username edit
    /// marks the field `Pending` and returns a [`UsernameProbe`]
    /// directive for the async layer (or `Clear` when the new value is
    /// empty, which resolves to `Valid` immediately). Validity and the
    /// aggregate invalid count are recomputed atomically with the edit.
    ///
    /// # Errors
    ///
    /// * `CoreError::InputDisabled` while the collection is frozen
    /// * `CoreError::IndexOutOfRange` if `index` does not exist
    pub fn set_field(
        &mut self,
        index: usize,
        field: FieldName,
        value: &str,
    ) -> Result<Option<UsernameProbe>, CoreError> {
        self.ensure_enabled()?;

        let len: usize = self.records.len();
        let Some(record) = self.records.get_mut(index) else {
            return Err(CoreError::IndexOutOfRange { index, len });
        };

        let probe: Option<UsernameProbe> = match field {
            FieldName::Country => {
                record.country = value.to_string();
                record.validity.country = validate_country(value);
                None
            }
            FieldName::Birthday => {
                record.birthday = value.to_string();
                record.validity.birthday = validate_birthday(value, today());
                None
            }
            FieldName::Username => {
                record.username = value.to_string();
                record.check_seq += 1;
                if value.is_empty() {
                    record.validity.username = ValidityState::Valid;
                    Some(UsernameProbe::Clear {
                        record_id: record.id(),
                    })
                } else {
                    record.validity.username = ValidityState::Pending;
                    Some(UsernameProbe::Start {
                        record_id: record.id(),
                        seq: record.check_seq,
                        value: value.to_string(),
                    })
                }
            }
        };

        self.refresh_invalid_count();
        Ok(probe)
    }

    /// Routes an asynchronous username-check result back to its record.
    ///
    /// The result is applied only if the record still exists and `seq`
    /// is the record's current generation token: a stale result (an edit
    /// happened after the check was issued, or the record was removed)
    /// is discarded so it can never overwrite a newer value.
    ///
    /// Returns true if the result was applied.
    pub fn apply_username_check(
        &mut self,
        record_id: RecordId,
        seq: u64,
        state: ValidityState,
    ) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == record_id) else {
            return false;
        };
        if record.check_seq != seq {
            return false;
        }

        record.validity.username = state;
        self.refresh_invalid_count();
        true
    }

    /// Freezes or unfreezes the collection.
    ///
    /// Used by the submission machine during countdown and submission.
    /// Does not alter any validity state, and is idempotent.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the collection accepts mutation.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Atomically empties the collection and seeds one fresh record.
    ///
    /// Used after a successful submission. Not gated on the enabled
    /// flag: this is a machine-facing operation, not a user edit.
    pub fn clear_and_reseed(&mut self) {
        self.records.clear();
        let record: Record = self.allocate_record();
        self.records.push(record);
        self.refresh_invalid_count();
    }

    /// Returns true iff every record is valid and there is at least one.
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(Record::is_valid)
    }

    /// The number of records that are not fully valid.
    #[must_use]
    pub const fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in insertion (= submission payload) order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record at `index`, if it exists.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Flattens the collection into the ordered wire payload.
    #[must_use]
    pub fn payload(&self) -> Vec<UserRecord> {
        self.records.iter().map(Record::to_user_record).collect()
    }

    /// Registers a callback invoked whenever the invalid count changes.
    pub fn subscribe_invalid_count(
        &mut self,
        callback: Box<dyn Fn(usize) + Send>,
    ) -> SubscriptionId {
        self.signal.subscribe(callback)
    }

    /// Tears down an invalid-count subscription.
    pub fn unsubscribe_invalid_count(&mut self, id: SubscriptionId) -> bool {
        self.signal.unsubscribe(id)
    }

    const fn ensure_enabled(&self) -> Result<(), CoreError> {
        if self.enabled {
            Ok(())
        } else {
            Err(CoreError::InputDisabled)
        }
    }

    fn refresh_invalid_count(&mut self) {
        let count: usize = self.records.iter().filter(|r| !r.is_valid()).count();
        if count != self.invalid_count {
            self.invalid_count = count;
            self.signal.emit(count);
        }
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("records", &self.records)
            .field("enabled", &self.enabled)
            .field("invalid_count", &self.invalid_count)
            .finish_non_exhaustive()
    }
}

/// The current date at evaluation time, used for birthday validation.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
