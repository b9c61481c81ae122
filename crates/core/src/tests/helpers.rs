// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::{Collection, UsernameProbe};
use enroll_domain::{FieldName, ValidityState};
use std::sync::{Arc, Mutex};

/// Fills the record at `index` with valid values, resolving the
/// username availability check as available.
pub fn fill_valid(collection: &mut Collection, index: usize) {
    fill_valid_with(collection, index, "DE", "free", "1990-01-01");
}

/// Fills the record at `index` with the given values, resolving the
/// username availability check as available.
pub fn fill_valid_with(
    collection: &mut Collection,
    index: usize,
    country: &str,
    username: &str,
    birthday: &str,
) {
    collection
        .set_field(index, FieldName::Country, country)
        .expect("set country");
    let probe = collection
        .set_field(index, FieldName::Username, username)
        .expect("set username");
    let Some(UsernameProbe::Start { record_id, seq, .. }) = probe else {
        panic!("Expected a username probe directive, got {probe:?}");
    };
    assert!(collection.apply_username_check(record_id, seq, ValidityState::Valid));
    collection
        .set_field(index, FieldName::Birthday, birthday)
        .expect("set birthday");
}

/// Subscribes a recording callback to the collection's invalid-count
/// signal and returns the shared log of observed counts.
pub fn record_invalid_counts(collection: &mut Collection) -> Arc<Mutex<Vec<usize>>> {
    let observed: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink: Arc<Mutex<Vec<usize>>> = Arc::clone(&observed);
    collection.subscribe_invalid_count(Box::new(move |count| {
        sink.lock().expect("observer lock").push(count);
    }));
    observed
}

/// Recounts invalid records directly, independent of the cached count.
pub fn recount_invalid(collection: &Collection) -> usize {
    collection.records().iter().filter(|r| !r.is_valid()).count()
}
