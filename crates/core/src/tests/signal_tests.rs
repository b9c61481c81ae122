// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::signal::InvalidCountSignal;
use std::sync::{Arc, Mutex};

fn recording_sink(signal: &mut InvalidCountSignal) -> Arc<Mutex<Vec<usize>>> {
    let observed: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    signal.subscribe(Box::new(move |count| {
        sink.lock().expect("sink lock").push(count);
    }));
    observed
}

#[test]
fn test_emit_reaches_every_subscriber() {
    let mut signal = InvalidCountSignal::new();
    let first = recording_sink(&mut signal);
    let second = recording_sink(&mut signal);

    signal.emit(3);

    assert_eq!(*first.lock().expect("lock"), vec![3]);
    assert_eq!(*second.lock().expect("lock"), vec![3]);
}

#[test]
fn test_unsubscribe_tears_down_exactly_one() {
    let mut signal = InvalidCountSignal::new();
    let kept = recording_sink(&mut signal);
    let observed: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let id = signal.subscribe(Box::new(move |count| {
        sink.lock().expect("sink lock").push(count);
    }));

    assert!(signal.unsubscribe(id));
    signal.emit(7);

    assert_eq!(*kept.lock().expect("lock"), vec![7]);
    assert!(observed.lock().expect("lock").is_empty());
    assert_eq!(signal.subscriber_count(), 1);
}

#[test]
fn test_unsubscribe_twice_is_a_no_op() {
    let mut signal = InvalidCountSignal::new();
    let id = signal.subscribe(Box::new(|_| {}));

    assert!(signal.unsubscribe(id));
    assert!(!signal.unsubscribe(id));
}

#[test]
fn test_emit_with_no_subscribers_is_harmless() {
    let signal = InvalidCountSignal::new();
    signal.emit(0);
}
