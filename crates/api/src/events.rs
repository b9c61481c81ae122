// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session event stream.
//!
//! Events are informational only and never authoritative: they report
//! what changed so a UI can follow along (countdown ticks, the
//! aggregate invalid count), but clients must read authoritative state
//! via the session view.

/// Maximum number of events buffered per subscriber.
/// If a subscriber cannot keep up, older events are dropped.
pub const EVENT_BUFFER_SIZE: usize = 100;

/// One session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The aggregate invalid count changed.
    InvalidCount {
        /// The new number of not-fully-valid items.
        count: usize,
    },
    /// The countdown advanced (emitted with the starting value as well).
    CountdownTick {
        /// Seconds remaining; 0 means the submit call is being issued.
        remaining: u8,
    },
    /// A confirmation countdown began; input is frozen.
    SubmissionStarted,
    /// The countdown was cancelled; input is accepted again.
    SubmissionCancelled,
    /// The remote submit succeeded; the collection was reseeded.
    SubmitSucceeded,
    /// The remote submit failed; the records were retained and input is
    /// accepted again.
    SubmitFailed {
        /// A human-readable description of the failure.
        message: String,
    },
}
