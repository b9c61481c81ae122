// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The long-lived form session service.
//!
//! `FormSession` owns the collection, the submission phase, the
//! countdown ticker and the per-record username probes behind a single
//! async mutex: every mutation (user call, timer tick, probe
//! completion) acquires it, so validity recomputation is atomic per
//! event and ordering is lock-acquisition order.

use crate::client::RosterClient;
use crate::error::ApiError;
use crate::events::{EVENT_BUFFER_SIZE, SessionEvent};
use crate::request_response::{ItemView, SessionView};
use enroll_core::{
    COUNTDOWN_START, Collection, RecordId, SubmissionPhase, UsernameProbe,
};
use enroll_domain::{FieldError, FieldName, UserRecord, ValidityState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Quiet period a username edit must survive before the remote
/// availability check is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Interval between countdown ticks.
const TICK: Duration = Duration::from_secs(1);

/// One in-flight (or still debouncing) username availability check.
///
/// The stored `seq` is the generation token the check was issued with;
/// a probe whose token is stale must never apply its result.
struct Probe {
    seq: u64,
    task: JoinHandle<()>,
}

impl Probe {
    fn abandon(self) {
        self.task.abort();
    }
}

/// Owned handle of the running countdown ticker, scoped to the
/// `Countdown` phase. Destroyed on every exit transition; cancelling
/// guarantees no further tick fires.
struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    fn cancel(self) {
        self.task.abort();
    }
}

struct SessionState {
    collection: Collection,
    phase: SubmissionPhase,
    countdown: Option<CountdownHandle>,
    probes: HashMap<RecordId, Probe>,
}

struct Shared<C> {
    client: C,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl<C> Shared<C> {
    fn emit(&self, event: SessionEvent) {
        // Zero receivers is fine; events are informational only.
        let _ = self.events.send(event);
    }
}

/// The form session: one dynamic collection of enrollment records plus
/// the submission state machine driving the cancellable timed commit.
pub struct FormSession<C: RosterClient> {
    shared: Arc<Shared<C>>,
}

impl<C: RosterClient> Clone for FormSession<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: RosterClient> FormSession<C> {
    /// Creates a session with a freshly seeded collection.
    #[must_use]
    pub fn new(client: C) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);

        let mut collection: Collection = Collection::new();
        let count_events: broadcast::Sender<SessionEvent> = events.clone();
        collection.subscribe_invalid_count(Box::new(move |count| {
            let _ = count_events.send(SessionEvent::InvalidCount { count });
        }));

        Self {
            shared: Arc::new(Shared {
                client,
                state: Mutex::new(SessionState {
                    collection,
                    phase: SubmissionPhase::Idle,
                    countdown: None,
                    probes: HashMap::new(),
                }),
                events,
            }),
        }
    }

    /// Appends a new empty record and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InputFrozen` while a submission is in
    /// progress.
    pub async fn add_record(&self) -> Result<usize, ApiError> {
        let mut state = self.shared.state.lock().await;
        let index: usize = state.collection.append()?;
        debug!(index, "record appended");
        Ok(index)
    }

    /// Removes the record at `index`, tearing down any in-flight
    /// username check for it.
    ///
    /// # Errors
    ///
    /// * `ApiError::InputFrozen` while a submission is in progress
    /// * `ApiError::ItemOutOfRange` if the index does not exist
    pub async fn remove_record(&self, index: usize) -> Result<(), ApiError> {
        let mut state = self.shared.state.lock().await;
        let record_id: RecordId = state.collection.remove_at(index)?;
        if let Some(probe) = state.probes.remove(&record_id) {
            probe.abandon();
        }
        debug!(index, %record_id, "record removed");
        Ok(())
    }

    /// Applies an edit to one field of the record at `index`.
    ///
    /// Country and birthday resolve synchronously. A username edit
    /// abandons any check in flight for that record and starts a fresh
    /// debounce window; only after [`DEBOUNCE`] without a newer edit is
    /// the remote check issued (at most one outstanding check per
    /// record, last value wins).
    ///
    /// # Errors
    ///
    /// * `ApiError::InputFrozen` while a submission is in progress
    /// * `ApiError::ItemOutOfRange` if the index does not exist
    pub async fn edit_field(
        &self,
        index: usize,
        field: FieldName,
        value: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.shared.state.lock().await;
        match state.collection.set_field(index, field, value)? {
            None => {}
            Some(UsernameProbe::Clear { record_id }) => {
                if let Some(probe) = state.probes.remove(&record_id) {
                    probe.abandon();
                }
            }
            Some(UsernameProbe::Start {
                record_id,
                seq,
                value,
            }) => {
                if let Some(previous) = state.probes.remove(&record_id) {
                    previous.abandon();
                }
                let task: JoinHandle<()> = spawn_probe(&self.shared, record_id, seq, value);
                state.probes.insert(record_id, Probe { seq, task });
            }
        }
        Ok(())
    }

    /// The start/cancel toggle.
    ///
    /// * `Idle` → starts the confirmation countdown (guarded on the
    ///   whole form being valid) and freezes input.
    /// * `Countdown(_)` → cancels: the ticker is stopped
    ///   deterministically, input is accepted again.
    /// * `Submitting` → no-op; the commit can no longer be cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotReady` if starting while the form still
    /// has invalid items.
    pub async fn toggle_submit(&self) -> Result<SubmissionPhase, ApiError> {
        let mut state = self.shared.state.lock().await;
        match state.phase {
            SubmissionPhase::Idle => {
                if !state.collection.is_form_valid() {
                    return Err(ApiError::NotReady {
                        invalid_count: state.collection.invalid_count(),
                    });
                }

                let next: SubmissionPhase = SubmissionPhase::Countdown(COUNTDOWN_START);
                state.phase.validate_transition(next)?;
                state.collection.set_enabled(false);
                state.phase = next;
                state.countdown = Some(spawn_countdown(&self.shared));
                info!("submission countdown started");
                self.shared.emit(SessionEvent::SubmissionStarted);
                self.shared.emit(SessionEvent::CountdownTick {
                    remaining: COUNTDOWN_START,
                });
                Ok(next)
            }
            SubmissionPhase::Countdown(remaining) => {
                state.phase.validate_transition(SubmissionPhase::Idle)?;
                if let Some(handle) = state.countdown.take() {
                    handle.cancel();
                }
                state.phase = SubmissionPhase::Idle;
                state.collection.set_enabled(true);
                info!(remaining, "submission countdown cancelled");
                self.shared.emit(SessionEvent::SubmissionCancelled);
                Ok(SubmissionPhase::Idle)
            }
            SubmissionPhase::Submitting => {
                debug!("toggle ignored while submitting");
                Ok(SubmissionPhase::Submitting)
            }
        }
    }

    /// The current submission phase.
    pub async fn phase(&self) -> SubmissionPhase {
        self.shared.state.lock().await.phase
    }

    /// The authoritative snapshot of the whole session.
    pub async fn view(&self) -> SessionView {
        let state = self.shared.state.lock().await;
        SessionView {
            phase: state.phase.into(),
            invalid_count: state.collection.invalid_count(),
            enabled: state.collection.is_enabled(),
            items: state
                .collection
                .records()
                .iter()
                .enumerate()
                .map(|(index, record)| ItemView::from_record(index, record))
                .collect(),
        }
    }

    /// Subscribes to the session event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }
}

/// Spawns the debounced username availability check for one record.
fn spawn_probe<C: RosterClient>(
    shared: &Arc<Shared<C>>,
    record_id: RecordId,
    seq: u64,
    value: String,
) -> JoinHandle<()> {
    let shared: Arc<Shared<C>> = Arc::clone(shared);
    tokio::spawn(async move {
        tokio::time::sleep(DEBOUNCE).await;

        debug!(username = %value, "issuing username availability check");
        let outcome: ValidityState = match shared.client.check_username(&value).await {
            Ok(check) if check.is_available => ValidityState::Valid,
            Ok(_) => ValidityState::Invalid(FieldError::UsernameTaken),
            Err(err) => {
                // Fail open: an unreachable check must not block the user.
                debug!(error = %err, "username check failed; treating as available");
                ValidityState::Valid
            }
        };

        let mut state = shared.state.lock().await;
        if !state.collection.apply_username_check(record_id, seq, outcome) {
            debug!(%record_id, seq, "stale username check discarded");
        }
        if state
            .probes
            .get(&record_id)
            .is_some_and(|probe| probe.seq == seq)
        {
            state.probes.remove(&record_id);
        }
    })
}

/// Spawns the 1 Hz countdown ticker.
///
/// Every tick re-checks the phase under the lock before acting, so a
/// tick racing a cancellation finds `Idle` and stops without mutating.
fn spawn_countdown<C: RosterClient>(shared: &Arc<Shared<C>>) -> CountdownHandle {
    let shared: Arc<Shared<C>> = Arc::clone(shared);
    let task: JoinHandle<()> = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
        loop {
            ticker.tick().await;
            let mut state = shared.state.lock().await;
            let SubmissionPhase::Countdown(remaining) = state.phase else {
                return;
            };

            if remaining > 1 {
                state.phase = SubmissionPhase::Countdown(remaining - 1);
                shared.emit(SessionEvent::CountdownTick {
                    remaining: remaining - 1,
                });
            } else {
                state.phase = SubmissionPhase::Submitting;
                // The ticker consumed itself; dropping the handle
                // detaches the task without aborting it.
                state.countdown = None;
                shared.emit(SessionEvent::CountdownTick { remaining: 0 });
                let payload: Vec<UserRecord> = state.collection.payload();
                drop(state);
                submit(&shared, payload).await;
                return;
            }
        }
    });
    CountdownHandle { task }
}

/// Issues the remote submit call, exactly once per completed countdown,
/// and settles the session back to `Idle` on either outcome.
async fn submit<C: RosterClient>(shared: &Arc<Shared<C>>, payload: Vec<UserRecord>) {
    info!(records = payload.len(), "countdown complete; submitting form");
    let result = shared.client.submit_form(&payload).await;

    let mut state = shared.state.lock().await;
    match result {
        Ok(()) => {
            state.collection.clear_and_reseed();
            state.collection.set_enabled(true);
            state.phase = SubmissionPhase::Idle;
            info!("submission accepted; collection reseeded");
            shared.emit(SessionEvent::SubmitSucceeded);
        }
        Err(err) => {
            // The machine must never stall in Submitting: return to
            // idle with the records retained so the user can retry.
            error!(error = %err, "remote submit failed; returning to idle");
            state.collection.set_enabled(true);
            state.phase = SubmissionPhase::Idle;
            shared.emit(SessionEvent::SubmitFailed {
                message: err.to_string(),
            });
        }
    }
}
