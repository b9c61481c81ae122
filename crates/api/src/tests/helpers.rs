// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::client::{ClientError, RosterClient, UsernameCheck};
use crate::session::{DEBOUNCE, FormSession};
use enroll_domain::{FieldName, UserRecord};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct MockLog {
    checks: Vec<String>,
    submissions: Vec<Vec<UserRecord>>,
}

/// Recording stand-in for the remote service.
///
/// Records every availability check and every submission; behavior is
/// configured at construction (taken usernames, simulated failures, an
/// optional gate that holds the submit call open until released).
#[derive(Clone, Default)]
pub struct MockClient {
    log: Arc<Mutex<MockLog>>,
    taken: Vec<String>,
    fail_checks: bool,
    fail_submit: bool,
    submit_gate: Option<Arc<Notify>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taken(taken: &[&str]) -> Self {
        Self {
            taken: taken.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Every availability check fails with a transport error.
    pub fn failing_checks() -> Self {
        Self {
            fail_checks: true,
            ..Self::default()
        }
    }

    /// Every submit is rejected by the remote service.
    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Self::default()
        }
    }

    /// The submit call blocks until the returned gate is notified.
    pub fn gated_submit() -> (Self, Arc<Notify>) {
        let gate: Arc<Notify> = Arc::new(Notify::new());
        let client: Self = Self {
            submit_gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (client, gate)
    }

    pub fn checks(&self) -> Vec<String> {
        self.log.lock().expect("mock log lock").checks.clone()
    }

    pub fn submissions(&self) -> Vec<Vec<UserRecord>> {
        self.log.lock().expect("mock log lock").submissions.clone()
    }
}

impl RosterClient for MockClient {
    async fn check_username(&self, username: &str) -> Result<UsernameCheck, ClientError> {
        self.log
            .lock()
            .expect("mock log lock")
            .checks
            .push(username.to_string());

        if self.fail_checks {
            return Err(ClientError::Transport(String::from("connection refused")));
        }

        Ok(UsernameCheck {
            is_available: !self.taken.iter().any(|t| t == username),
        })
    }

    async fn submit_form(&self, records: &[UserRecord]) -> Result<(), ClientError> {
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }

        self.log
            .lock()
            .expect("mock log lock")
            .submissions
            .push(records.to_vec());

        if self.fail_submit {
            return Err(ClientError::Rejected(String::from("validation failed")));
        }

        Ok(())
    }
}

/// Lets spawned probe/ticker tasks run to completion at the current
/// (paused) instant.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Fills the record at `index` with valid values and lets the username
/// availability check settle.
pub async fn fill_valid(session: &FormSession<MockClient>, index: usize) {
    fill_valid_with(session, index, "DE", "free", "1990-01-01").await;
}

/// Fills the record at `index` with the given values and lets the
/// username availability check settle.
pub async fn fill_valid_with(
    session: &FormSession<MockClient>,
    index: usize,
    country: &str,
    username: &str,
    birthday: &str,
) {
    session
        .edit_field(index, FieldName::Country, country)
        .await
        .expect("set country");
    session
        .edit_field(index, FieldName::Username, username)
        .await
        .expect("set username");
    session
        .edit_field(index, FieldName::Birthday, birthday)
        .await
        .expect("set birthday");

    // Let the probe task register its debounce timer at the current
    // instant before jumping the paused clock past it.
    settle().await;
    tokio::time::advance(DEBOUNCE).await;
    settle().await;
}
