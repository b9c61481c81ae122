// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The remote collaborator boundary.
//!
//! The username-availability check and the form submit are opaque
//! request/response calls behind [`RosterClient`]; transports implement
//! the trait. [`StubClient`] is the in-process implementation used for
//! local development and as the server default.

use enroll_domain::UserRecord;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the remote collaborator.
///
/// How these are recovered depends on the call: a failed username check
/// fails open (the user is never blocked by an unreachable check), a
/// failed submit returns the session to idle with the records retained.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote service could not be reached.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote service answered but rejected the request.
    #[error("remote service rejected the request: {0}")]
    Rejected(String),
}

/// The username-availability answer, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameCheck {
    /// Whether the username is still available.
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

/// The two remote calls the form engine depends on.
///
/// Implementations must be cheap to call concurrently; the engine
/// guarantees at most one outstanding username check per record and at
/// most one submit per completed countdown.
pub trait RosterClient: Send + Sync + 'static {
    /// Checks whether `username` is still available.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the remote service cannot be reached
    /// or rejects the request. The engine recovers this silently and
    /// fails open.
    fn check_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<UsernameCheck, ClientError>> + Send;

    /// Submits the full ordered list of enrollment records.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the remote service cannot be reached
    /// or rejects the submission.
    fn submit_form(
        &self,
        records: &[UserRecord],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// In-process stand-in for the remote service.
///
/// Holds a fixed set of taken usernames (compared case-insensitively)
/// and accepts every submission.
#[derive(Debug, Clone)]
pub struct StubClient {
    taken: Vec<String>,
}

impl StubClient {
    /// Creates a stub that reports the given usernames as taken.
    #[must_use]
    pub const fn new(taken: Vec<String>) -> Self {
        Self { taken }
    }
}

impl Default for StubClient {
    fn default() -> Self {
        Self::new(vec![
            String::from("admin"),
            String::from("root"),
            String::from("taken"),
        ])
    }
}

impl RosterClient for StubClient {
    async fn check_username(&self, username: &str) -> Result<UsernameCheck, ClientError> {
        let is_available: bool = !self
            .taken
            .iter()
            .any(|taken| taken.eq_ignore_ascii_case(username));
        debug!(username, is_available, "stub username check");
        Ok(UsernameCheck { is_available })
    }

    async fn submit_form(&self, records: &[UserRecord]) -> Result<(), ClientError> {
        info!(records = records.len(), "stub submit accepted");
        Ok(())
    }
}
