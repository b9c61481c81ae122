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
    clippy::all
)]

mod client;
mod error;
mod events;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use client::{ClientError, RosterClient, StubClient, UsernameCheck};
pub use error::ApiError;
pub use events::{EVENT_BUFFER_SIZE, SessionEvent};
pub use request_response::{
    AddItemResponse, EditFieldRequest, FieldIssue, ItemView, PhaseView, SessionView,
    ToggleResponse,
};
pub use session::{DEBOUNCE, FormSession};
