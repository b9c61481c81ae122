// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live session streaming support for thin UIs.
//!
//! This module forwards the session's event stream over WebSocket
//! connections. Events are informational only and never authoritative:
//! countdown ticks and invalid-count changes let a UI follow along, but
//! clients must read authoritative state via the HTTP session view.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use enroll_api::SessionEvent;
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Live session event types, as they appear on the WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// The aggregate invalid count changed.
    InvalidCount {
        /// The new number of not-fully-valid items.
        count: usize,
    },
    /// The countdown advanced.
    CountdownTick {
        /// Seconds remaining; 0 means the submit call is being issued.
        remaining: u8,
    },
    /// A confirmation countdown began.
    SubmissionStarted,
    /// The countdown was cancelled.
    SubmissionCancelled,
    /// The remote submit succeeded and the form was reseeded.
    SubmitSucceeded,
    /// The remote submit failed; input is accepted again.
    SubmitFailed {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl From<SessionEvent> for LiveEvent {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::InvalidCount { count } => Self::InvalidCount { count },
            SessionEvent::CountdownTick { remaining } => Self::CountdownTick { remaining },
            SessionEvent::SubmissionStarted => Self::SubmissionStarted,
            SessionEvent::SubmissionCancelled => Self::SubmissionCancelled,
            SessionEvent::SubmitSucceeded => Self::SubmitSucceeded,
            SessionEvent::SubmitFailed { message } => Self::SubmitFailed { message },
        }
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> Response {
    let events: broadcast::Receiver<SessionEvent> = state.session.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, events))
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection confirmation, then streams all session events
/// until the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, mut events: broadcast::Receiver<SessionEvent>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();

    // Send connection confirmation
    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            let live: LiveEvent = event.into();
            match serde_json::to_string(&live) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // No commands are accepted over WebSocket
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_events_map_onto_live_events() {
        let tick: LiveEvent = SessionEvent::CountdownTick { remaining: 3 }.into();
        assert!(matches!(tick, LiveEvent::CountdownTick { remaining: 3 }));

        let failed: LiveEvent = SessionEvent::SubmitFailed {
            message: String::from("boom"),
        }
        .into();
        match failed {
            LiveEvent::SubmitFailed { message } => assert_eq!(message, "boom"),
            other => panic!("Expected SubmitFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let json = serde_json::to_string(&LiveEvent::CountdownTick { remaining: 4 })
            .expect("Failed to serialize");
        assert_eq!(json, r#"{"type":"countdown_tick","remaining":4}"#);

        let deserialized: LiveEvent =
            serde_json::from_str(r#"{"type":"submission_started"}"#).expect("Failed to deserialize");
        assert!(matches!(deserialized, LiveEvent::SubmissionStarted));
    }
}
