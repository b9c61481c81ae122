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
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use enroll_api::{
    AddItemResponse, ApiError, EditFieldRequest, FormSession, SessionView, StubClient,
    ToggleResponse,
};
use enroll_domain::FieldName;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Enroll Server - HTTP surface for the enrollment form engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Usernames the stub remote service reports as taken.
    /// May be passed multiple times; defaults to a small builtin set.
    #[arg(long = "taken")]
    taken: Vec<String>,
}

/// Application state shared across handlers.
///
/// The session handle is internally reference-counted, so cloning the
/// state per request shares the one live session.
#[derive(Clone)]
struct AppState {
    /// The single live form session.
    session: FormSession<StubClient>,
}

/// Error payload returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// A human-readable description of the error.
    error: String,
}

/// Boundary errors mapped onto HTTP status codes.
#[derive(Debug)]
enum HttpError {
    /// An application-service error.
    Api(ApiError),
    /// The path referenced an unknown field name.
    UnknownField(String),
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            Self::Api(err) => {
                let status: StatusCode = match &err {
                    ApiError::ItemOutOfRange { .. } => StatusCode::NOT_FOUND,
                    ApiError::InputFrozen => StatusCode::CONFLICT,
                    ApiError::NotReady { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                warn!(error = %err, "request rejected");
                (status, err.to_string())
            }
            Self::UnknownField(name) => {
                warn!(field = %name, "unknown field name in request path");
                (
                    StatusCode::BAD_REQUEST,
                    format!("Unknown field name: '{name}'"),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn parse_field(name: &str) -> Option<FieldName> {
    match name {
        "country" => Some(FieldName::Country),
        "username" => Some(FieldName::Username),
        "birthday" => Some(FieldName::Birthday),
        _ => None,
    }
}

/// Returns the authoritative session snapshot.
async fn handle_get_session(AxumState(state): AxumState<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}

/// Appends a new empty item.
async fn handle_add_item(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<AddItemResponse>, HttpError> {
    let index: usize = state.session.add_record().await?;
    Ok(Json(AddItemResponse { index }))
}

/// Removes the item at the given index.
async fn handle_remove_item(
    AxumState(state): AxumState<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, HttpError> {
    state.session.remove_record(index).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies an edit to one field of one item.
async fn handle_edit_field(
    AxumState(state): AxumState<AppState>,
    Path((index, field)): Path<(usize, String)>,
    Json(request): Json<EditFieldRequest>,
) -> Result<StatusCode, HttpError> {
    let Some(field) = parse_field(&field) else {
        return Err(HttpError::UnknownField(field));
    };
    state.session.edit_field(index, field, &request.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The start/cancel submission toggle.
async fn handle_toggle_submission(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ToggleResponse>, HttpError> {
    let phase = state.session.toggle_submit().await?;
    Ok(Json(ToggleResponse {
        phase: phase.into(),
    }))
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/session", get(handle_get_session))
        .route("/session/items", post(handle_add_item))
        .route("/session/items/{index}", delete(handle_remove_item))
        .route("/session/items/{index}/{field}", put(handle_edit_field))
        .route("/session/submission", post(handle_toggle_submission))
        .route("/live", get(live::live_events_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Enroll Server");

    let client: StubClient = if args.taken.is_empty() {
        StubClient::default()
    } else {
        info!(taken = args.taken.len(), "using custom taken-username set");
        StubClient::new(args.taken)
    };

    let app_state: AppState = AppState {
        session: FormSession::new(client),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
