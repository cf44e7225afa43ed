//! `checkgen serve` command: HTTP boundary for checklist generation.
//!
//! One route per checklist flow: `POST /api/checklists/{variant}/generate`
//! takes `{ "prompt": string }` and answers with the validated,
//! normalized checklist document in its wire shape. Any failure leaves
//! no partial state anywhere; raw provider text never reaches a
//! response body.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use checkgen_core::checklist::wire;
use checkgen_core::provider::Provider;
use checkgen_core::{ChecklistError, GenerateError, ValidateError, Variant, generate_checklist};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ChecklistError> for AppError {
    fn from(err: ChecklistError) -> Self {
        match &err {
            ChecklistError::Generate(GenerateError::EmptyPrompt) => {
                Self::bad_request("a prompt is required")
            }
            // The generic message is deliberate: malformed model output is
            // untrusted and only goes to the diagnostic log.
            ChecklistError::Validate(ValidateError::MalformedOutput(_)) => {
                Self::internal("the model returned an invalid format, please try again")
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// State and request types
// ---------------------------------------------------------------------------

/// Shared router state. `provider` is `None` when no credentials were
/// configured at startup; requests then fail with 500 rather than the
/// server refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn Provider>>,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    prompt: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/checklists/{variant}/generate", post(generate_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("checkgen serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("checkgen serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "checkgen",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn generate_handler(
    Path(variant): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let variant: Variant = variant
        .parse()
        .map_err(|_| AppError::not_found(format!("unknown checklist variant {variant:?}")))?;

    if request.prompt.trim().is_empty() {
        return Err(AppError::bad_request("a prompt is required"));
    }

    let provider = state
        .provider
        .as_deref()
        .ok_or_else(|| AppError::internal(GenerateError::MissingCredentials.to_string()))?;

    let checklist = generate_checklist(provider, variant, &request.prompt).await?;
    Ok(Json(wire::to_wire_value(&checklist)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
