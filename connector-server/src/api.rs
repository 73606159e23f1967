//! Connector HTTP API.
//!
//! Exposes the connector's entry points to the reporting platform:
//! - `GET /api/config` — connection settings to render
//! - `GET /api/schema` — full field catalog
//! - `POST /api/data` — fetch and flatten the SOV table
//! - `GET /api/admin` — whether the caller gets admin diagnostics

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use mindshare::connector::{
    ConfigDescriptor, Connector, DataRequest, DataResponse, SchemaResponse,
};
use mindshare::UserError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the connector API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub connector: Connector,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub is_admin_user: bool,
}

// ---------------------------------------------------------------------------
// HTTP handlers
// ---------------------------------------------------------------------------

async fn get_config(State(state): State<Arc<ApiState>>) -> Json<ConfigDescriptor> {
    Json(state.connector.get_config())
}

async fn get_schema(State(state): State<Arc<ApiState>>) -> Json<SchemaResponse> {
    Json(state.connector.get_schema())
}

async fn post_data(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<DataRequest>,
) -> Result<Json<DataResponse>, AppError> {
    let fields = req.fields.len();
    let response = state.connector.get_data(req).await?;
    info!(fields, rows = response.rows.len(), "Data request served");
    Ok(Json(response))
}

async fn get_admin(State(state): State<Arc<ApiState>>) -> Json<AdminResponse> {
    Json(AdminResponse {
        is_admin_user: state.connector.is_admin_user(),
    })
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Upstream failures are reported as 502 with the user-facing and debug texts.
pub struct AppError(UserError);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    debug_text: String,
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        warn!(error = %err, "Data request aborted");
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: err.text,
                debug_text: err.debug_text,
            }),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/config", get(get_config))
        .route("/api/schema", get(get_schema))
        .route("/api/data", post(post_data))
        .route("/api/admin", get(get_admin))
        .with_state(Arc::new(state))
}
