use std::fmt::Display;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::models::{
    ApiKey, CreateApiKeyRequest, DeleteApiKeyResponse, ErrorResponse, RenameApiKeyRequest,
};
use crate::service::ApiKeyService;

pub type AppState = Arc<ApiKeyService>;

type HandlerError = (StatusCode, Json<ErrorResponse>);

const FETCH_FAILED: &str = "Failed to fetch API keys";
const CREATE_FAILED: &str = "Failed to create API key";
const UPDATE_FAILED: &str = "Failed to update API key";
const DELETE_FAILED: &str = "Failed to delete API key";

/// Key routes relative to their mount point.
pub fn key_routes() -> Router<AppState> {
    Router::new()
        .route("/keys", get(list_api_keys).post(create_api_key))
        .route("/keys/:id", patch(rename_api_key).delete(delete_api_key))
}

/// The full application: key routes under `/api` with request tracing.
pub fn app(service: ApiKeyService) -> Router {
    Router::new()
        .nest("/api", key_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

// Every failure, whatever its cause, becomes a 500 with a fixed message.
// Bodies are parsed as JSON regardless of their content type.
fn internal_error(context: &str, message: &'static str, error: impl Display) -> HandlerError {
    tracing::error!(error = %error, "{}", context);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}

async fn list_api_keys(State(service): State<AppState>) -> Result<Json<Vec<ApiKey>>, HandlerError> {
    service
        .list()
        .map(Json)
        .map_err(|e| internal_error("Error fetching API keys", FETCH_FAILED, e))
}

async fn create_api_key(
    State(service): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiKey>, HandlerError> {
    let payload: CreateApiKeyRequest = serde_json::from_slice(&body)
        .map_err(|e| internal_error("Error creating API key", CREATE_FAILED, e))?;

    service
        .create(&payload.name)
        .map(Json)
        .map_err(|e| internal_error("Error creating API key", CREATE_FAILED, e))
}

async fn rename_api_key(
    State(service): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiKey>, HandlerError> {
    let payload: RenameApiKeyRequest = serde_json::from_slice(&body)
        .map_err(|e| internal_error("Error updating API key", UPDATE_FAILED, e))?;

    service
        .rename(&id, &payload.name)
        .map(Json)
        .map_err(|e| internal_error("Error updating API key", UPDATE_FAILED, e))
}

async fn delete_api_key(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteApiKeyResponse>, HandlerError> {
    service
        .delete(&id)
        .map(|()| Json(DeleteApiKeyResponse { success: true }))
        .map_err(|e| internal_error("Error deleting API key", DELETE_FAILED, e))
}
