//! Axum handlers for the dashboard HTTP contract.

use crate::state::{Fault, Route, ServiceState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use axum::Router;
use dashboard_protocol::{ErrorBody, ItemId, NewLaunchItem, NoteDraft};
use serde_json::json;
use std::sync::Arc;

pub fn router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/launch-items", get(list_launch_items).post(create_launch_item))
        .route("/launch/id/:id", post(trigger_launch_item))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/:id", put(update_note).delete(delete_note))
        .with_state(state)
}

// GET /launch-items
async fn list_launch_items(State(state): State<Arc<ServiceState>>) -> Response {
    if let Some(resp) = admit(&state, Route::ListLaunchItems).await {
        return resp;
    }
    Json(state.launch_items()).into_response()
}

// POST /launch-items
async fn create_launch_item(
    State(state): State<Arc<ServiceState>>,
    body: Result<Json<NewLaunchItem>, JsonRejection>,
) -> Response {
    if let Some(resp) = admit(&state, Route::CreateLaunchItem).await {
        return resp;
    }
    let Json(item) = match body {
        Ok(b) => b,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.body_text()),
    };
    if item.name.trim().is_empty() || item.path.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name and path are required");
    }
    let created = state.insert_launch_item(item);
    tracing::info!(id = %created.id, name = %created.name, "launch item created");
    (StatusCode::CREATED, Json(created)).into_response()
}

// POST /launch/id/:id
async fn trigger_launch_item(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<String>,
) -> Response {
    if let Some(resp) = admit(&state, Route::TriggerLaunchItem).await {
        return resp;
    }
    let id = parse_id(&id);
    if !state.trigger(&id) {
        return error(StatusCode::NOT_FOUND, format!("launch item {id} not found"));
    }
    tracing::info!(%id, "launch requested");
    Json(json!({ "success": true })).into_response()
}

// GET /notes
async fn list_notes(State(state): State<Arc<ServiceState>>) -> Response {
    if let Some(resp) = admit(&state, Route::ListNotes).await {
        return resp;
    }
    Json(state.notes()).into_response()
}

// POST /notes
async fn create_note(
    State(state): State<Arc<ServiceState>>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Response {
    if let Some(resp) = admit(&state, Route::CreateNote).await {
        return resp;
    }
    let Json(draft) = match body {
        Ok(b) => b,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.body_text()),
    };
    if !draft.has_content() {
        return error(StatusCode::BAD_REQUEST, "content is required");
    }
    let created = state.insert_note(draft);
    tracing::info!(id = %created.id, "note created");
    (StatusCode::CREATED, Json(created)).into_response()
}

// PUT /notes/:id
async fn update_note(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<String>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Response {
    if let Some(resp) = admit(&state, Route::UpdateNote).await {
        return resp;
    }
    let Json(draft) = match body {
        Ok(b) => b,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.body_text()),
    };
    if !draft.has_content() {
        return error(StatusCode::BAD_REQUEST, "content is required");
    }
    let id = parse_id(&id);
    match state.update_note(&id, draft) {
        Some(note) => Json(note).into_response(),
        None => error(StatusCode::NOT_FOUND, format!("note {id} not found")),
    }
}

// DELETE /notes/:id
async fn delete_note(State(state): State<Arc<ServiceState>>, Path(id): Path<String>) -> Response {
    if let Some(resp) = admit(&state, Route::DeleteNote).await {
        return resp;
    }
    let id = parse_id(&id);
    if !state.remove_note(&id) {
        return error(StatusCode::NOT_FOUND, format!("note {id} not found"));
    }
    tracing::info!(%id, "note deleted");
    Json(json!({})).into_response()
}

/// Applies the configured delay, then answers with a queued fault if there is one.
async fn admit(state: &ServiceState, route: Route) -> Option<Response> {
    let admission = state.admit(route);
    if let Some(delay) = admission.delay {
        tokio::time::sleep(delay).await;
    }
    let fault = admission.fault?;
    tracing::debug!(?route, ?fault, "injecting fault");
    Some(fault_response(fault))
}

fn fault_response(fault: Fault) -> Response {
    match fault {
        Fault::Status { status, message } => {
            let status = status_code(status);
            match message {
                Some(m) => error(status, m),
                None => status.into_response(),
            }
        }
        Fault::RawBody { status, body } => (status_code(status), body).into_response(),
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

fn parse_id(raw: &str) -> ItemId {
    match raw.parse::<ItemId>() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}
