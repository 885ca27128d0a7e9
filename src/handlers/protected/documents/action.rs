use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::AppState;

/// DELETE|PUT /api/documents/:id - Delete or replace the content of an owned document
///
/// Every other verb reaches this handler too, so that authentication and the
/// ownership check run before a 405 is returned.
///
/// PUT Input:
/// ```json
/// { "content": "string" }
/// ```
///
/// Output:
/// ```json
/// { "success": true }                        // DELETE
/// { "success": true, "document": { ... } }   // PUT
/// { "error": "<message>" }                  // any failure, message varies by branch
/// ```
pub async fn action(
    State(state): State<AppState>,
    method: Method,
    id: Option<Path<String>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let id = id.map(|Path(id)| id);

    match process(&state, &method, id, &headers, body).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn process(
    state: &AppState,
    method: &Method,
    id: Option<String>,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let id = id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Document ID is required"))?;

    let user = auth::authenticate(headers, state.verifier.as_ref()).await?;

    // Ownership check: a document under another owner is indistinguishable from a missing one
    let document = state.documents.get_document(&id, &user.id).await?;
    if document.is_none() {
        debug!("Document {} not found for user {}", id, user.id);
        return Err(ApiError::not_found("Document not found"));
    }

    match *method {
        Method::DELETE => delete(state, &id, &user).await,
        Method::PUT => update(state, &id, &user, body).await,
        _ => Err(ApiError::method_not_allowed("Method not allowed")),
    }
}

async fn delete(state: &AppState, id: &str, user: &AuthUser) -> Result<Response, ApiError> {
    if !state.documents.delete_document(id, &user.id).await? {
        tracing::error!("Delete of document {} for user {} matched nothing", id, user.id);
        return Err(ApiError::internal_error("Failed to delete document"));
    }

    debug!("Deleted document {} for user {}", id, user.id);
    Ok(Json(json!({ "success": true })).into_response())
}

async fn update(
    state: &AppState,
    id: &str,
    user: &AuthUser,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    // Read only here so an oversized body cannot preempt the id and auth checks
    let body = body?;
    let payload: Value = serde_json::from_slice(&body)?;
    let content = content_field(&payload)
        .ok_or_else(|| ApiError::bad_request("Content is required"))?;

    let updated = state
        .documents
        .update_document(id, &user.id, content)
        .await?
        .ok_or_else(|| {
            tracing::error!("Update of document {} for user {} matched nothing", id, user.id);
            ApiError::internal_error("Failed to update document")
        })?;

    debug!("Updated document {} for user {}", id, user.id);
    Ok(Json(json!({ "success": true, "document": updated })).into_response())
}

/// `content` must be a non-empty JSON string; anything else is treated as absent
fn content_field(payload: &Value) -> Option<&str> {
    payload
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
}
