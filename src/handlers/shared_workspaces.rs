use crate::{
    models::{
        ErrorResponse, SharedWorkspaceListResponse, SharedWorkspaceRequest, SharedWorkspaceResponse,
        UnshareWorkspaceResponse, UserEmailQuery,
    },
    services::shared_workspace_service::SharedWorkspaceError,
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(action: &str, e: SharedWorkspaceError) -> ApiError {
    warn!("Failed to {}: {}", action, e);
    ErrorResponse::reply(e.status_code(), e.to_string())
}

/// An unreadable body counts as a request without a workspace
fn workspace_from(action: &str, payload: Result<Json<SharedWorkspaceRequest>, JsonRejection>) -> Option<Value> {
    match payload {
        Ok(Json(request)) => request.workspace,
        Err(e) => {
            warn!("Unreadable body on {}: {}", action, e.body_text());
            None
        }
    }
}

/// List workspaces shared by other users
pub async fn list_shared_workspaces(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserEmailQuery>,
) -> Result<(StatusCode, Json<SharedWorkspaceListResponse>), ApiError> {
    let workspaces = state
        .shared_workspaces
        .list(query.user_email.as_deref())
        .await
        .map_err(|e| reject("fetch shared workspaces", e))?;

    Ok((
        StatusCode::OK,
        Json(SharedWorkspaceListResponse {
            workspaces: workspaces.into_iter().map(Value::Object).collect(),
        }),
    ))
}

/// Make a workspace visible to other users
pub async fn share_workspace(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SharedWorkspaceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SharedWorkspaceResponse>), ApiError> {
    let workspace = state
        .shared_workspaces
        .share(workspace_from("share workspace", payload))
        .await
        .map_err(|e| reject("share workspace", e))?;

    Ok((
        StatusCode::OK,
        Json(SharedWorkspaceResponse {
            success: true,
            message: "Workspace shared successfully".to_string(),
            workspace: Value::Object(workspace),
        }),
    ))
}

/// Stop sharing a workspace
pub async fn unshare_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
    Query(query): Query<UserEmailQuery>,
) -> Result<(StatusCode, Json<UnshareWorkspaceResponse>), ApiError> {
    state
        .shared_workspaces
        .unshare(&workspace_id, query.user_email.as_deref())
        .await
        .map_err(|e| reject("unshare workspace", e))?;

    Ok((
        StatusCode::OK,
        Json(UnshareWorkspaceResponse {
            success: true,
            message: "Workspace unshared successfully".to_string(),
        }),
    ))
}

/// Sync changes into a shared workspace
pub async fn update_shared_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
    payload: Result<Json<SharedWorkspaceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SharedWorkspaceResponse>), ApiError> {
    let workspace = state
        .shared_workspaces
        .update(&workspace_id, workspace_from("update shared workspace", payload))
        .await
        .map_err(|e| reject("update shared workspace", e))?;

    Ok((
        StatusCode::OK,
        Json(SharedWorkspaceResponse {
            success: true,
            message: "Workspace updated successfully".to_string(),
            workspace: Value::Object(workspace),
        }),
    ))
}
