use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Relay and process statistics
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Current diagnostics", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

/// List workspaces shared by other users
#[utoipa::path(
    get,
    path = "/api/shared-workspaces",
    params(UserEmailQuery),
    responses(
        (status = 200, description = "Workspaces shared by others", body = SharedWorkspaceListResponse),
        (status = 400, description = "userEmail missing", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn list_shared_workspaces_doc() {}

/// Share a workspace
#[utoipa::path(
    post,
    path = "/api/shared-workspaces",
    request_body = SharedWorkspaceRequest,
    responses(
        (status = 200, description = "Workspace shared", body = SharedWorkspaceResponse),
        (status = 400, description = "Workspace or id missing", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn share_workspace_doc() {}

/// Update a shared workspace
#[utoipa::path(
    put,
    path = "/api/shared-workspaces/{workspace_id}",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    request_body = SharedWorkspaceRequest,
    responses(
        (status = 200, description = "Workspace updated", body = SharedWorkspaceResponse),
        (status = 400, description = "Workspace missing", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn update_shared_workspace_doc() {}

/// Unshare a workspace
#[utoipa::path(
    delete,
    path = "/api/shared-workspaces/{workspace_id}",
    params(
        ("workspace_id" = String, Path, description = "Workspace id"),
        UserEmailQuery
    ),
    responses(
        (status = 200, description = "Workspace unshared", body = UnshareWorkspaceResponse),
        (status = 400, description = "userEmail missing", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn unshare_workspace_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        diagnostics_doc,
        list_shared_workspaces_doc,
        share_workspace_doc,
        update_shared_workspace_doc,
        unshare_workspace_doc,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            DiagnosticsResponse,
            ErrorResponse,
            SharedWorkspaceRequest,
            SharedWorkspaceListResponse,
            SharedWorkspaceResponse,
            UnshareWorkspaceResponse,
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
