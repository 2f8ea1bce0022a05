use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string carrying the caller's email
#[derive(Serialize, Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserEmailQuery {
    pub user_email: Option<String>,
}

/// Request body for sharing or updating a workspace
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SharedWorkspaceRequest {
    /// Opaque workspace object; `id`, `ownerId` and `isShared` are interpreted
    pub workspace: Option<serde_json::value::Value>,
}

/// Response for listing shared workspaces
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SharedWorkspaceListResponse {
    pub workspaces: Vec<serde_json::value::Value>,
}

/// Response returned after sharing or updating a workspace
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SharedWorkspaceResponse {
    pub success: bool,
    pub message: String,
    pub workspace: serde_json::value::Value,
}

/// Response returned after unsharing a workspace
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UnshareWorkspaceResponse {
    pub success: bool,
    pub message: String,
}
