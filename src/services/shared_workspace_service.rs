use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// A shared workspace as sent by the client. Only a few keys are interpreted.
pub type Workspace = Map<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SharedWorkspaceError {
    #[error("userEmail query parameter is required")]
    MissingUserEmail,
    #[error("workspace object with id is required")]
    MissingWorkspaceId,
    #[error("workspace object is required")]
    MissingWorkspace,
    #[error("Workspace not found")]
    NotFound,
    #[error("Only the workspace owner can unshare it")]
    NotOwner,
}

impl SharedWorkspaceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SharedWorkspaceError::MissingUserEmail
            | SharedWorkspaceError::MissingWorkspaceId
            | SharedWorkspaceError::MissingWorkspace => StatusCode::BAD_REQUEST,
            SharedWorkspaceError::NotFound => StatusCode::NOT_FOUND,
            SharedWorkspaceError::NotOwner => StatusCode::FORBIDDEN,
        }
    }
}

/// In-memory registry of workspaces users made visible to others.
/// Kept in share order; lost on restart.
#[derive(Debug, Default)]
pub struct SharedWorkspaceService {
    workspaces: RwLock<IndexMap<String, Workspace>>,
}

impl SharedWorkspaceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared workspaces owned by somebody other than `user_email`
    pub async fn list(&self, user_email: Option<&str>) -> Result<Vec<Workspace>, SharedWorkspaceError> {
        let user_email = required_email(user_email)?;
        let workspaces = self.workspaces.read().await;
        Ok(workspaces
            .values()
            .filter(|w| is_shared(w) && owner_of(w) != Some(user_email))
            .cloned()
            .collect())
    }

    /// Store a workspace under its id, replacing any earlier copy
    pub async fn share(&self, workspace: Option<Value>) -> Result<Workspace, SharedWorkspaceError> {
        let mut workspace = match workspace {
            Some(Value::Object(workspace)) => workspace,
            _ => return Err(SharedWorkspaceError::MissingWorkspaceId),
        };
        let id = workspace_id(&workspace).ok_or(SharedWorkspaceError::MissingWorkspaceId)?;
        workspace.insert("sharedAt".to_string(), Value::String(now()));

        info!(
            "Workspace {} shared by {}",
            id,
            owner_of(&workspace).unwrap_or("unknown owner")
        );
        self.workspaces.write().await.insert(id, workspace.clone());
        Ok(workspace)
    }

    /// Remove a workspace. Only its owner may do so.
    pub async fn unshare(&self, workspace_id: &str, user_email: Option<&str>) -> Result<(), SharedWorkspaceError> {
        let user_email = required_email(user_email)?;
        let mut workspaces = self.workspaces.write().await;
        let workspace = workspaces
            .get(workspace_id)
            .ok_or(SharedWorkspaceError::NotFound)?;
        if owner_of(workspace) != Some(user_email) {
            return Err(SharedWorkspaceError::NotOwner);
        }

        workspaces.shift_remove(workspace_id);
        info!("Workspace {} unshared by {}", workspace_id, user_email);
        Ok(())
    }

    /// Merge new fields into a shared workspace. Id, owner and share time are kept.
    pub async fn update(&self, workspace_id: &str, workspace: Option<Value>) -> Result<Workspace, SharedWorkspaceError> {
        let changes = match workspace {
            Some(Value::Object(changes)) => changes,
            _ => return Err(SharedWorkspaceError::MissingWorkspace),
        };
        let mut workspaces = self.workspaces.write().await;
        let existing = workspaces
            .get_mut(workspace_id)
            .ok_or(SharedWorkspaceError::NotFound)?;

        let owner = existing.get("ownerId").cloned();
        let shared_at = existing.get("sharedAt").cloned();
        existing.extend(changes);
        existing.insert("id".to_string(), Value::String(workspace_id.to_string()));
        restore(existing, "ownerId", owner);
        restore(existing, "sharedAt", shared_at);
        existing.insert("updatedAt".to_string(), Value::String(now()));

        Ok(existing.clone())
    }

    pub async fn count(&self) -> usize {
        self.workspaces.read().await.len()
    }
}

fn required_email(user_email: Option<&str>) -> Result<&str, SharedWorkspaceError> {
    match user_email {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(SharedWorkspaceError::MissingUserEmail),
    }
}

fn workspace_id(workspace: &Workspace) -> Option<String> {
    match workspace.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        _ => None,
    }
}

fn owner_of(workspace: &Workspace) -> Option<&str> {
    workspace.get("ownerId").and_then(Value::as_str)
}

fn is_shared(workspace: &Workspace) -> bool {
    workspace.get("isShared").and_then(Value::as_bool) == Some(true)
}

fn restore(workspace: &mut Workspace, key: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            workspace.insert(key.to_string(), value);
        }
        None => {
            workspace.remove(key);
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
