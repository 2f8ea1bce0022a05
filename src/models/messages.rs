use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{lenient, PresenceRecord, UserInfo};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinWorkspaceMessage {
    #[serde(deserialize_with = "lenient::string")]
    pub workspace_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user: UserInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CursorMoveMessage {
    #[serde(deserialize_with = "lenient::string")]
    pub workspace_id: String,
    pub x: Value,
    pub y: Value,
    pub page: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GridUpdateMessage {
    #[serde(deserialize_with = "lenient::string")]
    pub workspace_id: String,
    pub page: Value,
    pub update_type: Value,
    pub data: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PingMessage {}

/// Frames a client sends, as `{"event": ..., "data": ...}`
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ReceivedMessage {
    JoinWorkspace(JoinWorkspaceMessage),
    CursorMove(CursorMoveMessage),
    GridUpdate(GridUpdateMessage),
    Ping(Option<PingMessage>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserJoinedMessage {
    pub user: PresenceRecord,
    pub users: Vec<PresenceRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftMessage {
    pub user_id: String,
    pub user: PresenceRecord,
    pub users: Vec<PresenceRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CursorUpdateMessage {
    pub user_id: String,
    pub user: PresenceRecord,
    pub x: Value,
    pub y: Value,
    pub page: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridChangeMessage {
    pub user_id: String,
    pub page: Value,
    pub update_type: Value,
    pub data: Value,
    /// Server time in epoch milliseconds
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PongMessage {
    pub date: String,
}

/// Frames the relay sends, as `{"event": ..., "data": ...}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum SendMessage {
    UserJoined(UserJoinedMessage),
    WorkspaceUsers(Vec<PresenceRecord>),
    CursorUpdate(CursorUpdateMessage),
    GridChange(GridChangeMessage),
    UserLeft(UserLeftMessage),
    Pong(PongMessage),
}
