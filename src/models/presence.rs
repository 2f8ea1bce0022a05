use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Identity a client asserts when joining a workspace
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
}

/// Roster entry for one connection inside a workspace room
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PresenceRecord {
    /// Connection id of the member
    pub id: String,
    pub email: String,
    pub name: String,
    pub initial: String,
    pub color: String,
}

impl PresenceRecord {
    /// Build the record for `connection_id` from what the client sent.
    /// The name falls back to the email, the initial is its first letter.
    pub fn new(connection_id: &str, user: &UserInfo, color: &str) -> Self {
        let name = match user.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => user.email.clone(),
        };
        let initial = name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default();

        Self {
            id: connection_id.to_string(),
            email: user.email.clone(),
            name,
            initial,
            color: color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_email() {
        let user = UserInfo { email: "alice@x.com".to_string(), name: None };
        let record = PresenceRecord::new("c1", &user, "#FF6B6B");
        assert_eq!(record.name, "alice@x.com");
        assert_eq!(record.initial, "A");
        assert_eq!(record.id, "c1");
    }

    #[test]
    fn empty_name_falls_back_to_email() {
        let user = UserInfo { email: "bob@x.com".to_string(), name: Some(String::new()) };
        assert_eq!(PresenceRecord::new("c1", &user, "#FF6B6B").name, "bob@x.com");
    }

    #[test]
    fn initial_comes_from_name() {
        let user = UserInfo { email: "c@x.com".to_string(), name: Some("émile".to_string()) };
        assert_eq!(PresenceRecord::new("c1", &user, "#FF6B6B").initial, "É");
    }

    #[test]
    fn null_email_uses_name() {
        let user: UserInfo = serde_json::from_str(r#"{"email":null,"name":"Ann"}"#).unwrap();
        let record = PresenceRecord::new("c1", &user, "#FF6B6B");
        assert_eq!(record.email, "");
        assert_eq!(record.name, "Ann");
        assert_eq!(record.initial, "A");
    }

    #[test]
    fn null_name_falls_back_to_email() {
        let user: UserInfo = serde_json::from_str(r#"{"email":"dan@x.com","name":null}"#).unwrap();
        assert_eq!(user.name, None);
        assert_eq!(PresenceRecord::new("c1", &user, "#FF6B6B").name, "dan@x.com");
    }

    #[test]
    fn missing_fields_default_silently() {
        let user: UserInfo = serde_json::from_str("{}").unwrap();
        let record = PresenceRecord::new("c1", &user, "#FF6B6B");
        assert_eq!(record.email, "");
        assert_eq!(record.name, "");
        assert_eq!(record.initial, "");
    }
}
