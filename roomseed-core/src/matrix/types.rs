//! Request/response bodies of the Matrix client-server API

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

pub const LOGIN_TYPE_PASSWORD: &str = "m.login.password";
pub const IDENTIFIER_TYPE_USER: &str = "m.id.user";

pub const EVENT_HISTORY_VISIBILITY: &str = "m.room.history_visibility";
pub const EVENT_ENCRYPTION: &str = "m.room.encryption";
pub const EVENT_SPACE_CHILD: &str = "m.space.child";
pub const EVENT_SPACE_PARENT: &str = "m.space.parent";

pub const ROOM_TYPE_SPACE: &str = "m.space";
pub const MEGOLM_ALGORITHM: &str = "m.megolm.v1.aes-sha2";

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: UserIdentifier,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_device_display_name: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("kind", &self.kind)
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .field("initial_device_display_name", &self.initial_device_display_name)
            .finish()
    }
}

impl LoginRequest {
    pub fn password(user_id: &str, password: &str) -> Self {
        Self {
            kind: LOGIN_TYPE_PASSWORD.to_string(),
            identifier: UserIdentifier {
                kind: IDENTIFIER_TYPE_USER.to_string(),
                user: user_id.to_string(),
            },
            password: password.to_string(),
            initial_device_display_name: Some("roomseed".to_string()),
        }
    }
}

/// Every field is optional on the wire so a malformed success can be
/// reported instead of failing to decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// An authenticated session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Rooms
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// A state event, either sent in `initial_state` or written with a state PUT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub state_key: String,
    pub content: Value,
}

impl StateEvent {
    pub fn new(event_type: &str, state_key: &str, content: Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            state_key: state_key.to_string(),
            content,
        }
    }

    pub fn history_visibility(visibility: &str) -> Self {
        Self::new(EVENT_HISTORY_VISIBILITY, "", json!({ "history_visibility": visibility }))
    }

    pub fn megolm_encryption() -> Self {
        Self::new(EVENT_ENCRYPTION, "", json!({ "algorithm": MEGOLM_ALGORITHM }))
    }

    /// Child reference stored on the space, keyed by the room id
    pub fn space_child(room_id: &str, via: &str) -> Self {
        Self::new(EVENT_SPACE_CHILD, room_id, json!({ "via": [via], "suggested": true }))
    }

    /// Parent reference stored on the room, keyed by the space id
    pub fn space_parent(space_id: &str, via: &str) -> Self {
        Self::new(EVENT_SPACE_PARENT, space_id, json!({ "via": [via], "canonical": true }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_content: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_state: Vec<StateEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_level_content_override: Option<Value>,
}

impl CreateRoomRequest {
    /// Whether `creation_content` marks this room as a space
    pub fn is_space(&self) -> bool {
        self.creation_content
            .as_ref()
            .and_then(|c| c.get("type"))
            .and_then(Value::as_str)
            == Some(ROOM_TYPE_SPACE)
    }

    /// `events_default` from the power level override, if any
    pub fn events_default_override(&self) -> Option<i64> {
        self.power_level_content_override
            .as_ref()
            .and_then(|p| p.get("events_default"))
            .and_then(Value::as_i64)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PutStateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// Standard Matrix error body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixErrorBody {
    #[serde(default)]
    pub errcode: String,
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest::password("@admin:example.com", "pw")).unwrap();
        assert_eq!(body["type"], "m.login.password");
        assert_eq!(body["identifier"]["type"], "m.id.user");
        assert_eq!(body["identifier"]["user"], "@admin:example.com");
        assert_eq!(body["password"], "pw");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let request = format!("{:?}", LoginRequest::password("@admin:example.com", "hunter2"));
        assert!(!request.contains("hunter2"));
        assert!(request.contains("@admin:example.com"));

        let session = Session {
            user_id: "@admin:example.com".to_string(),
            access_token: "syt_secret_token".to_string(),
        };
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("syt_secret_token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_login_response_tolerates_missing_fields() {
        let resp: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.access_token.is_none());
    }

    #[test]
    fn test_create_room_request_omits_empty_fields() {
        let body = serde_json::to_value(CreateRoomRequest {
            name: Some("Lobby".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "name": "Lobby", "visibility": "private" }));
    }

    #[test]
    fn test_state_event_defaults_state_key() {
        let event: StateEvent =
            serde_json::from_value(json!({ "type": "m.room.encryption", "content": {} })).unwrap();
        assert_eq!(event.state_key, "");
    }

    #[test]
    fn test_space_links() {
        let child = StateEvent::space_child("!room:example.com", "example.com");
        assert_eq!(child.event_type, EVENT_SPACE_CHILD);
        assert_eq!(child.state_key, "!room:example.com");
        assert_eq!(child.content, json!({ "via": ["example.com"], "suggested": true }));

        let parent = StateEvent::space_parent("!space:example.com", "example.com");
        assert_eq!(parent.event_type, EVENT_SPACE_PARENT);
        assert_eq!(parent.state_key, "!space:example.com");
        assert_eq!(parent.content, json!({ "via": ["example.com"], "canonical": true }));
    }

    #[test]
    fn test_is_space_and_override_helpers() {
        let request = CreateRoomRequest {
            creation_content: Some(json!({ "type": "m.space" })),
            power_level_content_override: Some(json!({ "events_default": 50 })),
            ..Default::default()
        };
        assert!(request.is_space());
        assert_eq!(request.events_default_override(), Some(50));
        assert!(!CreateRoomRequest::default().is_space());
        assert_eq!(CreateRoomRequest::default().events_default_override(), None);
    }
}
