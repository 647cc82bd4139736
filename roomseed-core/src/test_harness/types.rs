//! Configuration and recorded traffic of the mock homeserver

use crate::matrix::{CreateRoomRequest, StateEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A request the mock homeserver received, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RecordedCall {
    Login { user: String },
    CreateRoom { request: CreateRoomRequest },
    PutState { room_id: String, event: StateEvent },
}

/// Failures the mock should inject
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    /// Answer every login with `403 M_FORBIDDEN`
    pub reject_login: bool,
    /// Answer logins with `200` but no `access_token`
    pub omit_access_token: bool,
    /// Names of rooms whose creation fails with `500 M_UNKNOWN`
    pub fail_create: HashSet<String>,
}

/// Settings for a mock homeserver instance
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Domain of generated room ids
    pub server_name: String,
    /// The only password accepted at login
    pub password: String,
    pub behavior: MockBehavior,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self::new("example.com", "password")
    }
}

impl MockConfig {
    pub fn new(server_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            password: password.into(),
            behavior: MockBehavior::default(),
        }
    }

    pub fn reject_logins(mut self) -> Self {
        self.behavior.reject_login = true;
        self
    }

    pub fn omit_access_token(mut self) -> Self {
        self.behavior.omit_access_token = true;
        self
    }

    pub fn fail_room(mut self, name: impl Into<String>) -> Self {
        self.behavior.fail_create.insert(name.into());
        self
    }
}
