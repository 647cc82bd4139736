//! Shared state of the mock homeserver
//!
//! Holds the rooms created so far, the issued access tokens and a log of
//! every request, so tests can assert on exactly what the client sent.

use super::types::{MockBehavior, MockConfig, RecordedCall};
use crate::matrix::{CreateRoomRequest, StateEvent};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// A room created on the mock, with its current state events
#[derive(Debug, Clone)]
pub struct MockRoom {
    pub request: CreateRoomRequest,
    pub state: Vec<StateEvent>,
}

impl MockRoom {
    fn new(request: CreateRoomRequest) -> Self {
        let state = request.initial_state.clone();
        Self { request, state }
    }

    /// Insert or replace the event with the same type and state key
    fn apply(&mut self, event: StateEvent) {
        match self
            .state
            .iter_mut()
            .find(|e| e.event_type == event.event_type && e.state_key == event.state_key)
        {
            Some(existing) => *existing = event,
            None => self.state.push(event),
        }
    }
}

pub struct MockState {
    pub server_name: String,
    pub password: String,
    pub behavior: RwLock<MockBehavior>,
    calls: RwLock<Vec<RecordedCall>>,
    rooms: RwLock<HashMap<String, MockRoom>>,
    tokens: RwLock<HashSet<String>>,
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            server_name: config.server_name,
            password: config.password,
            behavior: RwLock::new(config.behavior),
            calls: RwLock::new(Vec::new()),
            rooms: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashSet::new()),
        }
    }

    pub async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn issue_token(&self) -> String {
        let token = format!("mock_{}", uuid::Uuid::new_v4().simple());
        self.tokens.write().await.insert(token.clone());
        token
    }

    pub async fn is_valid_token(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    /// Store a new room and return its generated id
    pub async fn add_room(&self, request: CreateRoomRequest) -> String {
        let room_id = format!("!{}:{}", uuid::Uuid::new_v4().simple(), self.server_name);
        self.rooms.write().await.insert(room_id.clone(), MockRoom::new(request));
        room_id
    }

    /// Apply a state event; `false` if the room does not exist
    pub async fn apply_state(&self, room_id: &str, event: StateEvent) -> bool {
        match self.rooms.write().await.get_mut(room_id) {
            Some(room) => {
                room.apply(event);
                true
            }
            None => false,
        }
    }

    pub async fn room(&self, room_id: &str) -> Option<MockRoom> {
        self.rooms.read().await.get(room_id).cloned()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
