//! HTTP server implementation for the mock homeserver

use super::api::build_router;
use super::state::{MockRoom, MockState};
use super::types::{MockConfig, RecordedCall};
use crate::matrix::{CreateRoomRequest, StateEvent};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A mock homeserver running on a background task
///
/// The server stops when this handle is dropped.
pub struct MockHomeserver {
    state: Arc<MockState>,
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl MockHomeserver {
    /// Start on an ephemeral localhost port
    pub async fn start(config: MockConfig) -> Result<Self> {
        Self::bind("127.0.0.1:0", config).await
    }

    /// Start on a specific address
    pub async fn bind(addr: &str, config: MockConfig) -> Result<Self> {
        let state = Arc::new(MockState::new(config));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let router = build_router(state.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                warn!("Mock homeserver stopped: {}", e);
            }
        });

        info!("Mock homeserver listening on {}", addr);
        Ok(Self { state, addr, task })
    }

    /// Base URL to hand to a client, e.g. `http://127.0.0.1:41234`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.state
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls().await
    }

    pub async fn login_count(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::Login { .. }))
            .count()
    }

    pub async fn create_room_requests(&self) -> Vec<CreateRoomRequest> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::CreateRoom { request } => Some(request),
                _ => None,
            })
            .collect()
    }

    /// State writes as `(room_id, event)` pairs
    pub async fn state_writes(&self) -> Vec<(String, StateEvent)> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::PutState { room_id, event } => Some((room_id, event)),
                _ => None,
            })
            .collect()
    }

    pub async fn room(&self, room_id: &str) -> Option<MockRoom> {
        self.state.room(room_id).await
    }

    /// Serve until the task ends
    pub async fn wait(mut self) -> Result<()> {
        (&mut self.task).await?;
        Ok(())
    }
}

impl Drop for MockHomeserver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::types::MatrixErrorBody;
    use crate::matrix::{ClientError, Homeserver, MatrixClient};
    use secrecy::SecretString;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_room_requires_token() {
        let server = MockHomeserver::start(MockConfig::default()).await.unwrap();
        let resp = reqwest::Client::new()
            .post(format!("{}/_matrix/client/v3/createRoom", server.base_url()))
            .json(&json!({ "name": "Lobby" }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 401);
        let body: MatrixErrorBody = resp.json().await.unwrap();
        assert_eq!(body.errcode, "M_MISSING_TOKEN");
        assert!(server.create_room_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_state_write_to_unknown_room() {
        let server = MockHomeserver::start(MockConfig::default()).await.unwrap();
        let mut client = MatrixClient::new(&server.base_url()).unwrap();
        client
            .login("@admin:example.com", &SecretString::new("password".to_string()))
            .await
            .unwrap();

        let event = StateEvent::space_parent("!space:example.com", "example.com");
        let err = client.put_state("!nope:example.com", &event).await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(err.errcode(), Some("M_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_room_ids_survive_the_path() {
        let server = MockHomeserver::start(MockConfig::default()).await.unwrap();
        let mut client = MatrixClient::new(&server.base_url()).unwrap();
        client
            .login("@admin:example.com", &SecretString::new("password".to_string()))
            .await
            .unwrap();

        let space_id = client.create_room(&CreateRoomRequest::default()).await.unwrap();
        let event = StateEvent::space_child("!child:example.com", "example.com");
        client.put_state(&space_id, &event).await.unwrap();

        let writes = server.state_writes().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, space_id);
        assert_eq!(writes[0].1, event);
        assert_eq!(server.room(&space_id).await.unwrap().state, vec![event]);
    }
}
