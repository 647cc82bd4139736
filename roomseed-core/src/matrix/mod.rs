//! Thin client for the Matrix client-server API
//!
//! Only the three calls the bootstrap needs are covered: password login,
//! room creation and state writes.

use async_trait::async_trait;
use secrecy::SecretString;

pub mod client;
pub mod error;
pub mod types;

pub use client::MatrixClient;
pub use error::{ClientError, ClientResult};
pub use types::{CreateRoomRequest, Session, StateEvent, Visibility};

/// Homeserver operations used by the bootstrap
///
/// `MatrixClient` talks HTTP. Tests can swap in a recorder.
#[async_trait]
pub trait Homeserver: Send + Sync {
    /// Log in with a password and keep the access token for later calls
    ///
    /// # Arguments
    /// * `user_id` - Fully qualified user id, `@user:server`
    /// * `password` - Account password
    async fn login(&mut self, user_id: &str, password: &SecretString) -> ClientResult<Session>;

    /// Create a room (or space) and return its id
    async fn create_room(&self, request: &CreateRoomRequest) -> ClientResult<String>;

    /// Write a state event into a room and return the event id
    async fn put_state(&self, room_id: &str, event: &StateEvent) -> ClientResult<String>;
}
