//! API routes definition

use super::handlers;
use super::state::MockState;
use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

/// Build the router for the subset of the client-server API we serve
pub fn build_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/_matrix/client/v3/login", post(handlers::login))
        .route("/_matrix/client/v3/createRoom", post(handlers::create_room))
        .route(
            "/_matrix/client/v3/rooms/:room_id/state/:event_type/:state_key",
            put(handlers::put_state),
        )
        .with_state(state)
}
