//! Mock Matrix homeserver
//!
//! Serves just enough of the client-server API (login, createRoom and
//! state PUT) to run a bootstrap against, and records every request.
//! Used by the integration tests and the `test-harness` binary.

pub mod api;
pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

pub use server::MockHomeserver;
pub use types::{MockBehavior, MockConfig, RecordedCall};
