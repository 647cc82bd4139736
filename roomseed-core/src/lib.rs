//! Seeds a Matrix homeserver with a community space and its default rooms.

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod matrix;
pub mod test_harness;

pub use bootstrap::{bootstrap, BootstrapError, BootstrapReport, RoomOutcome, RoomStatus};
pub use config::{BootstrapConfig, ConfigError};
pub use logging::LogLevel;
pub use matrix::{Homeserver, MatrixClient};

