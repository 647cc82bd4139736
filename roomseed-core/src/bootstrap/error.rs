//! Fatal bootstrap failures

use crate::matrix::ClientError;
use thiserror::Error;

/// Stages that abort the whole run. Room-level failures are reported in
/// [`super::BootstrapReport`] instead.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Login failed: {0}")]
    Login(ClientError),

    #[error("Failed to create space: {0}")]
    SpaceCreation(ClientError),
}
