//! Error types for homeserver calls

use thiserror::Error;

/// Result type for homeserver calls
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The homeserver answered with a non-success status
    #[error("API error: {status} {errcode}: {message}")]
    Api {
        status: u16,
        errcode: String,
        message: String,
    },

    /// A success response without a field the caller needs
    #[error("Response missing {0}")]
    MissingField(&'static str),

    #[error("Invalid homeserver URL: {0}")]
    InvalidUrl(String),

    /// An authenticated call was made before logging in
    #[error("Not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Matrix error code, when the server sent one
    pub fn errcode(&self) -> Option<&str> {
        match self {
            ClientError::Api { errcode, .. } if !errcode.is_empty() => Some(errcode),
            _ => None,
        }
    }
}
