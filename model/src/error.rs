//! API error bodies.

use derive_more::{Display, Error};

use serde::{Deserialize, Serialize};

/// The body of every error response the portal sends.
#[derive(Clone, Debug, Display, Deserialize, Error, Serialize)]
#[display("{message}")]
pub struct ApiError {
    /// A human-readable description of what went wrong.
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> ApiError {
        ApiError {
            message: message.into(),
        }
    }
}
