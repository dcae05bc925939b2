// src/lookup/error.rs

use crate::locale::Messages;
use reqwest::StatusCode;
use thiserror::Error;

/// Why fetching the sheet failed. All variants surface as one user-facing category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("non-success status {0}")]
    Status(StatusCode),

    #[error("empty payload")]
    EmptyBody,

    #[error("{0}")]
    Request(String),
}

impl FetchError {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        FetchError::Request(format!("{:#}", err))
    }

    /// Reason text shown to the user. The HTTP status is not surfaced.
    pub fn reason(&self, messages: &Messages) -> String {
        match self {
            FetchError::Status(_) => messages.connection_failed.to_string(),
            FetchError::EmptyBody => messages.empty_payload.to_string(),
            FetchError::Request(msg) => msg.clone(),
        }
    }
}
