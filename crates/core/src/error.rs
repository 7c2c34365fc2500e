//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected status {status} from {path}: {body}")]
    UnexpectedStatus {
        status: u16,
        path: String,
        body: String,
    },

    #[error("Unexpected payload from {0}: expected a JSON array")]
    UnexpectedPayload(String),

    #[error("Pagination exceeded {0} pages")]
    PageLimit(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Trim a response body down to something that fits in an error message.
pub(crate) fn body_excerpt(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
