//! Error types for ontology search.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OntologyError>;

#[derive(Debug, Error)]
pub enum OntologyError {
    /// The client could not be configured.
    #[error("invalid ontology client configuration: {0}")]
    Config(String),

    /// Request failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The search service answered with a non-success status.
    #[error("search service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for OntologyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
