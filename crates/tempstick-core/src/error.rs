//! Error types for gateway communication and input validation.
//!
//! Three failure kinds cross the crate boundary: transport problems (network
//! down, non-JSON body), gateway rejections (non-success HTTP status, with
//! the original payload preserved for the caller), and validation failures
//! caught before any gateway call. Evaluator and planner arithmetic never
//! produces errors; missing or out-of-range numbers degrade to "no value".

use serde_json::Value;

/// Errors surfaced by the gateway client and the surrounding plumbing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API key environment variable is missing; fatal at startup.
    #[error(
        "missing {} in environment; set it before running",
        crate::gateway::API_KEY_ENV
    )]
    MissingApiKey,

    /// Network-level failure reaching the gateway.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The gateway returned a body that was not JSON.
    #[error("non-JSON response from gateway (status {status})")]
    InvalidResponse { status: u16, body: String },

    /// The gateway answered with a non-success status.
    ///
    /// Carries the status and the original payload so CLI and HTTP surfaces
    /// can propagate both verbatim.
    #[error("gateway error {status}: {message}")]
    Gateway {
        status: u16,
        message: String,
        payload: Value,
    },

    /// A success response did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Malformed caller input, reported before any gateway call.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl Error {
    /// HTTP status to mirror to downstream callers, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Gateway { status, .. } | Error::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw gateway payload, for verbatim error reporting.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Gateway { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
