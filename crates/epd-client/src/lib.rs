//! Client library for a network-attached three-color e-paper controller.
//!
//! Encodes pixel pairs into the controller's single-letter symbols, splits
//! them into fixed-size chunks, and uploads them over plain HTTP.

pub mod client;
pub mod protocol;

// Re-exports for convenience
pub use client::DisplayClient;
pub use protocol::{CHUNK_SIZE, UploadPlan};

/// Errors that can occur while talking to the display controller.
#[derive(Debug, thiserror::Error)]
pub enum EpdError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid display host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Display returned status {status} for /{path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
}

/// Result type alias for epd-client operations.
pub type Result<T> = std::result::Result<T, EpdError>;
