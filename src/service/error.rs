//! Errors raised inside the Vault API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection, transport or body decoding failure. The display text is
    /// what the form shows to the user.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
