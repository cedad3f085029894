//! The errors this crate can hand back.

use core::error::Error;
use pisserror::Error;

use crate::validate::Violations;

/// Anything that can go wrong while mutating or refreshing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("The entry draft failed validation. Violated rules: {_0}")]
    Validation(Violations),

    #[error("The remote catalog call failed. See: `{_0}`")]
    Remote(#[from] RemoteError),
}

/// Failures coming back from the remote catalog service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// We never got a usable response (connection refused, timeout, etc.)
    #[error("Failed to reach the catalog service. See: `{_0}`")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but with an error status.
    #[error("The catalog service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered 2xx, but the body wasn't what we expected.
    #[error("The catalog service returned a malformed response. See: `{_0}`")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),
}
