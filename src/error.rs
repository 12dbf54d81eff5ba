//! Error types for the detections backend client

use thiserror::Error;

/// Failure talking to the detections backend
///
/// The screens collapse all of these into fixed user-facing strings; the
/// detail only reaches the log file.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => ApiError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(transport) => ApiError::Transport {
                url: url.to_string(),
                reason: transport.to_string(),
            },
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
