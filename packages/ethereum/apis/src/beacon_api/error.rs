//! This module defines errors for `BeaconApiClient`.

use std::time::Duration;

use ethereum_types::{consensus::fork::ForkVersion, error::LightClientError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// The error type for the beacon api client.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum BeaconApiClientError {
    /// HTTP request error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete in time
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Resource not found error
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(#[from] InternalServerError),

    /// Other unknown error
    #[error("unknown error ({code}): {text}")]
    Other {
        /// HTTP status code
        code: StatusCode,
        /// Error text
        text: String,
    },

    /// JSON deserialization error, outside of a light client record
    #[error("json deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response claims a fork without light client data
    #[error("unsupported version {0}")]
    UnsupportedVersion(ForkVersion),

    /// The response claims a fork this client does not know
    #[error("unknown consensus version '{0}'")]
    UnknownVersion(String),

    /// The response carries neither an `Eth-Consensus-Version` header nor a `version` field
    #[error("response carries no consensus version")]
    MissingConsensusVersion,

    /// The response content type is neither SSZ nor JSON
    #[error("unhandled content type '{0}'")]
    UnhandledEncoding(String),

    /// The light client record in the response is malformed
    #[error("failed to decode response: {0}")]
    Decode(#[from] LightClientError),

    /// The node served more updates than the request asked for
    #[error("requested at most {requested} updates, node served {served}")]
    TooManyUpdates {
        /// The `count` of the request
        requested: u64,
        /// The number of updates in the response
        served: usize,
    },
}

impl BeaconApiClientError {
    /// Returns true if the error says nothing about the data itself, only that it could not be
    /// fetched from this node. Another node may still serve it.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Timeout(_)
                | Self::NotFound(_)
                | Self::Internal(_)
                | Self::Other { .. }
        )
    }
}

/// The not found error structure returned by the Beacon API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{status_code} {error}: {message}")]
#[allow(clippy::module_name_repetitions)]
pub struct NotFoundError {
    /// HTTP status code
    #[serde(rename = "statusCode", alias = "code")]
    pub status_code: u64,
    /// Error type
    #[serde(default)]
    pub error: String,
    /// Error message
    #[serde(default)]
    pub message: String,
}

/// The internal server error returned by the Beacon API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{status_code} {error}: {message}")]
#[allow(clippy::module_name_repetitions)]
pub struct InternalServerError {
    /// HTTP status code
    #[serde(rename = "statusCode", alias = "code")]
    pub status_code: u64,
    /// Error type
    #[serde(default)]
    pub error: String,
    /// Error message
    #[serde(default)]
    pub message: String,
}

/// Parses a beacon node error body, keeping the raw text as the message if it is not the
/// standard error object.
pub(crate) fn parse_error_body<E>(status: StatusCode, body: &str) -> E
where
    E: for<'de> Deserialize<'de> + From<(StatusCode, String)>,
{
    serde_json::from_str(body).unwrap_or_else(|_| E::from((status, body.to_string())))
}

impl From<(StatusCode, String)> for NotFoundError {
    fn from((status, message): (StatusCode, String)) -> Self {
        Self {
            status_code: status.as_u16().into(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        }
    }
}

impl From<(StatusCode, String)> for InternalServerError {
    fn from((status, message): (StatusCode, String)) -> Self {
        Self {
            status_code: status.as_u16().into(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        }
    }
}
