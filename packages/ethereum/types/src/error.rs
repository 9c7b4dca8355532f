//! Errors returned by the light client codecs.

use crate::consensus::fork::ForkVersion;

/// Coarse classification of a [`LightClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is absent or `null`.
    Missing,
    /// A required list is present but empty.
    Empty,
    /// Bad hex or a wrong decoded length.
    Format,
    /// A numeric string could not be parsed.
    Parse,
    /// The input is not well formed JSON, or has the wrong JSON type.
    Json,
    /// The input does not match the SSZ layout.
    Ssz,
    /// The fork predates light client support, or is not known at all.
    UnsupportedVersion,
}

/// Error decoding or encoding a light client record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum LightClientError {
    /// A required field is absent or `null`.
    #[error("{0} missing")]
    MissingField(String),
    /// A required list is present but empty.
    #[error("{0} length cannot be 0")]
    EmptyField(String),
    /// A hex value decoded to the wrong number of bytes.
    #[error("invalid length of {0}")]
    InvalidLength(String),
    /// A list holds the wrong number of elements.
    #[error("invalid length of {field}: expected {expected} elements, got {actual}")]
    InvalidElementCount {
        /// The offending field.
        field: String,
        /// The element count fixed by the record layout.
        expected: usize,
        /// The element count found in the input.
        actual: usize,
    },
    /// A hex value could not be decoded.
    #[error("invalid value for {field}: {reason}")]
    InvalidHex {
        /// The offending field.
        field: String,
        /// Why decoding failed.
        reason: String,
    },
    /// A numeric string could not be parsed.
    #[error("invalid value for {field}: {reason}")]
    InvalidNumber {
        /// The offending field.
        field: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A field holds the wrong JSON type.
    #[error("invalid value for {field}: expected {expected}")]
    UnexpectedType {
        /// The offending field.
        field: String,
        /// The JSON type the field must have.
        expected: &'static str,
    },
    /// The input is not valid JSON, or could not be rendered as JSON.
    #[error("invalid JSON: {0}")]
    Json(String),
    /// The input does not match the SSZ layout of the record.
    #[error("invalid SSZ for {record}: {reason}")]
    Ssz {
        /// The record being decoded.
        record: &'static str,
        /// Why decoding failed.
        reason: String,
    },
    /// The fork carries no light client data.
    #[error("unsupported version {0}: light client data is not available before altair")]
    UnsupportedVersion(ForkVersion),
    /// The fork name is not known.
    #[error("unknown consensus version '{0}'")]
    UnknownVersion(String),
}

impl LightClientError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::Missing,
            Self::EmptyField(_) => ErrorKind::Empty,
            Self::InvalidLength(_) | Self::InvalidElementCount { .. } | Self::InvalidHex { .. } => {
                ErrorKind::Format
            }
            Self::InvalidNumber { .. } => ErrorKind::Parse,
            Self::UnexpectedType { .. } | Self::Json(_) => ErrorKind::Json,
            Self::Ssz { .. } => ErrorKind::Ssz,
            Self::UnsupportedVersion(_) | Self::UnknownVersion(_) => ErrorKind::UnsupportedVersion,
        }
    }

    pub(crate) fn ssz(record: &'static str, err: &ssz::DecodeError) -> Self {
        Self::Ssz {
            record,
            reason: format!("{err:?}"),
        }
    }
}
