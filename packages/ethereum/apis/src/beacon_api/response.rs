//! This module defines the response types for the Beacon API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The response structure returned by the Beacon API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<Data> {
    /// The main data of the response.
    pub data: Data,
    /// Everything else the node said about the data: the top level fields next to `data` in a
    /// JSON body, or the `Eth-*` headers of an SSZ body.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl<Data> Response<Data> {
    /// Maps the data of the response, keeping its metadata.
    pub fn map_data<T>(self, f: impl FnOnce(Data) -> T) -> Response<T> {
        Response {
            data: f(self.data),
            metadata: self.metadata,
        }
    }
}

/// The encoding a client asks the beacon node for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Prefer SSZ, accept JSON
    #[default]
    Ssz,
    /// Only accept JSON
    Json,
}

impl Encoding {
    /// Returns the `Accept` header value for this encoding.
    #[must_use]
    pub const fn accept(self) -> &'static str {
        match self {
            Self::Ssz => "application/octet-stream;q=1.0,application/json;q=0.9",
            Self::Json => "application/json",
        }
    }
}

/// A successful beacon api response before its body is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// The `Content-Type` header
    pub content_type: Option<String>,
    /// The `Eth-Consensus-Version` header
    pub consensus_version: Option<String>,
    /// The remaining `Eth-*` headers, keyed the way the JSON body would name them
    pub metadata: Map<String, Value>,
    /// The response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// The prefix of the headers collected into [`RawResponse::metadata`].
    pub const METADATA_HEADER_PREFIX: &'static str = "eth-";
    /// The header carrying the fork of the response data.
    pub const CONSENSUS_VERSION_HEADER: &'static str = "eth-consensus-version";

    /// Records an `Eth-*` header. `Eth-Consensus-Version` is kept apart, other headers are
    /// stored as metadata under their snake case name without the `eth-` prefix, so
    /// `Eth-Execution-Optimistic: true` becomes `"execution_optimistic": true`.
    pub fn insert_header(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == Self::CONSENSUS_VERSION_HEADER {
            self.consensus_version = Some(value.to_string());
            return;
        }
        let Some(key) = name.strip_prefix(Self::METADATA_HEADER_PREFIX) else {
            return;
        };
        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(value.to_string()),
        };
        self.metadata.insert(key.replace('-', "_"), value);
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_header() {
        let mut raw = RawResponse::default();
        raw.insert_header("Eth-Consensus-Version", "deneb");
        raw.insert_header("Eth-Execution-Optimistic", "false");
        raw.insert_header("Eth-Finalized", "true");
        raw.insert_header("Eth-Dependent-Root", "0xabcd");
        raw.insert_header("Content-Length", "12");

        assert_eq!(raw.consensus_version.as_deref(), Some("deneb"));
        assert_eq!(
            Value::Object(raw.metadata),
            json!({
                "execution_optimistic": false,
                "finalized": true,
                "dependent_root": "0xabcd",
            })
        );
    }

    #[test]
    fn test_response_metadata_is_flattened() {
        let response: Response<u64> =
            serde_json::from_value(json!({"data": 7, "version": "capella", "finalized": true}))
                .unwrap();

        assert_eq!(response.data, 7);
        assert_eq!(response.metadata["version"], "capella");

        let response = response.map_data(|data| data * 2);
        assert_eq!(response.data, 14);
        assert_eq!(response.metadata.len(), 2);
    }
}
