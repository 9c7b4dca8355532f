//! Content negotiation for light client responses.
//!
//! A response is decoded in a fixed order: the consensus version is resolved (header first,
//! then the `version` field of a JSON body) and phase0 is rejected, then the content type picks
//! the SSZ or JSON codec of the exact per-fork record.

use ethereum_types::{
    consensus::{
        fork::ForkVersion,
        versioned::{LightClientRecord, UpdateRecord, Versioned, VersionedLightClientUpdate},
    },
    error::LightClientError,
};
use serde_json::{Map, Value};

use super::{
    error::BeaconApiClientError,
    response::{RawResponse, Response},
};

const DATA_FIELD: &str = "data";
const VERSION_FIELD: &str = "version";

/// Size of the little endian length prefix of an SSZ response chunk.
pub const CHUNK_LENGTH_LEN: usize = 8;
/// Size of the fork digest at the start of an SSZ response chunk.
pub const FORK_DIGEST_LEN: usize = 4;

/// The wire encoding of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `application/octet-stream`
    Ssz,
    /// `application/json`
    Json,
}

impl ContentType {
    /// The SSZ media type.
    pub const SSZ: &'static str = "application/octet-stream";
    /// The JSON media type.
    pub const JSON: &'static str = "application/json";

    /// Parses a `Content-Type` header. Media type parameters are ignored, and a response
    /// without the header is taken to be JSON.
    ///
    /// # Errors
    /// Returns [`BeaconApiClientError::UnhandledEncoding`] for any other media type.
    pub fn from_header(value: Option<&str>) -> Result<Self, BeaconApiClientError> {
        let Some(value) = value else {
            return Ok(Self::Json);
        };
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case(Self::SSZ) {
            Ok(Self::Ssz)
        } else if media_type.eq_ignore_ascii_case(Self::JSON) {
            Ok(Self::Json)
        } else {
            Err(BeaconApiClientError::UnhandledEncoding(value.to_string()))
        }
    }
}

enum Body<'a> {
    Json(Map<String, Value>),
    Ssz(&'a [u8]),
}

/// Decodes a response holding a single light client record.
///
/// # Errors
/// Returns an error if the version or content type cannot be handled, or if the record is
/// malformed.
pub fn decode_record<R: LightClientRecord>(
    raw: &RawResponse,
) -> Result<Response<Versioned<R>>, BeaconApiClientError> {
    let (version, body) = negotiate(raw)?;
    let (data, metadata) = match body {
        Body::Ssz(bytes) => (
            Versioned::from_ssz_bytes(version, bytes)?,
            raw.metadata.clone(),
        ),
        Body::Json(mut fields) => {
            let data = take_data(&mut fields)?;
            (
                Versioned::from_json_value_at(version, &data, DATA_FIELD)?,
                fields,
            )
        }
    };
    Ok(with_version(data, metadata, version))
}

/// Decodes a response of the updates endpoint. Every element is decoded under the fork of
/// the whole response, and any malformed element fails the whole response.
///
/// # Errors
/// Returns an error if the version or content type cannot be handled, or if any element is
/// malformed.
pub fn decode_updates(
    raw: &RawResponse,
) -> Result<Response<Vec<VersionedLightClientUpdate>>, BeaconApiClientError> {
    let (version, body) = negotiate(raw)?;
    let (data, metadata) = match body {
        Body::Ssz(bytes) => {
            let updates = split_ssz_chunks(bytes)?
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| {
                    Versioned::from_ssz_bytes(version, chunk).map_err(|e| match e {
                        LightClientError::Ssz { record, reason } => LightClientError::Ssz {
                            record,
                            reason: format!("chunk {i}: {reason}"),
                        },
                        e => e,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            (updates, raw.metadata.clone())
        }
        Body::Json(mut fields) => {
            let data = take_data(&mut fields)?;
            let elements = data
                .as_array()
                .ok_or_else(|| LightClientError::UnexpectedType {
                    field: DATA_FIELD.to_string(),
                    expected: "an array",
                })?;
            let updates = elements
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    Versioned::from_json_value_at(version, element, &format!("{DATA_FIELD}[{i}]"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            (updates, fields)
        }
    };
    Ok(with_version(data, metadata, version))
}

/// Frames one SSZ payload the way the updates endpoint does: a little endian `u64` length
/// covering the fork digest and the payload, the fork digest, then the payload.
#[must_use]
pub fn encode_ssz_chunk(fork_digest: [u8; FORK_DIGEST_LEN], payload: &[u8]) -> Vec<u8> {
    let length = (FORK_DIGEST_LEN + payload.len()) as u64;
    let mut chunk = Vec::with_capacity(CHUNK_LENGTH_LEN + FORK_DIGEST_LEN + payload.len());
    chunk.extend_from_slice(&length.to_le_bytes());
    chunk.extend_from_slice(&fork_digest);
    chunk.extend_from_slice(payload);
    chunk
}

fn negotiate(raw: &RawResponse) -> Result<(ForkVersion, Body<'_>), BeaconApiClientError> {
    let claimed = raw
        .consensus_version
        .as_deref()
        .map(parse_version)
        .transpose()?;

    let body = match ContentType::from_header(raw.content_type.as_deref())? {
        ContentType::Ssz => Body::Ssz(&raw.body),
        ContentType::Json => match serde_json::from_slice(&raw.body)
            .map_err(|e| LightClientError::Json(e.to_string()))?
        {
            Value::Object(fields) => Body::Json(fields),
            _ => {
                return Err(LightClientError::UnexpectedType {
                    field: "<root>".to_string(),
                    expected: "an object",
                }
                .into())
            }
        },
    };

    let version = match (claimed, &body) {
        (Some(version), _) => version,
        (None, Body::Json(fields)) => fields
            .get(VERSION_FIELD)
            .and_then(Value::as_str)
            .ok_or(BeaconApiClientError::MissingConsensusVersion)
            .and_then(parse_version)?,
        (None, Body::Ssz(_)) => return Err(BeaconApiClientError::MissingConsensusVersion),
    };

    Ok((version, body))
}

/// Resolves a version string and rejects forks that predate light client data.
fn parse_version(version: &str) -> Result<ForkVersion, BeaconApiClientError> {
    let version = version
        .parse::<ForkVersion>()
        .map_err(|_| BeaconApiClientError::UnknownVersion(version.to_string()))?;
    if version.has_light_client_data() {
        Ok(version)
    } else {
        Err(BeaconApiClientError::UnsupportedVersion(version))
    }
}

fn take_data(fields: &mut Map<String, Value>) -> Result<Value, LightClientError> {
    match fields.remove(DATA_FIELD) {
        None | Some(Value::Null) => Err(LightClientError::MissingField(DATA_FIELD.to_string())),
        Some(data) => Ok(data),
    }
}

fn with_version<T>(data: T, mut metadata: Map<String, Value>, version: ForkVersion) -> Response<T> {
    metadata.insert(VERSION_FIELD.to_string(), Value::String(version.to_string()));
    Response { data, metadata }
}

fn split_ssz_chunks(mut bytes: &[u8]) -> Result<Vec<&[u8]>, LightClientError> {
    let mut chunks = Vec::new();
    while !bytes.is_empty() {
        let invalid = |reason: String| LightClientError::Ssz {
            record: UpdateRecord::NAME,
            reason: format!("chunk {}: {reason}", chunks.len()),
        };

        let Some((length, rest)) = bytes.split_first_chunk::<CHUNK_LENGTH_LEN>() else {
            return Err(invalid(format!("{} bytes left, expected a chunk length", bytes.len())));
        };
        let length = usize::try_from(u64::from_le_bytes(*length)).unwrap_or(usize::MAX);
        if length < FORK_DIGEST_LEN || length > rest.len() {
            return Err(invalid(format!(
                "chunk length {length} out of bounds, {} bytes left",
                rest.len()
            )));
        }

        let (chunk, remaining) = rest.split_at(length);
        chunks.push(&chunk[FORK_DIGEST_LEN..]);
        bytes = remaining;
    }
    Ok(chunks)
}

#[cfg(test)]
mod test {
    use ethereum_types::{
        consensus::versioned::{
            BootstrapRecord, OptimisticUpdateRecord, VersionedLightClientBootstrap,
            VersionedLightClientFinalityUpdate, VersionedLightClientOptimisticUpdate,
        },
        error::ErrorKind,
        test_utils::fixtures,
    };
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const DENEB_DIGEST: [u8; 4] = [0x6a, 0x95, 0xa1, 0xa9];

    fn json_response(version_header: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            content_type: Some("application/json; charset=utf-8".to_string()),
            consensus_version: version_header.map(ToString::to_string),
            body: body.as_bytes().to_vec(),
            ..Default::default()
        }
    }

    fn ssz_response(version_header: Option<&str>, body: Vec<u8>) -> RawResponse {
        RawResponse {
            content_type: Some(ContentType::SSZ.to_string()),
            consensus_version: version_header.map(ToString::to_string),
            body,
            ..Default::default()
        }
    }

    fn update_with_slot(fork: ForkVersion, signature_slot: u64) -> Value {
        let mut update: Value = serde_json::from_str(&fixtures::update_json(fork)).unwrap();
        update["signature_slot"] = json!(signature_slot.to_string());
        update
    }

    #[rstest]
    #[case("application/octet-stream", ContentType::Ssz)]
    #[case("application/json", ContentType::Json)]
    #[case("Application/JSON; charset=utf-8", ContentType::Json)]
    fn test_content_type_from_header(#[case] header: &str, #[case] expected: ContentType) {
        assert_eq!(ContentType::from_header(Some(header)).unwrap(), expected);
    }

    #[test]
    fn test_content_type_defaults_to_json() {
        assert_eq!(ContentType::from_header(None).unwrap(), ContentType::Json);
        assert!(matches!(
            ContentType::from_header(Some("text/html")),
            Err(BeaconApiClientError::UnhandledEncoding(value)) if value == "text/html"
        ));
    }

    #[test]
    fn test_decode_json_record_keeps_metadata() {
        let data = fixtures::finality_update_json(ForkVersion::Capella);
        let body = format!(r#"{{"version":"capella","execution_optimistic":false,"data":{data}}}"#);

        let response: Response<VersionedLightClientFinalityUpdate> =
            decode_record(&json_response(Some("capella"), &body)).unwrap();

        assert_eq!(response.data.version(), ForkVersion::Capella);
        assert_eq!(String::from_utf8(response.data.to_json().unwrap()).unwrap(), data);
        assert_eq!(response.metadata["version"], "capella");
        assert_eq!(response.metadata["execution_optimistic"], false);
        assert!(!response.metadata.contains_key("data"));
    }

    #[test]
    fn test_bellatrix_decodes_with_altair_shape() {
        let body = fixtures::response_json(
            ForkVersion::Bellatrix,
            &fixtures::optimistic_update_json(ForkVersion::Bellatrix),
        );

        let response: Response<VersionedLightClientOptimisticUpdate> =
            decode_record(&json_response(None, &body)).unwrap();

        assert!(matches!(response.data, Versioned::Bellatrix(_)));
        assert_eq!(response.data.version(), ForkVersion::Bellatrix);
    }

    #[test]
    fn test_header_version_takes_precedence() {
        // the body claims altair but holds a deneb record, the header is right
        let body = fixtures::response_json(
            ForkVersion::Altair,
            &fixtures::bootstrap_json(ForkVersion::Deneb),
        );

        let response: Response<VersionedLightClientBootstrap> =
            decode_record(&json_response(Some("DENEB"), &body)).unwrap();

        assert_eq!(response.data.version(), ForkVersion::Deneb);
        assert_eq!(response.metadata["version"], "deneb");
    }

    #[test]
    fn test_version_resolution_errors() {
        let data = fixtures::optimistic_update_json(ForkVersion::Altair);

        let err = decode_record::<OptimisticUpdateRecord>(
            &json_response(None, &format!(r#"{{"data":{data}}}"#)),
        )
        .unwrap_err();
        assert!(matches!(err, BeaconApiClientError::MissingConsensusVersion));

        let err = decode_record::<OptimisticUpdateRecord>(
            &json_response(Some("electra"), &format!(r#"{{"data":{data}}}"#)),
        )
        .unwrap_err();
        assert!(matches!(err, BeaconApiClientError::UnknownVersion(v) if v == "electra"));

        let err = decode_record::<OptimisticUpdateRecord>(
            &ssz_response(None, vec![0; 280]),
        )
        .unwrap_err();
        assert!(matches!(err, BeaconApiClientError::MissingConsensusVersion));
    }

    #[rstest]
    #[case(json_response(Some("phase0"), "{}"))]
    #[case(json_response(None, r#"{"version":"phase0","data":{}}"#))]
    #[case(ssz_response(Some("phase0"), vec![0; 64]))]
    #[case(RawResponse {
        content_type: Some("text/plain".to_string()),
        consensus_version: Some("phase0".to_string()),
        ..Default::default()
    })]
    fn test_phase0_is_rejected_for_every_encoding(#[case] raw: RawResponse) {
        assert!(matches!(
            decode_record::<BootstrapRecord>(&raw),
            Err(BeaconApiClientError::UnsupportedVersion(ForkVersion::Phase0))
        ));
        assert!(matches!(
            decode_updates(&raw),
            Err(BeaconApiClientError::UnsupportedVersion(ForkVersion::Phase0))
        ));
    }

    #[test]
    fn test_unhandled_encoding() {
        let raw = RawResponse {
            content_type: Some("text/html".to_string()),
            consensus_version: Some("deneb".to_string()),
            body: b"<html></html>".to_vec(),
            ..Default::default()
        };

        assert!(matches!(
            decode_updates(&raw),
            Err(BeaconApiClientError::UnhandledEncoding(_))
        ));
    }

    #[test]
    fn test_decode_ssz_record() {
        let data = fixtures::bootstrap_json(ForkVersion::Deneb);
        let bootstrap =
            VersionedLightClientBootstrap::from_json(ForkVersion::Deneb, data.as_bytes()).unwrap();

        let mut raw = ssz_response(None, bootstrap.as_ssz_bytes());
        raw.insert_header("Eth-Consensus-Version", "deneb");
        raw.insert_header("Eth-Execution-Optimistic", "false");

        let response: Response<VersionedLightClientBootstrap> = decode_record(&raw).unwrap();
        assert_eq!(response.data, bootstrap);
        assert_eq!(response.metadata["version"], "deneb");
        assert_eq!(response.metadata["execution_optimistic"], false);

        // a capella layout is too short for deneb
        let capella = VersionedLightClientBootstrap::from_json(
            ForkVersion::Capella,
            fixtures::bootstrap_json(ForkVersion::Capella).as_bytes(),
        )
        .unwrap();
        let err = decode_record::<BootstrapRecord>(
            &ssz_response(Some("deneb"), capella.as_ssz_bytes()),
        )
        .unwrap_err();
        assert!(matches!(err, BeaconApiClientError::Decode(e) if e.kind() == ErrorKind::Ssz));
    }

    #[test]
    fn test_decode_json_updates_preserves_order() {
        let data = json!([
            update_with_slot(ForkVersion::Capella, 100),
            update_with_slot(ForkVersion::Capella, 200),
            update_with_slot(ForkVersion::Capella, 300),
        ]);
        let body = json!({"version": "capella", "data": data}).to_string();

        let response = decode_updates(&json_response(None, &body)).unwrap();

        let slots = response
            .data
            .iter()
            .map(|update| match update {
                Versioned::Capella(update) => update.signature_slot,
                _ => panic!("expected a capella update"),
            })
            .collect::<Vec<_>>();
        assert_eq!(slots, vec![100, 200, 300]);
    }

    #[test]
    fn test_one_malformed_update_fails_the_whole_list() {
        let mut second = update_with_slot(ForkVersion::Deneb, 200);
        second["finality_branch"] = serde_json::from_str(&fixtures::branch_json(5, 3)).unwrap();
        let body = json!({
            "version": "deneb",
            "data": [
                update_with_slot(ForkVersion::Deneb, 100),
                second,
                update_with_slot(ForkVersion::Deneb, 300),
            ],
        })
        .to_string();

        let err = decode_updates(&json_response(Some("deneb"), &body)).unwrap_err();

        let BeaconApiClientError::Decode(err) = err else {
            panic!("expected a decode error, got {err:?}");
        };
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(
            err,
            LightClientError::InvalidElementCount {
                field: "data[1].finality_branch".to_string(),
                expected: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn test_updates_data_must_be_a_list() {
        let body = fixtures::response_json(
            ForkVersion::Altair,
            &fixtures::update_json(ForkVersion::Altair),
        );

        let err = decode_updates(&json_response(None, &body)).unwrap_err();
        assert!(matches!(
            err,
            BeaconApiClientError::Decode(LightClientError::UnexpectedType { field, .. }) if field == "data"
        ));

        let err = decode_updates(&json_response(None, r#"{"version":"altair"}"#)).unwrap_err();
        assert!(matches!(
            err,
            BeaconApiClientError::Decode(LightClientError::MissingField(field)) if field == "data"
        ));
    }

    #[test]
    fn test_decode_ssz_updates() {
        let updates = [100, 200]
            .map(|slot| {
                VersionedLightClientUpdate::from_json_value(
                    ForkVersion::Deneb,
                    &update_with_slot(ForkVersion::Deneb, slot),
                )
                .unwrap()
            })
            .to_vec();
        let body = updates
            .iter()
            .flat_map(|update| encode_ssz_chunk(DENEB_DIGEST, &update.as_ssz_bytes()))
            .collect::<Vec<_>>();

        let response = decode_updates(&ssz_response(Some("deneb"), body.clone())).unwrap();
        assert_eq!(response.data, updates);

        let err = decode_updates(&ssz_response(Some("deneb"), body[..body.len() - 1].to_vec()))
            .unwrap_err();
        let BeaconApiClientError::Decode(err) = err else {
            panic!("expected a decode error, got {err:?}");
        };
        assert_eq!(err.kind(), ErrorKind::Ssz);
        assert!(err.to_string().contains("chunk 1"));

        let response = decode_updates(&ssz_response(Some("deneb"), Vec::new())).unwrap();
        assert!(response.data.is_empty());
    }
}
