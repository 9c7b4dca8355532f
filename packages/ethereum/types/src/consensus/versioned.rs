//! This module defines the fork-tagged envelope around light client records.
//!
//! [`Versioned<R>`] holds exactly one per-fork record of kind `R`, so the fork tag and the
//! payload shape can never disagree. Phase0 has no variant: it carries no light client data.

use std::fmt::{self, Debug};

use serde::{ser::SerializeStruct, Serialize, Serializer};
use serde_json::Value;

use super::{
    altair,
    beacon_block::BeaconBlockHeader,
    bootstrap::LightClientBootstrap,
    capella, deneb,
    fork::ForkVersion,
    light_client_header::LightClientHeader,
    update::{LightClientFinalityUpdate, LightClientOptimisticUpdate, LightClientUpdate},
};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// Accessors common to all light client records.
pub trait LightClientData {
    /// Returns the beacon header the record attests to.
    fn attested_beacon(&self) -> &BeaconBlockHeader;

    /// Returns the finalized beacon header, for records that carry one.
    fn finalized_beacon(&self) -> Option<&BeaconBlockHeader> {
        None
    }
}

/// A kind of light client record, mapping each header shape to the record built on it.
pub trait LightClientRecord {
    /// The record built on the header shape `H`.
    type Of<H: LightClientHeader>: JsonCodec
        + LightClientData
        + ssz::Encode
        + ssz::Decode
        + Clone
        + Debug
        + PartialEq
        + Eq
        + Send
        + Sync;

    /// The record name, used in error messages.
    const NAME: &'static str;
}

/// Marker for [`LightClientBootstrap`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapRecord;

/// Marker for [`LightClientUpdate`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRecord;

/// Marker for [`LightClientFinalityUpdate`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalityUpdateRecord;

/// Marker for [`LightClientOptimisticUpdate`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticUpdateRecord;

impl LightClientRecord for BootstrapRecord {
    type Of<H: LightClientHeader> = LightClientBootstrap<H>;
    const NAME: &'static str = "LightClientBootstrap";
}

impl LightClientRecord for UpdateRecord {
    type Of<H: LightClientHeader> = LightClientUpdate<H>;
    const NAME: &'static str = "LightClientUpdate";
}

impl LightClientRecord for FinalityUpdateRecord {
    type Of<H: LightClientHeader> = LightClientFinalityUpdate<H>;
    const NAME: &'static str = "LightClientFinalityUpdate";
}

impl LightClientRecord for OptimisticUpdateRecord {
    type Of<H: LightClientHeader> = LightClientOptimisticUpdate<H>;
    const NAME: &'static str = "LightClientOptimisticUpdate";
}

/// A light client record tagged with the fork it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Versioned<R: LightClientRecord> {
    /// An altair record
    Altair(R::Of<altair::LightClientHeader>),
    /// A bellatrix record, which has the altair shape
    Bellatrix(R::Of<altair::LightClientHeader>),
    /// A capella record
    Capella(R::Of<capella::LightClientHeader>),
    /// A deneb record
    Deneb(R::Of<deneb::LightClientHeader>),
}

/// A versioned [`LightClientBootstrap`].
pub type VersionedLightClientBootstrap = Versioned<BootstrapRecord>;
/// A versioned [`LightClientUpdate`].
pub type VersionedLightClientUpdate = Versioned<UpdateRecord>;
/// A versioned [`LightClientFinalityUpdate`].
pub type VersionedLightClientFinalityUpdate = Versioned<FinalityUpdateRecord>;
/// A versioned [`LightClientOptimisticUpdate`].
pub type VersionedLightClientOptimisticUpdate = Versioned<OptimisticUpdateRecord>;

impl<R: LightClientRecord> Versioned<R> {
    /// Returns the fork of the record.
    #[must_use]
    pub const fn version(&self) -> ForkVersion {
        match self {
            Self::Altair(_) => ForkVersion::Altair,
            Self::Bellatrix(_) => ForkVersion::Bellatrix,
            Self::Capella(_) => ForkVersion::Capella,
            Self::Deneb(_) => ForkVersion::Deneb,
        }
    }

    /// Decodes a JSON record of the shape used at `version`.
    ///
    /// # Errors
    /// Returns [`LightClientError::UnsupportedVersion`] for phase0, otherwise any error of
    /// the per-fork decoder.
    pub fn from_json_value_at(
        version: ForkVersion,
        value: &Value,
        path: &str,
    ) -> Result<Self, LightClientError> {
        match version {
            ForkVersion::Phase0 => Err(LightClientError::UnsupportedVersion(version)),
            ForkVersion::Altair => JsonCodec::from_json_value_at(value, path).map(Self::Altair),
            ForkVersion::Bellatrix => {
                JsonCodec::from_json_value_at(value, path).map(Self::Bellatrix)
            }
            ForkVersion::Capella => JsonCodec::from_json_value_at(value, path).map(Self::Capella),
            ForkVersion::Deneb => JsonCodec::from_json_value_at(value, path).map(Self::Deneb),
        }
    }

    /// Decodes a JSON record of the shape used at `version`.
    ///
    /// # Errors
    /// See [`Self::from_json_value_at`].
    pub fn from_json_value(version: ForkVersion, value: &Value) -> Result<Self, LightClientError> {
        Self::from_json_value_at(version, value, "")
    }

    /// Decodes raw JSON bytes holding a record of the shape used at `version`.
    ///
    /// # Errors
    /// See [`Self::from_json_value_at`].
    pub fn from_json(version: ForkVersion, bytes: &[u8]) -> Result<Self, LightClientError> {
        if !version.has_light_client_data() {
            return Err(LightClientError::UnsupportedVersion(version));
        }
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| LightClientError::Json(e.to_string()))?;
        Self::from_json_value(version, &value)
    }

    /// Decodes a `{"version":"<fork>","data":<record>}` document, as carried by the
    /// light client events of the beacon node event stream.
    ///
    /// # Errors
    /// Returns an error if the document is not JSON, the version is missing, unknown or phase0,
    /// or the record fails to decode.
    pub fn from_event(bytes: &[u8]) -> Result<Self, LightClientError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| LightClientError::Json(e.to_string()))?;
        let object = JsonObject::new(&value, "")?;

        let version = object
            .required("version")?
            .as_str()
            .ok_or_else(|| LightClientError::UnexpectedType {
                field: "version".to_string(),
                expected: "a string",
            })?;
        let version = version
            .parse::<ForkVersion>()
            .map_err(|_| LightClientError::UnknownVersion(version.to_string()))?;

        Self::from_json_value_at(version, object.required("data")?, "data")
    }

    /// Decodes an SSZ record of the layout used at `version`.
    ///
    /// # Errors
    /// Returns [`LightClientError::UnsupportedVersion`] for phase0, and
    /// [`LightClientError::Ssz`] if the bytes do not match the layout.
    pub fn from_ssz_bytes(version: ForkVersion, bytes: &[u8]) -> Result<Self, LightClientError> {
        let decoded = match version {
            ForkVersion::Phase0 => return Err(LightClientError::UnsupportedVersion(version)),
            ForkVersion::Altair => ssz::Decode::from_ssz_bytes(bytes).map(Self::Altair),
            ForkVersion::Bellatrix => ssz::Decode::from_ssz_bytes(bytes).map(Self::Bellatrix),
            ForkVersion::Capella => ssz::Decode::from_ssz_bytes(bytes).map(Self::Capella),
            ForkVersion::Deneb => ssz::Decode::from_ssz_bytes(bytes).map(Self::Deneb),
        };
        decoded.map_err(|e| LightClientError::ssz(R::NAME, &e))
    }

    /// Renders the canonical JSON encoding of the record, without the fork tag.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, LightClientError> {
        match self {
            Self::Altair(data) | Self::Bellatrix(data) => data.to_json(),
            Self::Capella(data) => data.to_json(),
            Self::Deneb(data) => data.to_json(),
        }
    }

    /// Renders the SSZ encoding of the record.
    #[must_use]
    pub fn as_ssz_bytes(&self) -> Vec<u8> {
        match self {
            Self::Altair(data) | Self::Bellatrix(data) => ssz::Encode::as_ssz_bytes(data),
            Self::Capella(data) => ssz::Encode::as_ssz_bytes(data),
            Self::Deneb(data) => ssz::Encode::as_ssz_bytes(data),
        }
    }

    /// Returns the beacon header the record attests to.
    #[must_use]
    pub fn attested_beacon(&self) -> &BeaconBlockHeader {
        match self {
            Self::Altair(data) | Self::Bellatrix(data) => data.attested_beacon(),
            Self::Capella(data) => data.attested_beacon(),
            Self::Deneb(data) => data.attested_beacon(),
        }
    }

    /// Returns the finalized beacon header, for records that carry one.
    #[must_use]
    pub fn finalized_beacon(&self) -> Option<&BeaconBlockHeader> {
        match self {
            Self::Altair(data) | Self::Bellatrix(data) => data.finalized_beacon(),
            Self::Capella(data) => data.finalized_beacon(),
            Self::Deneb(data) => data.finalized_beacon(),
        }
    }
}

/// Renders the canonical JSON of the record.
impl<R: LightClientRecord> fmt::Display for Versioned<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => f.write_str(&String::from_utf8_lossy(&json)),
            Err(e) => write!(f, "ERR: {e}"),
        }
    }
}

/// Renders `{"version":"<fork>","data":<record>}`, the shape of beacon api responses.
impl<R: LightClientRecord> Serialize for Versioned<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Versioned", 2)?;
        state.serialize_field("version", &self.version())?;
        match self {
            Self::Altair(data) | Self::Bellatrix(data) => state.serialize_field("data", data)?,
            Self::Capella(data) => state.serialize_field("data", data)?,
            Self::Deneb(data) => state.serialize_field("data", data)?,
        }
        state.end()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::{error::ErrorKind, test_utils::fixtures};

    #[rstest]
    #[case(ForkVersion::Altair)]
    #[case(ForkVersion::Bellatrix)]
    #[case(ForkVersion::Capella)]
    #[case(ForkVersion::Deneb)]
    fn test_json_dispatch_tags_the_claimed_fork(#[case] fork: ForkVersion) {
        let json = fixtures::finality_update_json(fork);
        let update = VersionedLightClientFinalityUpdate::from_json(fork, json.as_bytes()).unwrap();

        assert_eq!(update.version(), fork);
        assert_eq!(String::from_utf8(update.to_json().unwrap()).unwrap(), json);
        assert_eq!(update.attested_beacon().slot, 4_943_744);
        assert_eq!(update.finalized_beacon().unwrap().slot, 4_943_680);
    }

    #[rstest]
    #[case(ForkVersion::Altair)]
    #[case(ForkVersion::Bellatrix)]
    #[case(ForkVersion::Capella)]
    #[case(ForkVersion::Deneb)]
    fn test_ssz_dispatch(#[case] fork: ForkVersion) {
        let json = fixtures::bootstrap_json(fork);
        let bootstrap = VersionedLightClientBootstrap::from_json(fork, json.as_bytes()).unwrap();
        let bytes = bootstrap.as_ssz_bytes();

        let decoded = VersionedLightClientBootstrap::from_ssz_bytes(fork, &bytes).unwrap();
        assert_eq!(decoded, bootstrap);
        assert_eq!(decoded.version(), fork);
        assert_eq!(String::from_utf8(decoded.to_json().unwrap()).unwrap(), json);
    }

    #[test]
    fn test_bellatrix_shares_the_altair_shape() {
        let json = fixtures::optimistic_update_json(ForkVersion::Altair);
        let altair =
            VersionedLightClientOptimisticUpdate::from_json(ForkVersion::Altair, json.as_bytes())
                .unwrap();
        let bellatrix =
            VersionedLightClientOptimisticUpdate::from_json(ForkVersion::Bellatrix, json.as_bytes())
                .unwrap();

        match (&altair, &bellatrix) {
            (Versioned::Altair(a), Versioned::Bellatrix(b)) => assert_eq!(a, b),
            _ => panic!("unexpected variants"),
        }
        assert_ne!(altair, bellatrix);
    }

    #[test]
    fn test_phase0_is_rejected() {
        let json = fixtures::optimistic_update_json(ForkVersion::Altair);
        let expected = LightClientError::UnsupportedVersion(ForkVersion::Phase0);

        assert_eq!(
            VersionedLightClientOptimisticUpdate::from_json(ForkVersion::Phase0, json.as_bytes())
                .unwrap_err(),
            expected
        );
        assert_eq!(
            VersionedLightClientOptimisticUpdate::from_json(ForkVersion::Phase0, b"not json")
                .unwrap_err(),
            expected
        );
        let err = VersionedLightClientUpdate::from_ssz_bytes(ForkVersion::Phase0, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
    }

    #[test]
    fn test_ssz_layout_is_fork_specific() {
        let altair = VersionedLightClientOptimisticUpdate::from_json(
            ForkVersion::Altair,
            fixtures::optimistic_update_json(ForkVersion::Altair).as_bytes(),
        )
        .unwrap();

        let err = VersionedLightClientOptimisticUpdate::from_ssz_bytes(
            ForkVersion::Capella,
            &altair.as_ssz_bytes(),
        )
        .unwrap_err();
        assert!(
            matches!(err, LightClientError::Ssz { record: "LightClientOptimisticUpdate", .. }),
            "{err}"
        );
    }

    #[test]
    fn test_serialize_envelope() {
        let json = fixtures::optimistic_update_json(ForkVersion::Deneb);
        let update =
            VersionedLightClientOptimisticUpdate::from_json(ForkVersion::Deneb, json.as_bytes())
                .unwrap();

        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            format!(r#"{{"version":"deneb","data":{json}}}"#)
        );
        let value: Value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["data"]["signature_slot"], "4943745");
    }

    #[test]
    fn test_display_renders_the_record() {
        let json = fixtures::finality_update_json(ForkVersion::Capella);
        let update =
            VersionedLightClientFinalityUpdate::from_json(ForkVersion::Capella, json.as_bytes())
                .unwrap();

        assert_eq!(update.to_string(), json);
    }

    #[rstest]
    #[case(ForkVersion::Altair)]
    #[case(ForkVersion::Deneb)]
    fn test_from_event(#[case] fork: ForkVersion) {
        let data = fixtures::optimistic_update_json(fork);
        let event = fixtures::response_json(fork, &data);

        let update = VersionedLightClientOptimisticUpdate::from_event(event.as_bytes()).unwrap();
        assert_eq!(update.version(), fork);
        assert_eq!(update.to_string(), data);
    }

    #[test]
    fn test_from_event_errors() {
        let data = fixtures::finality_update_json(ForkVersion::Deneb);

        let err = VersionedLightClientFinalityUpdate::from_event(format!(r#"{{"data":{data}}}"#).as_bytes())
            .unwrap_err();
        assert_eq!(err, LightClientError::MissingField("version".to_string()));

        let err = VersionedLightClientFinalityUpdate::from_event(
            fixtures::response_json(ForkVersion::Phase0, &data).as_bytes(),
        )
        .unwrap_err();
        assert_eq!(err, LightClientError::UnsupportedVersion(ForkVersion::Phase0));

        let err = VersionedLightClientFinalityUpdate::from_event(
            format!(r#"{{"version":"electra","data":{data}}}"#).as_bytes(),
        )
        .unwrap_err();
        assert_eq!(err, LightClientError::UnknownVersion("electra".to_string()));
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);

        // the data shape has to match the claimed fork
        let err = VersionedLightClientFinalityUpdate::from_event(
            fixtures::response_json(ForkVersion::Capella, &fixtures::finality_update_json(ForkVersion::Altair))
                .as_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "data.attested_header.execution missing");

        let err = VersionedLightClientFinalityUpdate::from_event(
            fixtures::response_json(ForkVersion::Deneb, "null").as_bytes(),
        )
        .unwrap_err();
        assert_eq!(err, LightClientError::MissingField("data".to_string()));
    }
}
