//! Light client types of the altair fork. Bellatrix reuses the same shapes unchanged.

use serde::Serialize;
use serde_json::Value;
use ssz_derive::{Decode, Encode};

use super::{beacon_block::BeaconBlockHeader, bootstrap, update};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// The header of a light client before capella
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Default, Encode, Decode)]
pub struct LightClientHeader {
    /// The beacon block header
    pub beacon: BeaconBlockHeader,
}

impl JsonCodec for LightClientHeader {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            beacon: object.decode("beacon")?,
        })
    }
}

impl super::light_client_header::LightClientHeader for LightClientHeader {
    fn beacon(&self) -> &BeaconBlockHeader {
        &self.beacon
    }
}

/// The altair light client bootstrap
pub type LightClientBootstrap = bootstrap::LightClientBootstrap<LightClientHeader>;
/// The altair light client update
pub type LightClientUpdate = update::LightClientUpdate<LightClientHeader>;
/// The altair light client finality update
pub type LightClientFinalityUpdate = update::LightClientFinalityUpdate<LightClientHeader>;
/// The altair light client optimistic update
pub type LightClientOptimisticUpdate = update::LightClientOptimisticUpdate<LightClientHeader>;

#[cfg(test)]
mod test {
    use ssz::{Decode, Encode};

    use super::*;
    use crate::{consensus::fork::ForkVersion, test_utils::fixtures};

    #[test]
    fn test_header() {
        let json = fixtures::header_json(ForkVersion::Altair, fixtures::BEACON_HEADER_JSON);
        let header = LightClientHeader::from_json(json.as_bytes()).unwrap();

        assert_eq!(String::from_utf8(header.to_json().unwrap()).unwrap(), json);
        assert_eq!(header.as_ssz_bytes().len(), 112);
        assert_eq!(
            LightClientHeader::from_ssz_bytes(&header.as_ssz_bytes()).unwrap(),
            header
        );
        assert_eq!(
            LightClientHeader::from_json(b"{}").unwrap_err(),
            LightClientError::MissingField("beacon".to_string())
        );
    }
}
