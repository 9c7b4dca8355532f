//! This module defines the light client header shapes shared by the per-fork records.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;
use ssz_derive::{Decode, Encode};

use super::{altair, beacon_block::BeaconBlockHeader, branch::Branch, merkle::ExecutionBranchDepth};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// A per-fork light client header.
#[allow(clippy::module_name_repetitions)]
pub trait LightClientHeader:
    JsonCodec + ssz::Encode + ssz::Decode + Clone + Debug + PartialEq + Eq + Send + Sync + 'static
{
    /// Returns the beacon block header this light client header describes.
    fn beacon(&self) -> &BeaconBlockHeader;
}

/// A per-fork execution payload header.
pub trait ExecutionHeader:
    JsonCodec + ssz::Encode + ssz::Decode + Clone + Debug + PartialEq + Eq + Send + Sync + 'static
{
    /// Returns the execution block number.
    fn block_number(&self) -> u64;
}

/// The header of a light client after capella, tracking the execution block as well
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
pub struct ExecutionLightClientHeader<E: ExecutionHeader> {
    /// The beacon block header
    pub beacon: BeaconBlockHeader,
    /// The execution payload header
    pub execution: E,
    /// The execution branch
    pub execution_branch: Branch<ExecutionBranchDepth>,
}

impl<E: ExecutionHeader> JsonCodec for ExecutionLightClientHeader<E> {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            beacon: object.decode("beacon")?,
            execution: object.decode("execution")?,
            execution_branch: object.branch("execution_branch")?,
        })
    }
}

impl<E: ExecutionHeader> LightClientHeader for ExecutionLightClientHeader<E> {
    fn beacon(&self) -> &BeaconBlockHeader {
        &self.beacon
    }
}

/// Drops the execution part, leaving the header an altair light client understands.
impl<E: ExecutionHeader> From<ExecutionLightClientHeader<E>> for altair::LightClientHeader {
    fn from(header: ExecutionLightClientHeader<E>) -> Self {
        Self {
            beacon: header.beacon,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        consensus::{capella, deneb, fork::ForkVersion},
        test_utils::fixtures,
    };

    #[test]
    fn test_downgrade_to_altair() {
        let capella = capella::LightClientHeader::from_json(
            fixtures::header_json(ForkVersion::Capella, fixtures::BEACON_HEADER_JSON).as_bytes(),
        )
        .unwrap();
        let deneb = deneb::LightClientHeader::from_json(
            fixtures::header_json(ForkVersion::Deneb, fixtures::FINALIZED_BEACON_HEADER_JSON)
                .as_bytes(),
        )
        .unwrap();
        let beacon = deneb.beacon.clone();

        let altair = altair::LightClientHeader::from(capella);
        assert_eq!(
            String::from_utf8(altair.to_json().unwrap()).unwrap(),
            fixtures::header_json(ForkVersion::Altair, fixtures::BEACON_HEADER_JSON)
        );

        let altair: altair::LightClientHeader = deneb.into();
        assert_eq!(altair.beacon, beacon);
        assert_eq!(altair.beacon.slot, 4_943_680);
    }
}
