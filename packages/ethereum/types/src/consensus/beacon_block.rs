//! This module defines the beacon block header referenced by light client headers.

use alloy_primitives::B256;
use serde::Serialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use ssz_derive::{Decode, Encode};

use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// The beacon block header
#[serde_as]
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Default, Encode, Decode)]
pub struct BeaconBlockHeader {
    /// The slot to which this block corresponds
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The index of validator in validator registry
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    /// The signing merkle root of the parent `BeaconBlock`
    pub parent_root: B256,
    /// The tree hash merkle root of the `BeaconState` for the `BeaconBlock`
    pub state_root: B256,
    /// The tree hash merkle root of the `BeaconBlockBody` for the `BeaconBlock`
    pub body_root: B256,
}

impl JsonCodec for BeaconBlockHeader {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            slot: object.uint("slot")?,
            proposer_index: object.uint("proposer_index")?,
            parent_root: object.fixed_bytes("parent_root")?,
            state_root: object.fixed_bytes("state_root")?,
            body_root: object.fixed_bytes("body_root")?,
        })
    }
}
