//! This module defines types related to the bootstrap endpoint of the Beacon API.

use serde::Serialize;
use serde_json::Value;
use ssz_derive::{Decode, Encode};

use super::{
    beacon_block::BeaconBlockHeader, branch::Branch, light_client_header::LightClientHeader,
    merkle::CurrentSyncCommitteeBranchDepth, sync_committee::SyncCommittee,
    versioned::LightClientData,
};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// The light client bootstrap
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientBootstrap<H: LightClientHeader> {
    /// The light client header
    pub header: H,
    /// The current sync committee
    pub current_sync_committee: SyncCommittee,
    /// The branch of the current sync committee
    pub current_sync_committee_branch: Branch<CurrentSyncCommitteeBranchDepth>,
}

impl<H: LightClientHeader> JsonCodec for LightClientBootstrap<H> {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            header: object.decode("header")?,
            current_sync_committee: object.decode("current_sync_committee")?,
            current_sync_committee_branch: object.branch("current_sync_committee_branch")?,
        })
    }
}

impl<H: LightClientHeader> LightClientData for LightClientBootstrap<H> {
    fn attested_beacon(&self) -> &BeaconBlockHeader {
        self.header.beacon()
    }
}
