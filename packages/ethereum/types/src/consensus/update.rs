//! This module defines the light client update records served by the `updates`,
//! `finality_update` and `optimistic_update` endpoints of the Beacon API.

use serde::Serialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use ssz_derive::{Decode, Encode};

use super::{
    beacon_block::BeaconBlockHeader,
    branch::Branch,
    light_client_header::LightClientHeader,
    merkle::{FinalityBranchDepth, NextSyncCommitteeBranchDepth},
    sync_committee::{SyncAggregate, SyncCommittee},
    versioned::LightClientData,
};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// A light client update
#[serde_as]
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientUpdate<H: LightClientHeader> {
    /// Header attested to by the sync committee
    pub attested_header: H,
    /// Next sync committee corresponding to `attested_header.state_root`
    pub next_sync_committee: SyncCommittee,
    /// The branch of the next sync committee
    pub next_sync_committee_branch: Branch<NextSyncCommitteeBranchDepth>,
    /// Finalized header corresponding to `attested_header.state_root`
    pub finalized_header: H,
    /// Branch of the finalized header
    pub finality_branch: Branch<FinalityBranchDepth>,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

impl<H: LightClientHeader> JsonCodec for LightClientUpdate<H> {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            attested_header: object.decode("attested_header")?,
            next_sync_committee: object.decode("next_sync_committee")?,
            next_sync_committee_branch: object.branch("next_sync_committee_branch")?,
            finalized_header: object.decode("finalized_header")?,
            finality_branch: object.branch("finality_branch")?,
            sync_aggregate: object.decode("sync_aggregate")?,
            signature_slot: object.uint("signature_slot")?,
        })
    }
}

impl<H: LightClientHeader> LightClientData for LightClientUpdate<H> {
    fn attested_beacon(&self) -> &BeaconBlockHeader {
        self.attested_header.beacon()
    }

    fn finalized_beacon(&self) -> Option<&BeaconBlockHeader> {
        Some(self.finalized_header.beacon())
    }
}

/// A light client finality update
#[serde_as]
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientFinalityUpdate<H: LightClientHeader> {
    /// Header attested to by the sync committee
    pub attested_header: H,
    /// Finalized header corresponding to `attested_header.state_root`
    pub finalized_header: H,
    /// Branch of the finalized header
    pub finality_branch: Branch<FinalityBranchDepth>,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

impl<H: LightClientHeader> JsonCodec for LightClientFinalityUpdate<H> {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            attested_header: object.decode("attested_header")?,
            finalized_header: object.decode("finalized_header")?,
            finality_branch: object.branch("finality_branch")?,
            sync_aggregate: object.decode("sync_aggregate")?,
            signature_slot: object.uint("signature_slot")?,
        })
    }
}

impl<H: LightClientHeader> LightClientData for LightClientFinalityUpdate<H> {
    fn attested_beacon(&self) -> &BeaconBlockHeader {
        self.attested_header.beacon()
    }

    fn finalized_beacon(&self) -> Option<&BeaconBlockHeader> {
        Some(self.finalized_header.beacon())
    }
}

/// A light client optimistic update
#[serde_as]
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientOptimisticUpdate<H: LightClientHeader> {
    /// Header attested to by the sync committee
    pub attested_header: H,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

impl<H: LightClientHeader> JsonCodec for LightClientOptimisticUpdate<H> {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            attested_header: object.decode("attested_header")?,
            sync_aggregate: object.decode("sync_aggregate")?,
            signature_slot: object.uint("signature_slot")?,
        })
    }
}

impl<H: LightClientHeader> LightClientData for LightClientOptimisticUpdate<H> {
    fn attested_beacon(&self) -> &BeaconBlockHeader {
        self.attested_header.beacon()
    }
}
