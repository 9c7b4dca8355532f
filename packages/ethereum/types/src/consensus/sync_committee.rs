//! This module defines types related to the sync committee.

use alloy_primitives::FixedBytes;
use serde::Serialize;
use serde_json::Value;
use ssz_derive::{Decode, Encode};
use ssz_types::{typenum::U512, FixedVector};

use super::bls::{BlsPublicKey, BlsSignature};
use crate::{
    codec::{JsonCodec, JsonObject},
    error::LightClientError,
};

/// Number of validators in a sync committee (mainnet preset).
pub const SYNC_COMMITTEE_SIZE: usize = 512;
/// Type level [`SYNC_COMMITTEE_SIZE`].
pub type SyncCommitteeSize = U512;
/// Byte length of the sync committee participation bit vector.
pub const SYNC_COMMITTEE_BITS_LEN: usize = SYNC_COMMITTEE_SIZE / 8;

/// The sync committee
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
#[allow(clippy::module_name_repetitions)]
pub struct SyncCommittee {
    /// The public keys of the committee members
    pub pubkeys: FixedVector<BlsPublicKey, SyncCommitteeSize>,
    /// The aggregate public key of the committee
    pub aggregate_pubkey: BlsPublicKey,
}

impl JsonCodec for SyncCommittee {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            pubkeys: object.fixed_bytes_vector("pubkeys")?,
            aggregate_pubkey: object.fixed_bytes("aggregate_pubkey")?,
        })
    }
}

/// The sync committee aggregate
#[derive(Serialize, PartialEq, Eq, Clone, Debug, Encode, Decode)]
pub struct SyncAggregate {
    /// The participation bits of the sync committee
    pub sync_committee_bits: FixedBytes<SYNC_COMMITTEE_BITS_LEN>,
    /// The aggregate signature of the participating members
    pub sync_committee_signature: BlsSignature,
}

impl SyncAggregate {
    /// Returns the number of committee members that signed.
    #[must_use]
    pub fn num_sync_committee_participants(&self) -> usize {
        self.sync_committee_bits
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }
}

impl JsonCodec for SyncAggregate {
    fn from_json_value_at(value: &Value, path: &str) -> Result<Self, LightClientError> {
        let object = JsonObject::new(value, path)?;
        Ok(Self {
            sync_committee_bits: object.fixed_bytes("sync_committee_bits")?,
            sync_committee_signature: object.fixed_bytes("sync_committee_signature")?,
        })
    }
}
