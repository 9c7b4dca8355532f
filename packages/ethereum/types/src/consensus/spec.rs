//! This module defines types related to Spec.

use ethereum_utils::slot::compute_sync_committee_period_at_slot;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// The spec type, returned from the beacon api.
///
/// Only the preset values the light client endpoints depend on are kept; the rest of the
/// response is ignored.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Spec {
    /// The number of seconds per slot.
    #[serde_as(as = "DisplayFromStr")]
    pub seconds_per_slot: u64,
    /// The number of slots per epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub slots_per_epoch: u64,
    /// The number of epochs per sync committee period.
    #[serde_as(as = "DisplayFromStr")]
    pub epochs_per_sync_committee_period: u64,
    /// The size of the sync committee.
    #[serde_as(as = "DisplayFromStr")]
    pub sync_committee_size: u64,
}

impl Spec {
    /// Returns the number of slots in a sync committee period.
    #[must_use]
    pub const fn period(&self) -> u64 {
        self.epochs_per_sync_committee_period
            .saturating_mul(self.slots_per_epoch)
    }

    /// Returns the sync committee period containing `slot`.
    #[must_use]
    pub fn sync_committee_period_at_slot(&self, slot: u64) -> u64 {
        compute_sync_committee_period_at_slot(
            self.slots_per_epoch,
            self.epochs_per_sync_committee_period,
            slot,
        )
    }
}
