/// Returns the epoch at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_epoch_at_slot)
pub fn compute_epoch_at_slot(slots_per_epoch: u64, slot: u64) -> u64 {
    slot / slots_per_epoch
}

/// Returns the sync committee period at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#compute_sync_committee_period_at_slot)
pub fn compute_sync_committee_period_at_slot(
    slots_per_epoch: u64,
    epochs_per_sync_committee_period: u64,
    slot: u64,
) -> u64 {
    compute_epoch_at_slot(slots_per_epoch, slot) / epochs_per_sync_committee_period
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sync_committee_period_at_slot() {
        // mainnet: 32 slots per epoch, 256 epochs per period
        assert_eq!(compute_sync_committee_period_at_slot(32, 256, 0), 0);
        assert_eq!(compute_sync_committee_period_at_slot(32, 256, 8191), 0);
        assert_eq!(compute_sync_committee_period_at_slot(32, 256, 8192), 1);
        assert_eq!(compute_sync_committee_period_at_slot(32, 256, 4_943_744), 603);
    }
}
