//! This module defines constants related to merkle trees in the Ethereum consensus.

use ssz_types::typenum::{U4, U5, U6};

// https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#constants
/// `get_generalized_index(BeaconState, 'finalized_checkpoint', 'root')` (= 105)
pub const FINALIZED_ROOT_GINDEX: u64 = 105;
/// `get_generalized_index(BeaconState, 'current_sync_committee')` (= 54)
pub const CURRENT_SYNC_COMMITTEE_GINDEX: u64 = 54;
/// `get_generalized_index(BeaconState, 'next_sync_committee')` (= 55)
pub const NEXT_SYNC_COMMITTEE_GINDEX: u64 = 55;

// https://github.com/ethereum/consensus-specs/blob/dev/specs/capella/light-client/sync-protocol.md#constants
/// `get_generalized_index(BeaconBlockBody, 'execution_payload')` (= 25)
pub const EXECUTION_PAYLOAD_GINDEX: u64 = 25;

/// Number of roots in a finality branch.
pub const FINALITY_BRANCH_DEPTH: usize = floorlog2(FINALIZED_ROOT_GINDEX);
/// Number of roots in a current sync committee branch.
pub const CURRENT_SYNC_COMMITTEE_BRANCH_DEPTH: usize = floorlog2(CURRENT_SYNC_COMMITTEE_GINDEX);
/// Number of roots in a next sync committee branch.
pub const NEXT_SYNC_COMMITTEE_BRANCH_DEPTH: usize = floorlog2(NEXT_SYNC_COMMITTEE_GINDEX);
/// Number of roots in an execution branch.
pub const EXECUTION_BRANCH_DEPTH: usize = floorlog2(EXECUTION_PAYLOAD_GINDEX);

/// Type level [`FINALITY_BRANCH_DEPTH`].
pub type FinalityBranchDepth = U6;
/// Type level [`CURRENT_SYNC_COMMITTEE_BRANCH_DEPTH`].
pub type CurrentSyncCommitteeBranchDepth = U5;
/// Type level [`NEXT_SYNC_COMMITTEE_BRANCH_DEPTH`].
pub type NextSyncCommitteeBranchDepth = U5;
/// Type level [`EXECUTION_BRANCH_DEPTH`].
pub type ExecutionBranchDepth = U4;

/// Convenience function safely to call [`u64::ilog2`] and convert the result into a usize.
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
#[must_use]
pub const fn floorlog2(n: u64) -> usize {
    // conversion is safe since usize is either 32 or 64 bits as per cfg above
    n.ilog2() as usize
}

#[cfg(test)]
mod test {
    use ssz_types::typenum::Unsigned;

    use super::*;

    #[test]
    fn test_branch_depths() {
        assert_eq!(FINALITY_BRANCH_DEPTH, 6);
        assert_eq!(CURRENT_SYNC_COMMITTEE_BRANCH_DEPTH, 5);
        assert_eq!(NEXT_SYNC_COMMITTEE_BRANCH_DEPTH, 5);
        assert_eq!(EXECUTION_BRANCH_DEPTH, 4);
    }

    #[test]
    fn test_type_level_depths_match() {
        assert_eq!(FinalityBranchDepth::USIZE, FINALITY_BRANCH_DEPTH);
        assert_eq!(
            CurrentSyncCommitteeBranchDepth::USIZE,
            CURRENT_SYNC_COMMITTEE_BRANCH_DEPTH
        );
        assert_eq!(
            NextSyncCommitteeBranchDepth::USIZE,
            NEXT_SYNC_COMMITTEE_BRANCH_DEPTH
        );
        assert_eq!(ExecutionBranchDepth::USIZE, EXECUTION_BRANCH_DEPTH);
    }
}
