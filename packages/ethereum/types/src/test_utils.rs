//! Canonical JSON fixtures for tests, taken from mainnet-shaped beacon api responses.

/// Builders for canonical (compact, fixed field order, lowercase hex) JSON records.
pub mod fixtures {
    use crate::consensus::{fork::ForkVersion, sync_committee::SYNC_COMMITTEE_SIZE};

    /// An attested beacon block header.
    pub const BEACON_HEADER_JSON: &str = r#"{"slot":"4943744","proposer_index":"222870","parent_root":"0x0c594acb2c7ec3564590fd2feb6724cfcf786faf51fe2a284154516c2903c153","state_root":"0x237962d02698b2f5f37f3a7c43dfae0e2fe28e103225237bc7f09938c8527eaa","body_root":"0xff42d5726526628ce27c4ca89172ccf5c562adbfec64c22d494b6f8bd03dc034"}"#;

    /// A finalized beacon block header, two epochs behind [`BEACON_HEADER_JSON`].
    pub const FINALIZED_BEACON_HEADER_JSON: &str = r#"{"slot":"4943680","proposer_index":"41223","parent_root":"0x5b1f0e8d7bb1d4b1c2e1a6ad0a2b8e0d8c35df9b5a81c5fa3bd40ff2b1d1e3c4","state_root":"0x9a3e0c5f5d3b84e3f9f6c63f93b0f0b8d6e1b4a2c7f8e9d0a1b2c3d4e5f60718","body_root":"0x1d2c3b4a59687766554433221100ffeeddccbbaa99887766554433221100aabb"}"#;

    /// A capella execution payload header.
    pub const CAPELLA_EXECUTION_JSON: &str = r#"{"parent_hash":"0x17f4eeae822cc81533016678413443b95e34517e67f12b4a3a92ff6b66f972ef","fee_recipient":"0x58E809C71e4885cB7B3f1D5c793AB04eD239d779","state_root":"0x3d6e230e6eceb8f3db582777b1500b8b31b9d268339e7b32bba8d6f1311b211d","receipts_root":"0xea760203509bdde017a506b12c825976d12b04db7bce9eca9e1ed007056a3f36","logs_bloom":"0x0c803a8d3c6642adee3185bd914c599317d96487831dabda82461f65700b2528781bdadf785664f9d8b11c4ee1139dfeb056125d2abd67e379cabc6d58f1c3ea304b97cf17fcd8a4c53f4dedeaa041acce062fc8fbc88ffc111577db4a936378749f2fd82b4bfcb880821dd5cbefee984bc1ad116096a64a44a2aac8a1791a7ad3a53d91c584ac69a8973daed6daee4432a198c9935fa0e5c2a4a6ca78b821a5b046e571a5c0961f469d40e429066755fec611afe25b560db07f989933556ce0cea4070ca47677b007b4b9857fc092625f82c84526737dc98e173e34fe6e4d0f1a400fd994298b7c2fa8187331c333c415f0499836ff0eed5c762bf570e67b44","prev_randao":"0x76ff751467270668df463600d26dba58297a986e649bac84ea856712d4779c00","block_number":"2983837628677007840","gas_limit":"6738255228996962210","gas_used":"5573520557770513197","timestamp":"1744720080366521389","extra_data":"0xc648","base_fee_per_gas":"88770397543877639215846057887940126737648744594802753726778414602657613619599","block_hash":"0x42c294e902bfc9884c1ce5fef156d4661bb8f0ff488bface37f18c3e7be64b0f","transactions_root":"0x8457d0eb7611a621e7a094059f087415ffcfc91714fc184a1f3c48db06b4d08b","withdrawals_root":"0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"}"#;

    /// An execution branch.
    pub const EXECUTION_BRANCH_JSON: &str = r#"["0x65af40980fe7dfc2f8587fd1d75044f8adcf8e0e8b142363f5bf3bce21e66bb5","0x26648104944ae0085548cea356ebdd0c5c4b73aa440bcaf0c7b2821325b28f66","0xf97cbc51dd5b8ffffb73783e6938e3eee934448eaa08c9f50e136cb00635cf9f","0xf2adfbbfc2a4e45f01f90752b069b5fcd136b89dfa473dacbea52f6fefc3936c"]"#;

    /// A sync aggregate with two missing participants.
    pub const SYNC_AGGREGATE_JSON: &str = r#"{"sync_committee_bits":"0xfffffffffffbffffffffffffffffffffffffffffffffffff7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff","sync_committee_signature":"0x97e006ecbe9df2f082eb450e1c07ace045da0d4e367f453170bfb32911e72fc9f08237d348e99b3500531c8cba770fc119d844c22950c094d860cfa784ba237debe681e55875994a75c72689d9e289f72c8bb7559ae91b3788e5e769aee0705a"}"#;

    /// The signature slot used by every update fixture.
    pub const SIGNATURE_SLOT: u64 = 4_943_745;

    /// Returns a deneb execution payload header.
    #[must_use]
    pub fn deneb_execution_json() -> String {
        let capella = CAPELLA_EXECUTION_JSON.trim_end_matches('}');
        format!(r#"{capella},"blob_gas_used":"131072","excess_blob_gas":"0"}}"#)
    }

    /// Returns a branch of `depth` distinct roots derived from `seed`.
    #[must_use]
    pub fn branch_json(depth: usize, seed: u64) -> String {
        let roots = (0..depth as u64)
            .map(|i| format!(r#""0x{:064x}""#, seed * 1000 + i))
            .collect::<Vec<_>>();
        format!("[{}]", roots.join(","))
    }

    /// Returns a full sync committee.
    #[must_use]
    pub fn sync_committee_json() -> String {
        let pubkeys = (0..SYNC_COMMITTEE_SIZE)
            .map(|i| format!(r#""0x{:096x}""#, 0xa000_0000 + i))
            .collect::<Vec<_>>();
        format!(
            r#"{{"pubkeys":[{}],"aggregate_pubkey":"0x{:096x}"}}"#,
            pubkeys.join(","),
            0xbeef_u64
        )
    }

    /// Returns a light client header of the shape used at `fork` around `beacon`.
    ///
    /// # Panics
    /// Panics for phase0.
    #[must_use]
    pub fn header_json(fork: ForkVersion, beacon: &str) -> String {
        let execution = match fork {
            ForkVersion::Phase0 => panic!("phase0 has no light client header"),
            ForkVersion::Altair | ForkVersion::Bellatrix => return format!(r#"{{"beacon":{beacon}}}"#),
            ForkVersion::Capella => CAPELLA_EXECUTION_JSON.to_string(),
            ForkVersion::Deneb => deneb_execution_json(),
        };
        format!(r#"{{"beacon":{beacon},"execution":{execution},"execution_branch":{EXECUTION_BRANCH_JSON}}}"#)
    }

    /// Returns a bootstrap of the shape used at `fork`.
    #[must_use]
    pub fn bootstrap_json(fork: ForkVersion) -> String {
        format!(
            r#"{{"header":{},"current_sync_committee":{},"current_sync_committee_branch":{}}}"#,
            header_json(fork, BEACON_HEADER_JSON),
            sync_committee_json(),
            branch_json(5, 1),
        )
    }

    /// Returns an update of the shape used at `fork`.
    #[must_use]
    pub fn update_json(fork: ForkVersion) -> String {
        format!(
            r#"{{"attested_header":{},"next_sync_committee":{},"next_sync_committee_branch":{},"finalized_header":{},"finality_branch":{},"sync_aggregate":{SYNC_AGGREGATE_JSON},"signature_slot":"{SIGNATURE_SLOT}"}}"#,
            header_json(fork, BEACON_HEADER_JSON),
            sync_committee_json(),
            branch_json(5, 2),
            header_json(fork, FINALIZED_BEACON_HEADER_JSON),
            branch_json(6, 3),
        )
    }

    /// Returns a finality update of the shape used at `fork`.
    #[must_use]
    pub fn finality_update_json(fork: ForkVersion) -> String {
        format!(
            r#"{{"attested_header":{},"finalized_header":{},"finality_branch":{},"sync_aggregate":{SYNC_AGGREGATE_JSON},"signature_slot":"{SIGNATURE_SLOT}"}}"#,
            header_json(fork, BEACON_HEADER_JSON),
            header_json(fork, FINALIZED_BEACON_HEADER_JSON),
            branch_json(6, 3),
        )
    }

    /// Returns an optimistic update of the shape used at `fork`.
    #[must_use]
    pub fn optimistic_update_json(fork: ForkVersion) -> String {
        format!(
            r#"{{"attested_header":{},"sync_aggregate":{SYNC_AGGREGATE_JSON},"signature_slot":"{SIGNATURE_SLOT}"}}"#,
            header_json(fork, BEACON_HEADER_JSON),
        )
    }

    /// Wraps `data` in a beacon api response body tagged with `fork`.
    #[must_use]
    pub fn response_json(fork: ForkVersion, data: &str) -> String {
        format!(r#"{{"version":"{fork}","data":{data}}}"#)
    }
}
