//! Shared definition of the per-fork execution payload headers.
//!
//! Capella and Deneb headers differ only by trailing `u64` fields, so both are generated
//! from [`execution_payload_header!`].

use alloy_primitives::{hex, Address};
use serde::Serializer;
use ssz_types::{typenum::U32, VariableList};

/// Maximum byte length of `extra_data`.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;
/// Type level [`MAX_EXTRA_DATA_BYTES`].
pub type MaxExtraDataBytes = U32;

/// The `extra_data` of an execution payload header.
pub type ExtraData = VariableList<u8, MaxExtraDataBytes>;

/// Renders an address with its EIP-55 checksum, as the beacon api does.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

/// Renders `extra_data` as a `0x` prefixed hex string.
pub fn serialize_extra_data<S: Serializer>(extra_data: &ExtraData, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_prefixed(&extra_data[..]))
}

/// Defines an execution payload header with the fields common to all forks followed by
/// the given fork-specific `u64` fields, together with its JSON codec.
macro_rules! execution_payload_header {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                pub $extra:ident: u64,
            )*
        }
    ) => {
        $(#[$meta])*
        #[serde_with::serde_as]
        #[derive(serde::Serialize, PartialEq, Eq, Clone, Debug, ssz_derive::Encode, ssz_derive::Decode)]
        pub struct $name {
            /// The parent hash of the execution payload header
            pub parent_hash: alloy_primitives::B256,
            /// Block fee recipient
            #[serde(serialize_with = "crate::consensus::execution_payload::serialize_checksummed")]
            pub fee_recipient: alloy_primitives::Address,
            /// The state root
            pub state_root: alloy_primitives::B256,
            /// The root of the receipts trie
            pub receipts_root: alloy_primitives::B256,
            /// The logs bloom filter
            pub logs_bloom: alloy_primitives::Bloom,
            /// The previous Randao value, used to compute the randomness on the execution layer.
            pub prev_randao: alloy_primitives::B256,
            /// The block number of the execution payload
            #[serde_as(as = "serde_with::DisplayFromStr")]
            pub block_number: u64,
            /// Execution block gas limit
            #[serde_as(as = "serde_with::DisplayFromStr")]
            pub gas_limit: u64,
            /// Execution block gas used
            #[serde_as(as = "serde_with::DisplayFromStr")]
            pub gas_used: u64,
            /// The timestamp of the execution payload
            #[serde_as(as = "serde_with::DisplayFromStr")]
            pub timestamp: u64,
            /// The extra data of the execution payload
            #[serde(serialize_with = "crate::consensus::execution_payload::serialize_extra_data")]
            pub extra_data: $crate::consensus::execution_payload::ExtraData,
            /// Block base fee per gas
            #[serde_as(as = "serde_with::DisplayFromStr")]
            pub base_fee_per_gas: alloy_primitives::U256,
            /// The block hash
            pub block_hash: alloy_primitives::B256,
            /// The root of the transactions trie
            pub transactions_root: alloy_primitives::B256,
            /// The root of the withdrawals trie
            pub withdrawals_root: alloy_primitives::B256,
            $(
                $(#[doc = $doc])*
                #[serde_as(as = "serde_with::DisplayFromStr")]
                pub $extra: u64,
            )*
        }

        impl $crate::codec::JsonCodec for $name {
            fn from_json_value_at(
                value: &serde_json::Value,
                path: &str,
            ) -> Result<Self, $crate::error::LightClientError> {
                let object = $crate::codec::JsonObject::new(value, path)?;
                Ok(Self {
                    parent_hash: object.fixed_bytes("parent_hash")?,
                    fee_recipient: alloy_primitives::Address::new(
                        object.fixed_bytes::<20>("fee_recipient")?.0,
                    ),
                    state_root: object.fixed_bytes("state_root")?,
                    receipts_root: object.fixed_bytes("receipts_root")?,
                    logs_bloom: alloy_primitives::Bloom::new(
                        object.fixed_bytes::<256>("logs_bloom")?.0,
                    ),
                    prev_randao: object.fixed_bytes("prev_randao")?,
                    block_number: object.uint("block_number")?,
                    gas_limit: object.uint("gas_limit")?,
                    gas_used: object.uint("gas_used")?,
                    timestamp: object.uint("timestamp")?,
                    extra_data: object.byte_list("extra_data")?,
                    base_fee_per_gas: object.u256("base_fee_per_gas")?,
                    block_hash: object.fixed_bytes("block_hash")?,
                    transactions_root: object.fixed_bytes("transactions_root")?,
                    withdrawals_root: object.fixed_bytes("withdrawals_root")?,
                    $($extra: object.uint(stringify!($extra))?,)*
                })
            }
        }

        impl $crate::consensus::light_client_header::ExecutionHeader for $name {
            fn block_number(&self) -> u64 {
                self.block_number
            }
        }
    };
}

pub(crate) use execution_payload_header;

#[cfg(test)]
mod test {
    use ssz_types::typenum::Unsigned;

    use super::*;

    #[test]
    fn test_extra_data_hex() {
        assert_eq!(MaxExtraDataBytes::USIZE, MAX_EXTRA_DATA_BYTES);

        let mut serializer = serde_json::Serializer::new(Vec::new());
        serialize_extra_data(&ExtraData::new(vec![0xc6, 0x48]).unwrap(), &mut serializer).unwrap();
        assert_eq!(serializer.into_inner(), br#""0xc648""#);

        let mut serializer = serde_json::Serializer::new(Vec::new());
        serialize_extra_data(&ExtraData::default(), &mut serializer).unwrap();
        assert_eq!(serializer.into_inner(), br#""0x""#);
    }
}
