//! Light client types of the deneb fork.

use super::{
    bootstrap, execution_payload::execution_payload_header,
    light_client_header::ExecutionLightClientHeader, update,
};

execution_payload_header! {
    /// Header to track the execution block
    pub struct ExecutionPayloadHeader {
        /// Blob gas used (new in Deneb)
        pub blob_gas_used: u64,
        /// Excess blob gas (new in Deneb)
        pub excess_blob_gas: u64,
    }
}

/// The header of a deneb light client
pub type LightClientHeader = ExecutionLightClientHeader<ExecutionPayloadHeader>;
/// The deneb light client bootstrap
pub type LightClientBootstrap = bootstrap::LightClientBootstrap<LightClientHeader>;
/// The deneb light client update
pub type LightClientUpdate = update::LightClientUpdate<LightClientHeader>;
/// The deneb light client finality update
pub type LightClientFinalityUpdate = update::LightClientFinalityUpdate<LightClientHeader>;
/// The deneb light client optimistic update
pub type LightClientOptimisticUpdate = update::LightClientOptimisticUpdate<LightClientHeader>;

#[cfg(test)]
mod test {
    use rstest::rstest;
    use serde_json::Value;
    use ssz::{Decode, Encode};

    use super::*;
    use crate::{codec::JsonCodec, error::LightClientError, test_utils::fixtures};

    #[test]
    fn test_execution_payload_header() {
        let json = fixtures::deneb_execution_json();
        let header = ExecutionPayloadHeader::from_json(json.as_bytes()).unwrap();

        assert_eq!(header.blob_gas_used, 131_072);
        assert_eq!(header.excess_blob_gas, 0);
        assert_eq!(String::from_utf8(header.to_json().unwrap()).unwrap(), json);

        let bytes = header.as_ssz_bytes();
        assert_eq!(bytes.len(), 584 + 2);
        assert_eq!(&bytes[436..440], &584_u32.to_le_bytes());
        assert_eq!(&bytes[568..576], &131_072_u64.to_le_bytes());
        assert_eq!(ExecutionPayloadHeader::from_ssz_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_capella_payload_is_not_a_deneb_payload() {
        let value: Value = serde_json::from_str(fixtures::CAPELLA_EXECUTION_JSON).unwrap();
        assert_eq!(
            ExecutionPayloadHeader::from_json_value(&value).unwrap_err(),
            LightClientError::MissingField("blob_gas_used".to_string())
        );

        let capella = super::super::capella::ExecutionPayloadHeader::from_json_value(&value)
            .unwrap()
            .as_ssz_bytes();
        assert!(ExecutionPayloadHeader::from_ssz_bytes(&capella).is_err());
    }

    #[rstest]
    #[case("blob_gas_used")]
    #[case("excess_blob_gas")]
    fn test_missing_blob_field(#[case] field: &str) {
        let mut value: Value = serde_json::from_str(&fixtures::deneb_execution_json()).unwrap();
        value.as_object_mut().unwrap().remove(field);

        assert_eq!(
            ExecutionPayloadHeader::from_json_value_at(&value, "attested_header.execution")
                .unwrap_err()
                .to_string(),
            format!("attested_header.execution.{field} missing")
        );
    }
}
