//! Light client types of the capella fork.

use super::{
    bootstrap, execution_payload::execution_payload_header,
    light_client_header::ExecutionLightClientHeader, update,
};

execution_payload_header! {
    /// Header to track the execution block
    pub struct ExecutionPayloadHeader {}
}

/// The header of a capella light client
pub type LightClientHeader = ExecutionLightClientHeader<ExecutionPayloadHeader>;
/// The capella light client bootstrap
pub type LightClientBootstrap = bootstrap::LightClientBootstrap<LightClientHeader>;
/// The capella light client update
pub type LightClientUpdate = update::LightClientUpdate<LightClientHeader>;
/// The capella light client finality update
pub type LightClientFinalityUpdate = update::LightClientFinalityUpdate<LightClientHeader>;
/// The capella light client optimistic update
pub type LightClientOptimisticUpdate = update::LightClientOptimisticUpdate<LightClientHeader>;
