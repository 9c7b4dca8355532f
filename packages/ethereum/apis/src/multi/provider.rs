//! The light client operations a single beacon node connection offers.

use std::future::Future;

use ethereum_types::consensus::{
    spec::Spec,
    versioned::{
        VersionedLightClientBootstrap, VersionedLightClientFinalityUpdate,
        VersionedLightClientOptimisticUpdate, VersionedLightClientUpdate,
    },
};

use crate::beacon_api::error::BeaconApiClientError;

/// A connection able to serve the light client endpoints.
///
/// `Ok(None)` means the node was asked and has nothing to serve yet, which is not an error.
pub trait LightClientProvider: Send + Sync + 'static {
    /// Fetches the preset values of the chain.
    fn get_spec(&self) -> impl Future<Output = Result<Spec, BeaconApiClientError>> + Send;

    /// Fetches the bootstrap for `block_id`, forwarded verbatim to the node.
    fn get_bootstrap(
        &self,
        block_id: &str,
    ) -> impl Future<Output = Result<VersionedLightClientBootstrap, BeaconApiClientError>> + Send;

    /// Fetches at most `count` updates starting at sync committee period `start_period`.
    fn get_updates(
        &self,
        start_period: u64,
        count: u64,
    ) -> impl Future<Output = Result<Option<Vec<VersionedLightClientUpdate>>, BeaconApiClientError>>
           + Send;

    /// Fetches the latest finality update.
    fn get_finality_update(
        &self,
    ) -> impl Future<Output = Result<Option<VersionedLightClientFinalityUpdate>, BeaconApiClientError>>
           + Send;

    /// Fetches the latest optimistic update.
    fn get_optimistic_update(
        &self,
    ) -> impl Future<
        Output = Result<Option<VersionedLightClientOptimisticUpdate>, BeaconApiClientError>,
    > + Send;
}
