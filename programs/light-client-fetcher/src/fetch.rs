//! Runs one light client request against the configured beacon nodes.

use anyhow::{Context, Result};
use ethereum_apis::multi::{provider::LightClientProvider, MultiBeaconClient};
use ethereum_types::consensus::{spec::Spec, sync_committee::SYNC_COMMITTEE_SIZE};
use serde::Serialize;
use tracing::{debug, info};

/// A light client request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// The bootstrap for a block
    Bootstrap {
        /// Forwarded verbatim to the beacon nodes
        block_id: String,
    },
    /// The updates for a range of periods
    Updates {
        /// The first period, or the period of the latest finalized header if unset
        start_period: Option<u64>,
        /// The number of periods
        count: u64,
    },
    /// The latest finality update
    FinalityUpdate,
    /// The latest optimistic update
    OptimisticUpdate,
}

/// Fetches the chain spec and makes sure its sync committee size matches the compiled preset.
///
/// # Errors
/// Returns an error if no backend serves the chain spec or the presets differ.
pub async fn check_preset<P: LightClientProvider>(client: &MultiBeaconClient<P>) -> Result<Spec> {
    let spec = client.spec().await.context("failed to fetch the chain spec")?;
    anyhow::ensure!(
        spec.sync_committee_size == SYNC_COMMITTEE_SIZE as u64,
        "beacon nodes use a sync committee of {} members, expected {}",
        spec.sync_committee_size,
        SYNC_COMMITTEE_SIZE
    );
    anyhow::ensure!(
        spec.period() > 0,
        "beacon nodes report a sync committee period of 0 slots"
    );
    debug!(
        slots_per_epoch = spec.slots_per_epoch,
        epochs_per_sync_committee_period = spec.epochs_per_sync_committee_period,
        "chain spec checked"
    );
    Ok(spec)
}

/// Runs `request` and renders the result as canonical JSON.
///
/// Records render as `{"version":...,"data":...}`, updates as a list of those, and "no data"
/// as `null`.
///
/// # Errors
/// Returns an error if the request fails on every backend, a backend serves an unusable
/// response, or the start period of an updates request cannot be derived.
pub async fn fetch<P: LightClientProvider>(
    client: &MultiBeaconClient<P>,
    spec: &Spec,
    request: &Request,
) -> Result<String> {
    match request {
        Request::Bootstrap { block_id } => {
            let bootstrap = client.light_client_bootstrap(block_id).await?;
            info!(
                version = %bootstrap.version(),
                slot = bootstrap.attested_beacon().slot,
                "fetched bootstrap"
            );
            render(&bootstrap)
        }
        Request::Updates {
            start_period,
            count,
        } => {
            let start_period = match start_period {
                Some(period) => *period,
                None => latest_finalized_period(client, spec).await?,
            };
            let updates = client.light_client_updates(start_period, *count).await?;
            info!(
                start_period,
                count,
                fetched = updates.as_ref().map_or(0, Vec::len),
                "fetched updates"
            );
            render(&updates)
        }
        Request::FinalityUpdate => render(&client.light_client_finality_update().await?),
        Request::OptimisticUpdate => render(&client.light_client_optimistic_update().await?),
    }
}

async fn latest_finalized_period<P: LightClientProvider>(
    client: &MultiBeaconClient<P>,
    spec: &Spec,
) -> Result<u64> {
    let update = client
        .light_client_finality_update()
        .await?
        .context("no finality update available to derive the start period from")?;
    let finalized = update
        .finalized_beacon()
        .context("finality update carries no finalized header")?;

    let period = spec.sync_committee_period_at_slot(finalized.slot);
    debug!(slot = finalized.slot, period, "derived start period");
    Ok(period)
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("failed to render result")
}
