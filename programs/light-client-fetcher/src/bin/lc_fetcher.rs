use clap::Parser;
use ethereum_apis::multi::MultiBeaconClient;
use light_client_fetcher::{
    cli::{FetcherCli, FetcherConfig},
    fetch::{check_preset, fetch},
    observability::init_subscriber,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = FetcherCli::parse();
    let config = FetcherConfig::from_file(cli.command.config())?;

    init_subscriber(config.log_level())?;

    let client = MultiBeaconClient::from_config(&config.beacon)?;
    info!(
        backends = ?client.backend_names().collect::<Vec<_>>(),
        timeout_ms = config.beacon.backend_timeout_ms,
        "Light client fetcher started"
    );

    let cancellation = client.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending requests");
            cancellation.cancel();
        }
    });

    let spec = check_preset(&client).await?;
    let output = fetch(&client, &spec, &cli.command.request()).await?;
    println!("{output}");

    Ok(())
}
