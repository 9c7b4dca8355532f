//! This module implements the `BeaconApiClient` to interact with the Ethereum Beacon API.

use ethereum_types::consensus::{
    spec::Spec,
    versioned::{
        BootstrapRecord, FinalityUpdateRecord, OptimisticUpdateRecord,
        VersionedLightClientBootstrap, VersionedLightClientFinalityUpdate,
        VersionedLightClientOptimisticUpdate, VersionedLightClientUpdate,
    },
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    error::{parse_error_body, BeaconApiClientError},
    negotiation::{decode_record, decode_updates},
    response::{Encoding, RawResponse, Response},
};
use crate::multi::provider::LightClientProvider;

const SPEC_PATH: &str = "/eth/v1/config/spec";
const LIGHT_CLIENT_BOOTSTRAP_PATH: &str = "/eth/v1/beacon/light_client/bootstrap";
const LIGHT_CLIENT_UPDATES_PATH: &str = "/eth/v1/beacon/light_client/updates";
const LIGHT_CLIENT_FINALITY_UPDATE_PATH: &str = "/eth/v1/beacon/light_client/finality_update";
const LIGHT_CLIENT_OPTIMISTIC_UPDATE_PATH: &str = "/eth/v1/beacon/light_client/optimistic_update";

/// The api client for interacting with the Beacon API
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct BeaconApiClient {
    client: Client,
    base_url: String,
    encoding: Encoding,
}

impl BeaconApiClient {
    /// Create new `BeaconApiClient`, asking for SSZ where the node supports it
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            encoding: Encoding::default(),
        }
    }

    /// Sets the encoding the client asks for
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Returns the base url of the node
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the Beacon spec
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn spec(&self) -> Result<Response<Spec>, BeaconApiClientError> {
        self.get_json(SPEC_PATH).await
    }

    /// Fetches the `LightClientBootstrap` for a given block id. A bootstrap the node does not
    /// have is an error.
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn light_client_bootstrap(
        &self,
        block_id: &str,
    ) -> Result<Response<VersionedLightClientBootstrap>, BeaconApiClientError> {
        let raw = self
            .get_raw(
                &format!("{LIGHT_CLIENT_BOOTSTRAP_PATH}/{block_id}"),
                self.encoding,
            )
            .await?;
        decode_record::<BootstrapRecord>(&raw)
    }

    /// Fetches Beacon light client updates for the sync committee periods
    /// `[start_period, start_period + count)`. The node may serve fewer than `count` updates,
    /// never more.
    /// # Errors
    /// Returns an error if the request fails, the response is not successful deserialized or
    /// it holds more than `count` updates
    pub async fn light_client_updates(
        &self,
        start_period: u64,
        count: u64,
    ) -> Result<Option<Response<Vec<VersionedLightClientUpdate>>>, BeaconApiClientError> {
        let Some(raw) = self
            .get_optional_raw(&format!(
                "{LIGHT_CLIENT_UPDATES_PATH}?start_period={start_period}&count={count}"
            ))
            .await?
        else {
            return Ok(None);
        };

        let response = decode_updates(&raw)?;
        let served = response.data.len();
        if u64::try_from(served).map_or(true, |served| served > count) {
            warn!(start_period, count, served, "node served too many updates");
            return Err(BeaconApiClientError::TooManyUpdates {
                requested: count,
                served,
            });
        }
        Ok(Some(response))
    }

    /// Fetches the latest Beacon light client finality update
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn finality_update(
        &self,
    ) -> Result<Option<Response<VersionedLightClientFinalityUpdate>>, BeaconApiClientError> {
        self.get_optional_raw(LIGHT_CLIENT_FINALITY_UPDATE_PATH)
            .await?
            .map(|raw| decode_record::<FinalityUpdateRecord>(&raw))
            .transpose()
    }

    /// Fetches the latest Beacon light client optimistic update
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn optimistic_update(
        &self,
    ) -> Result<Option<Response<VersionedLightClientOptimisticUpdate>>, BeaconApiClientError> {
        self.get_optional_raw(LIGHT_CLIENT_OPTIMISTIC_UPDATE_PATH)
            .await?
            .map(|raw| decode_record::<OptimisticUpdateRecord>(&raw))
            .transpose()
    }

    // Helper functions
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BeaconApiClientError> {
        let raw = self.get_raw(path, Encoding::Json).await?;
        Ok(serde_json::from_slice(&raw.body)?)
    }

    /// A 404 means the node has no data yet.
    async fn get_optional_raw(
        &self,
        path: &str,
    ) -> Result<Option<RawResponse>, BeaconApiClientError> {
        match self.get_raw(path, self.encoding).await {
            Ok(raw) => Ok(Some(raw)),
            Err(BeaconApiClientError::NotFound(not_found)) => {
                debug!(%path, %not_found, "no data");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_raw(
        &self,
        path: &str,
        encoding: Encoding,
    ) -> Result<RawResponse, BeaconApiClientError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(%url, accept = encoding.accept(), "get_raw");

        let res = self
            .client
            .get(url)
            .header(ACCEPT, encoding.accept())
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => {
                let mut raw = RawResponse {
                    content_type: res
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|value| value.to_str().ok())
                        .map(ToString::to_string),
                    ..Default::default()
                };
                for (name, value) in res.headers() {
                    if let Ok(value) = value.to_str() {
                        raw.insert_header(name.as_str(), value);
                    }
                }
                raw.body = res.bytes().await?.to_vec();

                debug!(
                    content_type = ?raw.content_type,
                    consensus_version = ?raw.consensus_version,
                    len = raw.body.len(),
                    "get_raw"
                );

                Ok(raw)
            }
            code @ StatusCode::NOT_FOUND => Err(BeaconApiClientError::NotFound(
                parse_error_body(code, &res.text().await?),
            )),
            code @ StatusCode::INTERNAL_SERVER_ERROR => Err(BeaconApiClientError::Internal(
                parse_error_body(code, &res.text().await?),
            )),
            code => Err(BeaconApiClientError::Other {
                code,
                text: res.text().await?,
            }),
        }
    }
}

impl LightClientProvider for BeaconApiClient {
    async fn get_spec(&self) -> Result<Spec, BeaconApiClientError> {
        Ok(self.spec().await?.data)
    }

    async fn get_bootstrap(
        &self,
        block_id: &str,
    ) -> Result<VersionedLightClientBootstrap, BeaconApiClientError> {
        Ok(self.light_client_bootstrap(block_id).await?.data)
    }

    async fn get_updates(
        &self,
        start_period: u64,
        count: u64,
    ) -> Result<Option<Vec<VersionedLightClientUpdate>>, BeaconApiClientError> {
        Ok(self
            .light_client_updates(start_period, count)
            .await?
            .map(|response| response.data))
    }

    async fn get_finality_update(
        &self,
    ) -> Result<Option<VersionedLightClientFinalityUpdate>, BeaconApiClientError> {
        Ok(self.finality_update().await?.map(|response| response.data))
    }

    async fn get_optimistic_update(
        &self,
    ) -> Result<Option<VersionedLightClientOptimisticUpdate>, BeaconApiClientError> {
        Ok(self.optimistic_update().await?.map(|response| response.data))
    }
}
