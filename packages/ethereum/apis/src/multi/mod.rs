//! A client spreading every light client request over several beacon nodes.
//!
//! Every backend is asked concurrently, each under its own timeout, and the first backend to
//! answer without an error decides the result, "no data" included. The remaining requests are
//! dropped. Connectivity errors (transport failures, timeouts, non-200 statuses) only count
//! once every backend has failed. Any other error means a backend served something this
//! client cannot decode, and fails the request right away.

pub mod config;
pub mod provider;

use std::{fmt, future::Future, time::Duration};

use ethereum_types::consensus::{
    spec::Spec,
    versioned::{
        VersionedLightClientBootstrap, VersionedLightClientFinalityUpdate,
        VersionedLightClientOptimisticUpdate, VersionedLightClientUpdate,
    },
};
use futures::{stream::FuturesUnordered, StreamExt};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use self::{config::MultiClientConfig, provider::LightClientProvider};
use crate::beacon_api::{client::BeaconApiClient, error::BeaconApiClientError};

/// The error type for the multi-backend client.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum MultiClientError {
    /// The client was built without backends
    #[error("at least one backend is required")]
    NoBackends,

    /// The cancellation token fired before any backend answered
    #[error("{operation} cancelled")]
    Cancelled {
        /// The operation in flight
        operation: &'static str,
    },

    /// A backend served a response that cannot be used
    #[error("backend {backend} failed: {source}")]
    Backend {
        /// The backend name
        backend: String,
        /// What went wrong
        source: BeaconApiClientError,
    },

    /// No backend could be reached
    #[error("all backends failed to {operation}: {}", BackendFailure::join(.failures))]
    AllBackendsFailed {
        /// The operation in flight
        operation: &'static str,
        /// The failure of every backend
        failures: Vec<BackendFailure>,
    },
}

/// The connectivity error of one backend.
#[derive(Debug)]
pub struct BackendFailure {
    /// The backend name
    pub backend: String,
    /// What went wrong
    pub error: BeaconApiClientError,
}

impl BackendFailure {
    fn join(failures: &[Self]) -> String {
        failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.error)
    }
}

struct Backend<P> {
    name: String,
    provider: P,
}

/// Presents several beacon node connections as one.
pub struct MultiBeaconClient<P: LightClientProvider = BeaconApiClient> {
    backends: Vec<Backend<P>>,
    backend_timeout: Duration,
    cancellation: CancellationToken,
}

impl MultiBeaconClient<BeaconApiClient> {
    /// Creates one [`BeaconApiClient`] per configured backend.
    ///
    /// # Errors
    /// Returns [`MultiClientError::NoBackends`] if the config lists no backend.
    pub fn from_config(config: &MultiClientConfig) -> Result<Self, MultiClientError> {
        let backends = config
            .backends
            .iter()
            .map(|backend| {
                (
                    backend.name.clone(),
                    BeaconApiClient::new(backend.url.trim().to_string())
                        .with_encoding(config.encoding),
                )
            })
            .collect();
        Self::new(backends, config.backend_timeout())
    }
}

impl<P: LightClientProvider> MultiBeaconClient<P> {
    /// Creates a client over named backends, each allowed `backend_timeout` per request.
    ///
    /// # Errors
    /// Returns [`MultiClientError::NoBackends`] if `backends` is empty.
    pub fn new(
        backends: Vec<(String, P)>,
        backend_timeout: Duration,
    ) -> Result<Self, MultiClientError> {
        if backends.is_empty() {
            return Err(MultiClientError::NoBackends);
        }
        Ok(Self {
            backends: backends
                .into_iter()
                .map(|(name, provider)| Backend { name, provider })
                .collect(),
            backend_timeout,
            cancellation: CancellationToken::new(),
        })
    }

    /// Uses `cancellation` to abort requests instead of a token of its own.
    #[must_use]
    pub fn with_cancellation_token(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Returns the token that aborts every request in flight once cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Returns the backend names, in configuration order.
    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(|backend| backend.name.as_str())
    }

    /// Fetches the preset values of the chain.
    ///
    /// # Errors
    /// See [`Self::dispatch`].
    pub async fn spec(&self) -> Result<Spec, MultiClientError> {
        self.dispatch("fetch spec", |provider| provider.get_spec())
            .await
    }

    /// Fetches the bootstrap for `block_id`.
    ///
    /// # Errors
    /// See [`Self::dispatch`].
    pub async fn light_client_bootstrap(
        &self,
        block_id: &str,
    ) -> Result<VersionedLightClientBootstrap, MultiClientError> {
        self.dispatch("fetch bootstrap", |provider| provider.get_bootstrap(block_id))
            .await
    }

    /// Fetches at most `count` updates starting at sync committee period `start_period`.
    ///
    /// # Errors
    /// See [`Self::dispatch`].
    pub async fn light_client_updates(
        &self,
        start_period: u64,
        count: u64,
    ) -> Result<Option<Vec<VersionedLightClientUpdate>>, MultiClientError> {
        self.dispatch("fetch updates", |provider| {
            provider.get_updates(start_period, count)
        })
        .await
    }

    /// Fetches the latest finality update.
    ///
    /// # Errors
    /// See [`Self::dispatch`].
    pub async fn light_client_finality_update(
        &self,
    ) -> Result<Option<VersionedLightClientFinalityUpdate>, MultiClientError> {
        self.dispatch("fetch finality update", |provider| {
            provider.get_finality_update()
        })
        .await
    }

    /// Fetches the latest optimistic update.
    ///
    /// # Errors
    /// See [`Self::dispatch`].
    pub async fn light_client_optimistic_update(
        &self,
    ) -> Result<Option<VersionedLightClientOptimisticUpdate>, MultiClientError> {
        self.dispatch("fetch optimistic update", |provider| {
            provider.get_optimistic_update()
        })
        .await
    }

    /// Runs `call` against every backend concurrently and returns the first answer that is
    /// not an error.
    ///
    /// # Errors
    /// - [`MultiClientError::Cancelled`] once the cancellation token fires.
    /// - [`MultiClientError::Backend`] as soon as a backend fails with anything but a
    ///   connectivity error.
    /// - [`MultiClientError::AllBackendsFailed`] if every backend failed to connect or timed out.
    #[instrument(skip(self, call))]
    pub async fn dispatch<'a, T, F, Fut>(
        &'a self,
        operation: &'static str,
        call: F,
    ) -> Result<T, MultiClientError>
    where
        F: Fn(&'a P) -> Fut,
        Fut: Future<Output = Result<T, BeaconApiClientError>>,
    {
        let backend_timeout = self.backend_timeout;
        let mut attempts = self
            .backends
            .iter()
            .map(|backend| {
                let attempt = timeout(backend_timeout, call(&backend.provider));
                async move {
                    let outcome = attempt
                        .await
                        .unwrap_or(Err(BeaconApiClientError::Timeout(backend_timeout)));
                    (backend.name.as_str(), outcome)
                }
            })
            .collect::<FuturesUnordered<_>>();

        let mut failures = Vec::new();
        loop {
            let next = tokio::select! {
                biased;
                () = self.cancellation.cancelled() => {
                    warn!(operation, "cancelled, dropping pending requests");
                    return Err(MultiClientError::Cancelled { operation });
                }
                next = attempts.next() => next,
            };
            let Some((backend, outcome)) = next else {
                break;
            };

            match outcome {
                Ok(value) => {
                    debug!(operation, backend, pending = attempts.len(), "backend answered");
                    return Ok(value);
                }
                Err(e) if e.is_connectivity() => {
                    warn!(operation, backend, error = %e, "backend unavailable");
                    failures.push(BackendFailure {
                        backend: backend.to_string(),
                        error: e,
                    });
                }
                Err(e) => {
                    error!(operation, backend, error = %e, "backend served an unusable response");
                    return Err(MultiClientError::Backend {
                        backend: backend.to_string(),
                        source: e,
                    });
                }
            }
        }

        error!(operation, failed = failures.len(), "all backends failed");
        Err(MultiClientError::AllBackendsFailed {
            operation,
            failures,
        })
    }
}
