//! Light client events of the beacon node event stream (`/eth/v1/events`).

use super::versioned::{VersionedLightClientFinalityUpdate, VersionedLightClientOptimisticUpdate};
use crate::error::LightClientError;

/// Event name of a new finality update.
pub const FINALITY_UPDATE_TOPIC: &str = "light_client_finality_update";
/// Event name of a new optimistic update.
pub const OPTIMISTIC_UPDATE_TOPIC: &str = "light_client_optimistic_update";

/// A light client event pushed by a beacon node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum LightClientEvent {
    /// A new finality update
    FinalityUpdate(VersionedLightClientFinalityUpdate),
    /// A new optimistic update
    OptimisticUpdate(VersionedLightClientOptimisticUpdate),
}

impl LightClientEvent {
    /// Decodes the `data` of a server-sent event named `event`.
    ///
    /// Returns `None` for events that carry no light client data, and for light client events
    /// without a payload.
    ///
    /// # Errors
    /// Returns an error if the payload of a light client event fails to decode.
    pub fn from_sse(event: &str, data: &[u8]) -> Result<Option<Self>, LightClientError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match event {
            FINALITY_UPDATE_TOPIC => VersionedLightClientFinalityUpdate::from_event(data)
                .map(|u| Some(Self::FinalityUpdate(u))),
            OPTIMISTIC_UPDATE_TOPIC => VersionedLightClientOptimisticUpdate::from_event(data)
                .map(|u| Some(Self::OptimisticUpdate(u))),
            _ => Ok(None),
        }
    }

    /// Returns the event name.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::FinalityUpdate(_) => FINALITY_UPDATE_TOPIC,
            Self::OptimisticUpdate(_) => OPTIMISTIC_UPDATE_TOPIC,
        }
    }
}
