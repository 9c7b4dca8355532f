//! This module defines the consensus fork tag carried by versioned light client data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A consensus fork, as named by the `Eth-Consensus-Version` header and the
/// `version` field of beacon api responses.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ForkVersion {
    /// The genesis fork. It predates light client support.
    Phase0,
    /// The altair fork, which introduced sync committees.
    Altair,
    /// The bellatrix fork (the merge). Reuses the altair light client shapes.
    Bellatrix,
    /// The capella fork, which added the execution payload header to light client headers.
    Capella,
    /// The deneb fork, which added blob gas fields to the execution payload header.
    Deneb,
}

impl ForkVersion {
    /// All known forks, oldest first.
    pub const ALL: [Self; 5] = [
        Self::Phase0,
        Self::Altair,
        Self::Bellatrix,
        Self::Capella,
        Self::Deneb,
    ];

    /// Returns the lowercase fork name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phase0 => "phase0",
            Self::Altair => "altair",
            Self::Bellatrix => "bellatrix",
            Self::Capella => "capella",
            Self::Deneb => "deneb",
        }
    }

    /// Returns whether light client data exists at this fork.
    #[must_use]
    pub const fn has_light_client_data(self) -> bool {
        !matches!(self, Self::Phase0)
    }
}

impl fmt::Display for ForkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a fork name that is not known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fork version `{0}`")]
pub struct UnknownForkVersion(pub String);

impl FromStr for ForkVersion {
    type Err = UnknownForkVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fork| fork.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownForkVersion(s.to_string()))
    }
}
