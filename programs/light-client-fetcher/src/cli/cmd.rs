//! Defines the command line interface for the fetcher.
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::fetch::Request;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "lc_fetcher",
    version,
    about = "Light client fetcher - Ethereum sync committee data from several beacon nodes",
    long_about = "Fetches light client bootstraps and updates from a set of redundant beacon nodes.\nThe first node to answer decides; the result is printed as canonical JSON."
)]
/// The command line interface for the fetcher.
pub struct FetcherCli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands for the fetcher.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetches the bootstrap for a block.
    Bootstrap(bootstrap::Args),

    /// Fetches the updates for a range of sync committee periods.
    Updates(updates::Args),

    /// Fetches the latest finality update.
    FinalityUpdate(ConfigArgs),

    /// Fetches the latest optimistic update.
    OptimisticUpdate(ConfigArgs),
}

impl Commands {
    /// Returns the configuration file of the subcommand.
    #[must_use]
    pub fn config(&self) -> &Path {
        match self {
            Self::Bootstrap(args) => &args.config.config,
            Self::Updates(args) => &args.config.config,
            Self::FinalityUpdate(args) | Self::OptimisticUpdate(args) => &args.config,
        }
    }

    /// Returns the request the subcommand makes.
    #[must_use]
    pub fn request(&self) -> Request {
        match self {
            Self::Bootstrap(args) => Request::Bootstrap {
                block_id: args.block_id.clone(),
            },
            Self::Updates(args) => Request::Updates {
                start_period: args.start_period,
                count: args.count,
            },
            Self::FinalityUpdate(_) => Request::FinalityUpdate,
            Self::OptimisticUpdate(_) => Request::OptimisticUpdate,
        }
    }
}

/// The arguments shared by every subcommand.
#[derive(Clone, Debug, Parser)]
pub struct ConfigArgs {
    /// The configuration file for the fetcher.
    #[clap(long)]
    pub config: PathBuf,
}

/// The arguments for the bootstrap subcommand.
pub mod bootstrap {
    use super::{ConfigArgs, Parser};

    /// The arguments for the bootstrap subcommand.
    #[derive(Clone, Debug, Parser)]
    pub struct Args {
        /// The block root, or an alias such as `finalized`.
        pub block_id: String,

        #[clap(flatten)]
        #[allow(missing_docs)]
        pub config: ConfigArgs,
    }
}

/// The arguments for the updates subcommand.
pub mod updates {
    use super::{ConfigArgs, Parser};

    /// The arguments for the updates subcommand.
    #[derive(Clone, Debug, Parser)]
    pub struct Args {
        /// The first sync committee period. Defaults to the period of the latest finalized
        /// header.
        #[clap(long)]
        pub start_period: Option<u64>,

        /// The number of periods to fetch.
        #[clap(long, default_value_t = 1)]
        pub count: u64,

        #[clap(flatten)]
        #[allow(missing_docs)]
        pub config: ConfigArgs,
    }
}
