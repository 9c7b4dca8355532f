//! Command line interface and configuration of the fetcher.

mod cmd;
pub mod config;

pub use cmd::*;
pub use config::FetcherConfig;
