//! Clients for the light client endpoints of the Ethereum Beacon API.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

pub mod beacon_api;
pub mod multi;
