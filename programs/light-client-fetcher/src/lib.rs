//! Fetches light client data from a set of beacon nodes and prints it as canonical JSON.

#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

pub mod cli;
pub mod fetch;
pub mod observability;
