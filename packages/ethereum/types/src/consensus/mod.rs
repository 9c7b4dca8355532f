//! This module contains the light client types of the beacon api, versioned per fork.

pub mod altair;
pub mod beacon_block;
pub mod bls;
pub mod bootstrap;
pub mod branch;
pub mod capella;
pub mod deneb;
pub mod event;
pub mod execution_payload;
pub mod fork;
pub mod light_client_header;
pub mod merkle;
pub mod spec;
pub mod sync_committee;
pub mod update;
pub mod versioned;
