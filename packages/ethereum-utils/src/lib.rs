//! Small helpers shared by the light client crates.

pub mod error;
pub mod hex;
pub mod slot;

#[macro_use]
pub mod ensure;
