#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

pub mod codec;
pub mod consensus;
pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
