//! The HTTP client for a single beacon node, and the decoding of its responses.

pub mod client;
pub mod error;
pub mod negotiation;
pub mod response;
