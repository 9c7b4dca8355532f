//! Wire codecs shared by the light client records.

pub mod json;

pub use json::{JsonCodec, JsonObject};
