#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EthereumUtilsError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    #[error("expected {expected} bytes, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },
}
