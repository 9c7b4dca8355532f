//! BLS key and signature types.

use alloy_primitives::FixedBytes;

/// Byte length of a compressed BLS public key.
pub const BLS_PUBLIC_KEY_BYTES_LEN: usize = 48;
/// Byte length of a compressed BLS signature.
pub const BLS_SIGNATURE_BYTES_LEN: usize = 96;

/// A compressed BLS public key. Carried, never verified.
pub type BlsPublicKey = FixedBytes<BLS_PUBLIC_KEY_BYTES_LEN>;
/// A compressed BLS signature. Carried, never verified.
pub type BlsSignature = FixedBytes<BLS_SIGNATURE_BYTES_LEN>;
