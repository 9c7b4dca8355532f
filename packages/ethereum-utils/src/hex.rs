use alloy_primitives::hex;

use crate::error::EthereumUtilsError;

/// Renders `data` as `0x`-prefixed lowercase hex. Empty input renders as `0x`.
pub fn to_hex<T: AsRef<[u8]>>(data: T) -> String {
    format!("0x{}", hex::encode(data.as_ref()))
}

/// Strips a single leading `0x`, if present.
pub fn strip_0x_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Decodes a hex string with an optional `0x` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>, EthereumUtilsError> {
    hex::decode(strip_0x_prefix(s)).map_err(|e| EthereumUtilsError::InvalidHex(e.to_string()))
}

/// Decodes a hex string with an optional `0x` prefix into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], EthereumUtilsError> {
    let bytes = decode(s)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| EthereumUtilsError::InvalidHexLength {
        expected: N,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([0xab, 0x01]), "0xab01");
        assert_eq!(to_hex([]), "0x");
    }

    #[test]
    fn test_decode_accepts_optional_prefix() {
        assert_eq!(decode("0xc648").unwrap(), vec![0xc6, 0x48]);
        assert_eq!(decode("c648").unwrap(), vec![0xc6, 0x48]);
        assert_eq!(decode("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert!(matches!(
            decode("0xzz"),
            Err(EthereumUtilsError::InvalidHex(_))
        ));
        assert!(matches!(decode("0xabc"), Err(EthereumUtilsError::InvalidHex(_))));
    }

    #[test]
    fn test_decode_fixed() {
        assert_eq!(decode_fixed::<2>("0x0102").unwrap(), [1, 2]);
        assert_eq!(
            decode_fixed::<4>("0x0102"),
            Err(EthereumUtilsError::InvalidHexLength {
                expected: 4,
                actual: 2
            })
        );
    }
}
