//! This module defines merkle branches of a fixed depth.

use alloy_primitives::B256;
use ssz_types::FixedVector;

/// A merkle inclusion branch of exactly `N` roots.
pub type Branch<N> = FixedVector<B256, N>;

#[cfg(test)]
mod test {
    use ssz::{Decode, Encode};
    use ssz_types::typenum::{U2, U3, U4};

    use super::*;

    #[test]
    fn test_serializes_as_list() {
        let branch =
            Branch::<U2>::new(vec![B256::repeat_byte(0x01), B256::repeat_byte(0xab)]).unwrap();
        assert_eq!(
            serde_json::to_string(&branch).unwrap(),
            format!(
                "[\"0x{}\",\"0x{}\"]",
                "01".repeat(32),
                "ab".repeat(32)
            )
        );
    }

    #[test]
    fn test_ssz_layout() {
        let branch = Branch::<U3>::new(vec![
            B256::repeat_byte(1),
            B256::repeat_byte(2),
            B256::repeat_byte(3),
        ])
        .unwrap();
        let bytes = branch.as_ssz_bytes();
        assert_eq!(bytes.len(), 96);
        assert_eq!(&bytes[32..64], &[2; 32]);
        assert_eq!(Branch::<U3>::from_ssz_bytes(&bytes).unwrap(), branch);
        assert!(Branch::<U4>::from_ssz_bytes(&bytes).is_err());
    }

    #[test]
    fn test_new_checks_depth() {
        assert!(Branch::<U2>::new(vec![B256::ZERO; 2]).is_ok());
        assert!(Branch::<U2>::new(vec![B256::ZERO; 3]).is_err());
    }
}
