//! Deterministic derivation of polynomial coefficients from the secret
//!
//! The `threshold - 1` non-constant coefficients come from PBKDF2-HMAC-SHA512
//! keyed with the mnemonic text of the secret. The same secret and threshold
//! always produce the same polynomial, so re-splitting yields identical
//! shares. Deriving the coefficients requires knowing the secret already.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use crate::error::{Result, ShamirError};
use crate::finite_field::{FieldElement, FieldSize};

/// Byte buffer holding secret-derived material, wiped on drop when the
/// `zeroize` feature is enabled
#[cfg(feature = "zeroize")]
pub(crate) type SecretBytes = zeroize::Zeroizing<Vec<u8>>;
#[cfg(not(feature = "zeroize"))]
pub(crate) type SecretBytes = Vec<u8>;

/// Field elements derived from a secret, wiped on drop when the `zeroize`
/// feature is enabled
#[cfg(feature = "zeroize")]
pub type SecretElements = zeroize::Zeroizing<Vec<FieldElement>>;
#[cfg(not(feature = "zeroize"))]
pub type SecretElements = Vec<FieldElement>;

fn coefficient_salt(position: usize, threshold: u8) -> String {
    format!("mnemonicshamir{position} number of shares {threshold}")
}

/// Expands a secret into the `threshold` coefficients of its sharing polynomial.
///
/// The result is in Horner order: the derived coefficients come first and the
/// last element is the secret itself (the constant term). The returned buffer
/// is wiped on drop with the `zeroize` feature.
///
/// # Arguments
/// * `mnemonic` - Textual form of the secret, used verbatim as the KDF password
/// * `secret` - Decoded secret bytes; their width selects the field
/// * `threshold` - Number of coefficients to produce
/// * `rounds` - PBKDF2 iteration count
///
/// # Errors
/// Returns `ShamirError` if:
/// - the secret width is not a supported field size
/// - `threshold` is 0
///
/// # Example
/// ```
/// use shamir_seed::{derive_coefficients, FieldElement, FieldSize};
///
/// let secret = [7u8; 16];
/// let coefficients = derive_coefficients("07070707070707070707070707070707", &secret, 3, 2048).unwrap();
/// assert_eq!(coefficients.len(), 3);
/// assert_eq!(coefficients[2], FieldElement::from_bytes(FieldSize::Gf128, &secret).unwrap());
/// ```
pub fn derive_coefficients(
    mnemonic: &str,
    secret: &[u8],
    threshold: u8,
    rounds: u32,
) -> Result<SecretElements> {
    let size = FieldSize::from_byte_len(secret.len())?;
    if threshold == 0 {
        return Err(ShamirError::InvalidThreshold(threshold));
    }

    let mut coefficients = SecretElements::from(Vec::with_capacity(threshold as usize));
    for position in 0..(threshold as usize - 1) {
        let salt = coefficient_salt(position, threshold);
        let mut block = SecretBytes::from(vec![0u8; size.byte_len()]);
        pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), salt.as_bytes(), rounds, block.as_mut_slice());
        coefficients.push(FieldElement::from_bytes(size, &block)?);
    }
    coefficients.push(FieldElement::from_bytes(size, secret)?);

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str = "000102030405060708090a0b0c0d0e0f";

    fn secret() -> Vec<u8> {
        (0..16).collect()
    }

    #[test]
    fn test_salt_format() {
        assert_eq!(coefficient_salt(0, 2), "mnemonicshamir0 number of shares 2");
        assert_eq!(coefficient_salt(11, 12), "mnemonicshamir11 number of shares 12");
    }

    #[test]
    fn test_known_coefficient() {
        let coefficients = derive_coefficients(MNEMONIC, &secret(), 2, 2048).unwrap();
        assert_eq!(coefficients.len(), 2);
        assert_eq!(
            coefficients[0].to_bytes(),
            [
                0x74, 0x6a, 0x5b, 0x05, 0x7e, 0x90, 0xaa, 0x1e, 0x18, 0xb6, 0xe6, 0x08, 0xf2, 0x89,
                0x68, 0xcb
            ]
        );
        assert_eq!(coefficients[1].to_bytes(), secret());
    }

    #[test]
    fn test_deterministic() {
        let first = derive_coefficients(MNEMONIC, &secret(), 4, 2048).unwrap();
        let second = derive_coefficients(MNEMONIC, &secret(), 4, 2048).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_changes_salt() {
        let k3 = derive_coefficients(MNEMONIC, &secret(), 3, 2048).unwrap();
        let k4 = derive_coefficients(MNEMONIC, &secret(), 4, 2048).unwrap();
        assert_ne!(k3[0], k4[0]);
        assert_ne!(k4[0], k4[1]);
        assert_ne!(k4[1], k4[2]);
    }

    #[test]
    fn test_rounds_change_output() {
        let default = derive_coefficients(MNEMONIC, &secret(), 2, 2048).unwrap();
        let other = derive_coefficients(MNEMONIC, &secret(), 2, 1).unwrap();
        assert_ne!(default[0], other[0]);
        assert_eq!(default[1], other[1]);
    }

    #[test]
    fn test_threshold_one_is_secret_only() {
        let coefficients = derive_coefficients(MNEMONIC, &secret(), 1, 2048).unwrap();
        assert_eq!(coefficients.len(), 1);
        assert_eq!(coefficients[0].to_bytes(), secret());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            derive_coefficients(MNEMONIC, &secret(), 0, 2048),
            Err(ShamirError::InvalidThreshold(0))
        );
        assert_eq!(
            derive_coefficients("00", &[0u8; 15], 2, 2048),
            Err(ShamirError::UnsupportedFieldSize { bits: 120 })
        );
    }

    #[test]
    fn test_width_follows_secret() {
        for size in FieldSize::ALL {
            let secret = vec![0xa5u8; size.byte_len()];
            let coefficients = derive_coefficients("a5", &secret, 3, 16).unwrap();
            assert!(coefficients.iter().all(|c| c.field_size() == size));
        }
    }

    #[test]
    #[cfg(feature = "zeroize")]
    fn test_coefficients_are_wiped() {
        use zeroize::{Zeroize, Zeroizing};

        let mut coefficients: Zeroizing<Vec<FieldElement>> =
            derive_coefficients(MNEMONIC, &secret(), 3, 16).unwrap();
        assert!(coefficients.iter().all(|c| !c.is_zero()));

        // Element-wise wipe, as done by `Zeroizing` on drop before the buffer is released
        coefficients.iter_mut().for_each(Zeroize::zeroize);
        assert!(coefficients.iter().all(|c| c.is_zero() && c.field_size() == FieldSize::Gf128));

        coefficients.zeroize();
        assert!(coefficients.is_empty());
    }
}
