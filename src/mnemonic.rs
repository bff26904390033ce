//! Seam to the textual representation of secrets and shares
//!
//! Secrets and shares travel as text (typically word-list mnemonics). The
//! sharing scheme only needs to turn that text into bytes and back, and the
//! text of the secret also serves as the KDF password for coefficient
//! derivation.

use hex::FromHexError;

use crate::error::CodecError;

/// Converts between mnemonic text and raw bytes
///
/// `encode` must be the inverse of `decode` for every byte length the codec
/// accepts.
///
/// # Example
/// ```
/// use shamir_seed::{CodecError, MnemonicCodec};
///
/// struct Latin1;
///
/// impl MnemonicCodec for Latin1 {
///     fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
///         text.chars()
///             .map(|c| u8::try_from(c).map_err(|_| CodecError::InvalidWord(c.to_string())))
///             .collect()
///     }
///
///     fn encode(&self, bytes: &[u8]) -> Result<String, CodecError> {
///         Ok(bytes.iter().map(|&b| b as char).collect())
///     }
/// }
///
/// assert_eq!(Latin1.decode("abc").unwrap(), b"abc");
/// ```
pub trait MnemonicCodec: Send + Sync {
    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError>;

    fn encode(&self, bytes: &[u8]) -> Result<String, CodecError>;
}

impl<C: MnemonicCodec + ?Sized> MnemonicCodec for &C {
    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        (**self).decode(text)
    }

    fn encode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        (**self).encode(bytes)
    }
}

/// Lowercase hexadecimal codec
///
/// Decoding accepts either case and ignores surrounding whitespace.
///
/// # Example
/// ```
/// use shamir_seed::{HexCodec, MnemonicCodec};
///
/// let text = HexCodec.encode(&[0x00, 0xab, 0x10]).unwrap();
/// assert_eq!(text, "00ab10");
/// assert_eq!(HexCodec.decode("00AB10").unwrap(), vec![0x00, 0xab, 0x10]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HexCodec;

impl MnemonicCodec for HexCodec {
    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        let text = text.trim();
        hex::decode(text).map_err(|err| match err {
            FromHexError::InvalidHexCharacter { c, .. } => CodecError::InvalidWord(c.to_string()),
            FromHexError::OddLength | FromHexError::InvalidStringLength => {
                CodecError::InvalidLength(text.len())
            }
        })
    }

    fn encode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = HexCodec.encode(&bytes).unwrap();
        assert_eq!(text.len(), 512);
        assert_eq!(HexCodec.decode(&text).unwrap(), bytes);
    }

    #[test]
    fn test_hex_whitespace_and_case() {
        assert_eq!(HexCodec.decode("  DeadBEEF\n").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_hex_invalid_input() {
        assert_eq!(HexCodec.decode("abc"), Err(CodecError::InvalidLength(3)));
        assert_eq!(
            HexCodec.decode("00zz"),
            Err(CodecError::InvalidWord("z".into()))
        );
        assert_eq!(HexCodec.decode("+1"), Err(CodecError::InvalidWord("+".into())));
        assert_eq!(HexCodec.decode("  0a1 "), Err(CodecError::InvalidLength(3)));
    }

    #[test]
    fn test_codec_by_reference() {
        let codec = &HexCodec;
        assert_eq!(codec.encode(&[1, 2]).unwrap(), "0102");
    }
}
