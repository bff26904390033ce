use thiserror::Error;

/// Error type for splitting and combining secrets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    /// Secret width is not one of the supported field sizes (128, 160, 192, 224, 256 bits)
    #[error("Unsupported field size of {bits} bits")]
    UnsupportedFieldSize { bits: usize },

    /// Field element built from a byte string or integer of the wrong width
    #[error("Invalid field element encoding: expected {expected} bytes, got {got}")]
    InvalidEncoding { expected: usize, got: usize },

    /// Attempted to invert the additive identity
    #[error("Inversion of zero")]
    InversionOfZero,

    /// Two shares passed to combine carry the same index
    #[error("Duplicate share index {0}")]
    DuplicateShare(u8),

    /// Shares passed to combine decode to different widths
    #[error("Field size mismatch: expected {expected} bits, got {got}")]
    FieldSizeMismatch { expected: usize, got: usize },

    /// Invalid threshold value
    #[error("Invalid threshold value {0}")]
    InvalidThreshold(u8),

    /// Invalid total shares count (must be >= 1)
    #[error("Invalid share count {0}")]
    InvalidShareCount(u8),

    /// Threshold exceeds total shares
    #[error("Threshold {threshold} exceeds total shares {total_shares}")]
    ThresholdTooLarge { threshold: u8, total_shares: u8 },

    /// Insufficient shares for reconstruction
    #[error("Need at least {needed} shares, got {got}")]
    InsufficientShares { needed: u8, got: usize },

    /// Share index outside `1..=255`
    #[error("Invalid share index {0}")]
    InvalidShareIndex(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by the mnemonic codec, passed through unchanged
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Error type for mnemonic codecs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid word {0:?}")]
    InvalidWord(String),

    #[error("Invalid checksum")]
    InvalidChecksum,

    #[error("Invalid length {0}")]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, ShamirError>;
