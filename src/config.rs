use crate::error::{Result, ShamirError};

/// Iteration count of the PBKDF2-HMAC-SHA512 coefficient derivation
pub const DEFAULT_KDF_ROUNDS: u32 = 2048;

/// How shares are evaluated during split and how Lagrange terms are
/// accumulated during combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Process shares one after another
    #[default]
    Sequential,
    /// Process shares on the rayon thread pool
    Parallel,
}

/// Configuration options for splitting and combining
#[derive(Debug, Clone)]
pub struct Config {
    /// PBKDF2 iteration count used to derive the polynomial coefficients
    pub kdf_rounds: u32,
    /// Evaluation mode
    pub mode: EvalMode,
    /// Require `2 <= threshold <= total_shares` when building a scheme
    pub strict_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kdf_rounds: DEFAULT_KDF_ROUNDS,
            mode: EvalMode::default(),
            strict_validation: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the PBKDF2 iteration count.
    ///
    /// Shares produced with a non-default count are not interchangeable with
    /// shares produced by other implementations of the scheme.
    pub fn with_kdf_rounds(mut self, rounds: u32) -> Result<Self> {
        if rounds == 0 {
            return Err(ShamirError::InvalidConfig(
                "KDF rounds cannot be zero".into(),
            ));
        }
        self.kdf_rounds = rounds;
        Ok(self)
    }

    /// Sets the evaluation mode
    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables strict threshold validation
    pub fn with_strict_validation(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.kdf_rounds == 0 {
            return Err(ShamirError::InvalidConfig(
                "KDF rounds cannot be zero".into(),
            ));
        }

        Ok(())
    }
}
