//! Deterministic Shamir's Secret Sharing of mnemonic seeds over GF(2^m)
//!
//! A secret of 16, 20, 24, 28 or 32 bytes is split into `n` shares over the
//! binary extension field of matching width (GF(2^128) to GF(2^256)); any `k`
//! of them recover the secret and fewer reveal nothing about it. Secrets and
//! shares travel as text through a [`MnemonicCodec`]; [`HexCodec`] is bundled,
//! word-list codecs plug in through the same trait.
//!
//! The polynomial coefficients are derived from the secret with
//! PBKDF2-HMAC-SHA512, so splitting the same secret with the same threshold
//! always produces the same shares.
//!
//! # Quick Start
//!
//! ```
//! use shamir_seed::ShamirSeed;
//!
//! // Create a scheme with 5 shares and threshold 3
//! let scheme = ShamirSeed::builder(5, 3).build().unwrap();
//!
//! // Split a 128-bit secret
//! let secret = "000102030405060708090a0b0c0d0e0f";
//! let shares = scheme.split(secret).unwrap();
//!
//! // Recombine from any 3 shares
//! let recovered = scheme.combine(&shares[2..5]).unwrap();
//! assert_eq!(recovered, secret);
//! ```

mod coefficients;
mod config;
mod error;
mod finite_field;
mod gf2_poly;
mod mnemonic;
mod shamir;

pub use coefficients::{SecretElements, derive_coefficients};
pub use config::{Config, DEFAULT_KDF_ROUNDS, EvalMode};
pub use error::{CodecError, Result, ShamirError};
pub use finite_field::{FieldElement, FieldSize};
pub use mnemonic::{HexCodec, MnemonicCodec};
pub use shamir::{ShamirSeed, ShamirSeedBuilder, Share, combine, split};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Config, EvalMode, FieldSize, HexCodec, MnemonicCodec, Result, ShamirError, ShamirSeed,
        Share,
    };
}
