use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::coefficients::{SecretBytes, SecretElements, derive_coefficients};
use crate::config::{Config, EvalMode};
use crate::error::{Result, ShamirError};
use crate::finite_field::{FieldElement, FieldSize};
use crate::mnemonic::{HexCodec, MnemonicCodec};

/// A share of a split secret
///
/// The index is the public x-coordinate of the sharing polynomial; the mnemonic
/// is the codec's text form of the polynomial evaluated at that index.
///
/// # Example
/// ```
/// use shamir_seed::ShamirSeed;
///
/// let scheme = ShamirSeed::builder(5, 3).build().unwrap();
/// let shares = scheme.split("000102030405060708090a0b0c0d0e0f").unwrap();
/// let share = &shares[0];
///
/// assert_eq!(share.index, 1);
/// assert_eq!(share.mnemonic.len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Share {
    /// Index of the share (x-coordinate in the polynomial), starting at 1
    pub index: u8,
    /// Text form of the share value
    pub mnemonic: String,
}

impl Share {
    pub fn new(index: u8, mnemonic: impl Into<String>) -> Self {
        Self {
            index,
            mnemonic: mnemonic.into(),
        }
    }
}

/// Shamir's Secret Sharing of fixed-width seeds over GF(2^m)
///
/// The field is chosen per call from the width of the decoded secret
/// (16, 20, 24, 28 or 32 bytes). Polynomial coefficients are derived
/// deterministically from the secret, so splitting the same secret twice
/// yields the same shares.
///
/// # Security
///
/// - Field multiplication is branchless with a fixed iteration count
/// - Decoded secret bytes, derived coefficients and interpolation terms are
///   held in buffers that are wiped on drop (`zeroize` feature)
/// - Only public metadata (field size, indices, counts) is logged
///
/// # Example
/// ```
/// use shamir_seed::ShamirSeed;
///
/// let scheme = ShamirSeed::builder(5, 3).build().unwrap();
///
/// let secret = "000102030405060708090a0b0c0d0e0f";
/// let shares = scheme.split(secret).unwrap();
///
/// let recovered = scheme.combine(&shares[1..4]).unwrap();
/// assert_eq!(recovered, secret);
/// ```
#[derive(Debug)]
pub struct ShamirSeed<C = HexCodec> {
    /// Total number of shares to generate
    total_shares: u8,
    /// Minimum number of shares needed for reconstruction
    threshold: u8,
    /// Configuration options for the sharing scheme
    config: Config,
    /// Text codec for secrets and shares
    codec: C,
}

/// Builder for [`ShamirSeed`]
///
/// # Example
/// ```
/// use shamir_seed::{Config, EvalMode, HexCodec, ShamirSeed};
///
/// let config = Config::new().with_mode(EvalMode::Parallel);
///
/// let scheme = ShamirSeed::builder(5, 3)
///     .with_config(config)
///     .with_codec(HexCodec)
///     .build()
///     .unwrap();
/// assert_eq!(scheme.threshold(), 3);
/// ```
#[derive(Debug)]
pub struct ShamirSeedBuilder<C = HexCodec> {
    total_shares: u8,
    threshold: u8,
    config: Config,
    codec: C,
}

impl ShamirSeedBuilder<HexCodec> {
    /// Creates a builder with default configuration and the hex codec
    ///
    /// # Arguments
    /// * `total_shares` - Total number of shares to create (1-255)
    /// * `threshold` - Minimum shares required for reconstruction
    pub fn new(total_shares: u8, threshold: u8) -> Self {
        Self {
            total_shares,
            threshold,
            config: Config::default(),
            codec: HexCodec,
        }
    }
}

impl<C: MnemonicCodec> ShamirSeedBuilder<C> {
    /// Sets a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the codec used to read secrets and write shares
    pub fn with_codec<D: MnemonicCodec>(self, codec: D) -> ShamirSeedBuilder<D> {
        ShamirSeedBuilder {
            total_shares: self.total_shares,
            threshold: self.threshold,
            config: self.config,
            codec,
        }
    }

    /// Builds the scheme with validation
    ///
    /// # Errors
    /// Returns `ShamirError` if:
    /// - `total_shares` is 0
    /// - `threshold` is 0
    /// - with strict validation: `threshold` < 2 or `threshold` > `total_shares`
    /// - Configuration validation fails
    pub fn build(self) -> Result<ShamirSeed<C>> {
        if self.total_shares == 0 {
            return Err(ShamirError::InvalidShareCount(self.total_shares));
        }
        if self.threshold == 0 {
            return Err(ShamirError::InvalidThreshold(self.threshold));
        }
        if self.config.strict_validation {
            if self.threshold < 2 {
                return Err(ShamirError::InvalidThreshold(self.threshold));
            }
            if self.threshold > self.total_shares {
                return Err(ShamirError::ThresholdTooLarge {
                    threshold: self.threshold,
                    total_shares: self.total_shares,
                });
            }
        }

        self.config.validate()?;

        Ok(ShamirSeed {
            total_shares: self.total_shares,
            threshold: self.threshold,
            config: self.config,
            codec: self.codec,
        })
    }
}

impl ShamirSeed<HexCodec> {
    /// Creates a builder for configuring a scheme
    ///
    /// # Arguments
    /// * `total_shares` - Total number of shares to create (1-255)
    /// * `threshold` - Minimum shares required for reconstruction
    pub fn builder(total_shares: u8, threshold: u8) -> ShamirSeedBuilder<HexCodec> {
        ShamirSeedBuilder::new(total_shares, threshold)
    }
}

impl<C: MnemonicCodec> ShamirSeed<C> {
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn total_shares(&self) -> u8 {
        self.total_shares
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Splits a secret into `total_shares` shares with indices `1..=total_shares`
    ///
    /// The secret is decoded with the scheme's codec; its width picks the
    /// field. The sharing polynomial is evaluated at each index with Horner's
    /// rule.
    ///
    /// # Errors
    /// Returns `ShamirError` if:
    /// - the codec rejects the secret or a share value
    /// - the decoded secret is not 16, 20, 24, 28 or 32 bytes
    ///
    /// # Example
    /// ```
    /// use shamir_seed::ShamirSeed;
    ///
    /// let scheme = ShamirSeed::builder(3, 2).build().unwrap();
    /// let shares = scheme.split("000102030405060708090a0b0c0d0e0f").unwrap();
    /// assert_eq!(shares.len(), 3);
    /// assert_eq!(shares[0].mnemonic, "746b59067a95ac1910bfec03fe8466c4");
    /// ```
    pub fn split(&self, secret: &str) -> Result<Vec<Share>> {
        let secret_bytes = SecretBytes::from(self.codec.decode(secret)?);
        let size = FieldSize::from_byte_len(secret_bytes.len())?;
        debug!(
            field = %size,
            threshold = self.threshold,
            total_shares = self.total_shares,
            "splitting secret"
        );

        let coefficients =
            derive_coefficients(secret, &secret_bytes, self.threshold, self.config.kdf_rounds)?;

        let make_share = |index: u8| -> Result<Share> {
            let x = FieldElement::from_u64(size, u64::from(index));
            let value = SecretBytes::from(evaluate_polynomial(&coefficients, x).to_bytes());
            Ok(Share::new(index, self.codec.encode(&value)?))
        };

        match self.config.mode {
            EvalMode::Sequential => (1..=self.total_shares).map(make_share).collect(),
            EvalMode::Parallel => (1..=self.total_shares)
                .into_par_iter()
                .map(make_share)
                .collect(),
        }
    }

    /// Recombines a secret from shares using Lagrange interpolation at zero
    ///
    /// Every supplied share takes part in the interpolation. Passing more than
    /// the threshold is fine as long as all shares are genuine; a forged or
    /// foreign extra share silently changes the result.
    ///
    /// # Errors
    /// Returns `ShamirError` if:
    /// - no shares are provided
    /// - a share has index 0
    /// - two shares carry the same index
    /// - shares decode to different widths, or to an unsupported width
    /// - the codec rejects a share or the recovered secret
    ///
    /// # Example
    /// ```
    /// use shamir_seed::ShamirSeed;
    ///
    /// let scheme = ShamirSeed::builder(5, 3).build().unwrap();
    /// let shares = scheme.split("000102030405060708090a0b0c0d0e0f").unwrap();
    ///
    /// let picked = [shares[4].clone(), shares[0].clone(), shares[2].clone()];
    /// let secret = scheme.combine(&picked).unwrap();
    /// assert_eq!(secret, "000102030405060708090a0b0c0d0e0f");
    /// ```
    pub fn combine(&self, shares: &[Share]) -> Result<String> {
        combine_shares(shares, &self.codec, self.config.mode)
    }
}

/// Splits `secret` into `total_shares` shares, any `threshold` of which recover it
///
/// Uses the default configuration, so `2 <= threshold <= total_shares` is
/// enforced.
///
/// # Example
/// ```
/// use shamir_seed::{combine, split, HexCodec};
///
/// let secret = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
/// let shares = split(3, 5, secret, &HexCodec).unwrap();
/// assert_eq!(combine(&shares[2..], &HexCodec).unwrap(), secret);
/// ```
pub fn split<C: MnemonicCodec>(
    threshold: u8,
    total_shares: u8,
    secret: &str,
    codec: &C,
) -> Result<Vec<Share>> {
    ShamirSeed::builder(total_shares, threshold)
        .with_codec(codec)
        .build()?
        .split(secret)
}

/// Recombines a secret from shares; see [`ShamirSeed::combine`]
pub fn combine<C: MnemonicCodec>(shares: &[Share], codec: &C) -> Result<String> {
    combine_shares(shares, codec, EvalMode::Sequential)
}

/// Horner evaluation; the last coefficient is the constant term
fn evaluate_polynomial(coefficients: &[FieldElement], x: FieldElement) -> FieldElement {
    coefficients
        .iter()
        .fold(FieldElement::zero(x.field_size()), |acc, &c| acc * x + c)
}

fn combine_shares<C: MnemonicCodec>(shares: &[Share], codec: &C, mode: EvalMode) -> Result<String> {
    let points = decode_points(shares, codec)?;
    let size = points[0].0.field_size();
    let indices: Vec<u8> = shares.iter().map(|s| s.index).collect();
    debug!(field = %size, shares = points.len(), ?indices, "combining shares");

    let terms = SecretElements::from(match mode {
        EvalMode::Sequential => (0..points.len())
            .map(|j| lagrange_term(&points, j))
            .collect::<Result<Vec<_>>>()?,
        EvalMode::Parallel => (0..points.len())
            .into_par_iter()
            .map(|j| lagrange_term(&points, j))
            .collect::<Result<Vec<_>>>()?,
    });
    let secret_bytes = SecretBytes::from(
        terms
            .iter()
            .fold(FieldElement::zero(size), |acc, &term| acc + term)
            .to_bytes(),
    );
    Ok(codec.encode(&secret_bytes)?)
}

/// Decodes shares into `(x, y)` points, checking indices and widths
fn decode_points<C: MnemonicCodec>(
    shares: &[Share],
    codec: &C,
) -> Result<Vec<(FieldElement, FieldElement)>> {
    let Some(first) = shares.first() else {
        return Err(ShamirError::InsufficientShares { needed: 1, got: 0 });
    };
    let size = FieldSize::from_byte_len(SecretBytes::from(codec.decode(&first.mnemonic)?).len())?;

    let mut seen = Vec::with_capacity(shares.len());
    let mut points = Vec::with_capacity(shares.len());
    for share in shares {
        if share.index == 0 {
            return Err(ShamirError::InvalidShareIndex(share.index));
        }
        if seen.contains(&share.index) {
            return Err(ShamirError::DuplicateShare(share.index));
        }
        seen.push(share.index);

        let payload = SecretBytes::from(codec.decode(&share.mnemonic)?);
        if payload.len() != size.byte_len() {
            return Err(ShamirError::FieldSizeMismatch {
                expected: size.bits(),
                got: payload.len() * 8,
            });
        }
        points.push((
            FieldElement::from_u64(size, u64::from(share.index)),
            FieldElement::from_bytes(size, &payload)?,
        ));
    }

    Ok(points)
}

/// `y_j * prod(x_m) / prod(x_j + x_m)` over all `m != j`
fn lagrange_term(points: &[(FieldElement, FieldElement)], j: usize) -> Result<FieldElement> {
    let (x_j, y_j) = points[j];
    let size = x_j.field_size();
    let mut numerator = FieldElement::one(size);
    let mut denominator = FieldElement::one(size);
    for (m, &(x_m, _)) in points.iter().enumerate() {
        if m != j {
            numerator *= x_m;
            denominator *= x_j + x_m;
        }
    }
    Ok(y_j * numerator * denominator.inverse()?)
}
