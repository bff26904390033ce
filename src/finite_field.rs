use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

use serde::{Deserialize, Serialize};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::error::{Result, ShamirError};
use crate::gf2_poly::Gf2Poly;

// Irreducible polynomials from "A Table of Primitive Binary Polynomials" (Živković)
const MODULUS_128: Gf2Poly = Gf2Poly::from_terms(&[0, 11, 35, 77, 128]);
const MODULUS_160: Gf2Poly = Gf2Poly::from_terms(&[0, 30, 56, 101, 160]);
const MODULUS_192: Gf2Poly = Gf2Poly::from_terms(&[0, 17, 103, 142, 192]);
const MODULUS_224: Gf2Poly = Gf2Poly::from_terms(&[0, 2, 39, 116, 224]);
const MODULUS_256: Gf2Poly = Gf2Poly::from_terms(&[0, 121, 178, 241, 256]);

/// Supported binary extension fields GF(2^m)
///
/// The field is picked from the width of the secret: a 16-byte secret lives in
/// GF(2^128), a 32-byte secret in GF(2^256), and so on.
///
/// # Example
/// ```
/// use shamir_seed::FieldSize;
///
/// let size = FieldSize::from_byte_len(24).unwrap();
/// assert_eq!(size, FieldSize::Gf192);
/// assert_eq!(size.bits(), 192);
/// assert!(FieldSize::from_byte_len(15).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSize {
    Gf128,
    Gf160,
    Gf192,
    Gf224,
    Gf256,
}

impl FieldSize {
    pub const ALL: [FieldSize; 5] = [
        FieldSize::Gf128,
        FieldSize::Gf160,
        FieldSize::Gf192,
        FieldSize::Gf224,
        FieldSize::Gf256,
    ];

    /// Extension degree `m`
    pub const fn bits(self) -> usize {
        match self {
            FieldSize::Gf128 => 128,
            FieldSize::Gf160 => 160,
            FieldSize::Gf192 => 192,
            FieldSize::Gf224 => 224,
            FieldSize::Gf256 => 256,
        }
    }

    /// Width of the canonical big-endian encoding
    pub const fn byte_len(self) -> usize {
        self.bits() / 8
    }

    pub fn from_bits(bits: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.bits() == bits)
            .ok_or(ShamirError::UnsupportedFieldSize { bits })
    }

    pub fn from_byte_len(len: usize) -> Result<Self> {
        Self::from_bits(len.saturating_mul(8))
    }

    pub(crate) const fn modulus(self) -> Gf2Poly {
        match self {
            FieldSize::Gf128 => MODULUS_128,
            FieldSize::Gf160 => MODULUS_160,
            FieldSize::Gf192 => MODULUS_192,
            FieldSize::Gf224 => MODULUS_224,
            FieldSize::Gf256 => MODULUS_256,
        }
    }
}

impl fmt::Display for FieldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(2^{})", self.bits())
    }
}

/// Element of GF(2^m)
///
/// Every element carries the [`FieldSize`] it belongs to, so the reduction
/// polynomial travels with the value instead of living in shared state.
/// Combining elements of different fields is a programming error and panics.
///
/// With the `zeroize` feature, zeroizing an element clears its value and keeps
/// its field.
///
/// # Example
/// ```
/// use shamir_seed::{FieldElement, FieldSize};
///
/// let a = FieldElement::from_u64(FieldSize::Gf128, 0x53);
/// let b = FieldElement::from_u64(FieldSize::Gf128, 0xCA);
/// let sum = a + b;
/// assert_eq!(sum, FieldElement::from_u64(FieldSize::Gf128, 0x99));
///
/// let inv = a.inverse().unwrap();
/// assert_eq!(a * inv, FieldElement::one(FieldSize::Gf128));
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct FieldElement {
    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    size: FieldSize,
    value: Gf2Poly,
}

impl FieldElement {
    #[inline]
    pub fn zero(size: FieldSize) -> Self {
        Self {
            size,
            value: Gf2Poly::ZERO,
        }
    }

    #[inline]
    pub fn one(size: FieldSize) -> Self {
        Self {
            size,
            value: Gf2Poly::ONE,
        }
    }

    /// Creates an element from a small integer; every `u64` is below 2^128
    #[inline]
    pub fn from_u64(size: FieldSize, value: u64) -> Self {
        Self {
            size,
            value: Gf2Poly::from_u64(value),
        }
    }

    /// Parses the canonical big-endian encoding, which must be exactly
    /// `size.byte_len()` bytes long
    pub fn from_bytes(size: FieldSize, bytes: &[u8]) -> Result<Self> {
        let expected = size.byte_len();
        if bytes.len() != expected {
            return Err(ShamirError::InvalidEncoding {
                expected,
                got: bytes.len(),
            });
        }
        let value = Gf2Poly::from_be_bytes(bytes).ok_or(ShamirError::InvalidEncoding {
            expected,
            got: bytes.len(),
        })?;
        Ok(Self { size, value })
    }

    /// Canonical big-endian encoding of `size.byte_len()` bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_be_bytes(self.size.byte_len())
    }

    #[inline]
    pub fn field_size(&self) -> FieldSize {
        self.size
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Multiplication modulo the field polynomial.
    ///
    /// Runs exactly `m` rounds of shift-and-add and picks every intermediate with
    /// a masked select, so neither control flow nor memory access depends on
    /// the operand bits.
    pub fn multiply(self, other: Self) -> Self {
        assert_same_field(self.size, other.size);

        let m = self.size.bits() as u32;
        let modulus = self.size.modulus();
        let mut acc = Gf2Poly::ZERO;
        let mut addend = self.value;
        for i in 0..m {
            let accumulated = acc ^ addend;
            acc = Gf2Poly::conditional_select(&acc, &accumulated, other.value.bit_choice(i));

            addend = addend.shl(1);
            let reduced = addend ^ modulus;
            addend = Gf2Poly::conditional_select(&addend, &reduced, addend.bit_choice(m));
        }

        Self {
            size: self.size,
            value: acc,
        }
    }

    /// Multiplicative inverse via the extended Euclidean algorithm over GF(2)[x]
    ///
    /// # Errors
    /// Returns [`ShamirError::InversionOfZero`] for the additive identity.
    pub fn inverse(self) -> Result<Self> {
        if self.is_zero() {
            return Err(ShamirError::InversionOfZero);
        }

        let (mut r0, mut r1) = (self.value, self.size.modulus());
        let (mut s0, mut s1) = (Gf2Poly::ONE, Gf2Poly::ZERO);
        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            (r0, r1) = (r1, r);
            (s0, s1) = (s1, s0 ^ q.clmul(&s1));
        }

        Ok(Self {
            size: self.size,
            value: s0,
        })
    }

    /// Exponentiation by square-and-multiply; `pow(0)` is one
    pub fn pow(self, mut exp: u32) -> Self {
        let mut result = Self::one(self.size);
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(base);
            }
            base = base.multiply(base);
            exp >>= 1;
        }
        result
    }
}

#[inline]
fn assert_same_field(lhs: FieldSize, rhs: FieldSize) {
    assert_eq!(lhs, rhs, "operands belong to different fields");
}

/// Addition is XOR of the coefficient bits
impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        assert_same_field(self.size, other.size);
        Self {
            size: self.size,
            value: self.value ^ other.value,
        }
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        // Characteristic 2: subtraction and addition coincide
        #[allow(clippy::suspicious_arithmetic_impl)]
        let result = self + other;
        result
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(other)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = self.multiply(other);
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from((self.size == other.size) as u8) & self.value.ct_eq(&other.value)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}
