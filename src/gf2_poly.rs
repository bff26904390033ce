//! Fixed-width polynomials over GF(2)
//!
//! Bit `i` of a [`Gf2Poly`] is the coefficient of `x^i`. The width is 320 bits,
//! enough for every field modulus in this crate (degree at most 256) and for all
//! intermediate values produced while inverting field elements.

use std::ops::{BitXor, BitXorAssign};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

const LIMBS: usize = 5;

/// Maximum number of coefficients a [`Gf2Poly`] can hold
pub(crate) const MAX_BITS: u32 = (LIMBS as u32) * 64;

/// Polynomial over GF(2) stored as little-endian `u64` limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub(crate) struct Gf2Poly([u64; LIMBS]);

impl Gf2Poly {
    pub(crate) const ZERO: Self = Self([0; LIMBS]);
    pub(crate) const ONE: Self = Self::from_terms(&[0]);

    /// Builds a polynomial from the exponents of its nonzero terms
    pub(crate) const fn from_terms(exponents: &[u32]) -> Self {
        let mut limbs = [0u64; LIMBS];
        let mut i = 0;
        while i < exponents.len() {
            let e = exponents[i];
            limbs[(e / 64) as usize] |= 1u64 << (e % 64);
            i += 1;
        }
        Self(limbs)
    }

    #[inline]
    pub(crate) fn from_u64(value: u64) -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = value;
        Self(limbs)
    }

    /// Parses a big-endian byte string. Returns `None` if it does not fit.
    pub(crate) fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > LIMBS * 8 {
            return None;
        }
        let mut limbs = [0u64; LIMBS];
        for (i, &byte) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (byte as u64) << ((i % 8) * 8);
        }
        Some(Self(limbs))
    }

    /// Writes the low `len` bytes in big-endian order
    pub(crate) fn to_be_bytes(&self, len: usize) -> Vec<u8> {
        debug_assert!(len <= LIMBS * 8);
        (0..len)
            .rev()
            .map(|i| (self.0[i / 8] >> ((i % 8) * 8)) as u8)
            .collect()
    }

    #[inline]
    pub(crate) fn is_zero(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    /// Coefficient of `x^i` as 0 or 1
    #[inline]
    pub(crate) fn bit(&self, i: u32) -> u64 {
        debug_assert!(i < MAX_BITS);
        (self.0[(i / 64) as usize] >> (i % 64)) & 1
    }

    #[inline]
    pub(crate) fn bit_choice(&self, i: u32) -> Choice {
        Choice::from(self.bit(i) as u8)
    }

    /// Degree plus one; zero for the zero polynomial
    pub(crate) fn bit_len(&self) -> u32 {
        for idx in (0..LIMBS).rev() {
            let limb = self.0[idx];
            if limb != 0 {
                return idx as u32 * 64 + (64 - limb.leading_zeros());
            }
        }
        0
    }

    /// Multiplies by `x^n`, dropping coefficients past [`MAX_BITS`]
    pub(crate) fn shl(&self, n: u32) -> Self {
        let limb_shift = (n / 64) as usize;
        let bit_shift = n % 64;
        let mut out = [0u64; LIMBS];
        for i in (limb_shift..LIMBS).rev() {
            let src = i - limb_shift;
            out[i] = self.0[src] << bit_shift;
            if bit_shift > 0 && src > 0 {
                out[i] |= self.0[src - 1] >> (64 - bit_shift);
            }
        }
        Self(out)
    }

    /// Carry-less product without modular reduction.
    ///
    /// Only used on public data (the extended Euclidean loop), so it is free to
    /// branch on operand bits.
    pub(crate) fn clmul(&self, other: &Self) -> Self {
        let (wide, narrow) = if self.bit_len() >= other.bit_len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut acc = Self::ZERO;
        for i in 0..narrow.bit_len() {
            if narrow.bit(i) == 1 {
                acc ^= wide.shl(i);
            }
        }
        acc
    }

    /// Polynomial long division: returns `(q, r)` with
    /// `self = divisor * q + r` and `deg(r) < deg(divisor)`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub(crate) fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");

        let d = divisor.bit_len();
        let mut quotient = Self::ZERO;
        let mut remainder = *self;
        while remainder.bit_len() >= d {
            let shift = remainder.bit_len() - d;
            quotient ^= Self::ONE.shl(shift);
            remainder ^= divisor.shl(shift);
        }
        (quotient, remainder)
    }
}

impl BitXor for Gf2Poly {
    type Output = Self;

    #[inline]
    fn bitxor(mut self, rhs: Self) -> Self {
        self ^= rhs;
        self
    }
}

impl BitXorAssign for Gf2Poly {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a ^= b;
        }
    }
}

impl ConditionallySelectable for Gf2Poly {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(limbs)
    }
}

impl ConstantTimeEq for Gf2Poly {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}
