// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Defines the [`Group`] trait to specify the underlying prime-order group
//! used by the OPRF: the subgroup of quadratic residues modulo a safe prime.

mod modp;

use core::fmt;

use digest::Digest;
use generic_array::typenum::Unsigned;
use generic_array::{ArrayLength, GenericArray};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub use self::modp::{Modp1536, Modp2048, Modp3072};
use crate::serialization::i2osp_big;
use crate::{Error, Result};

/// Smallest accepted modulus, in bits.
pub const MIN_MODULUS_BITS: u64 = 1536;

/// Upper bound on rejection-sampling rounds in [`Group::random_scalar`].
const MAX_SAMPLE_ATTEMPTS: usize = 128;

/// Computes `base^exp mod modulus`, reducing `base` first.
///
/// `modulus` must be non-zero; every caller in this crate passes a group
/// modulus or order.
pub(crate) fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    (base % modulus).modpow(exp, modulus)
}

/// Multiplicative inverse of `a` in `Z_m`, or `None` if `gcd(a, m) != 1`.
pub(crate) fn mod_inv(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }
    (a % modulus).modinv(modulus)
}

/// The public constants `(p, q, g)` of a safe-prime group, where
/// `q = (p - 1) / 2` and `g` generates the subgroup of quadratic residues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupParams {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl GroupParams {
    /// Validates and wraps a safe prime `p` and a generator `g` of its
    /// quadratic-residue subgroup.
    ///
    /// Primality of `p` and `q` is the caller's responsibility.
    ///
    /// # Errors
    /// [`Error::Parameter`] if `p` is even or shorter than
    /// [`MIN_MODULUS_BITS`], or if `g` is not a non-identity quadratic
    /// residue modulo `p`.
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if p.bits() < MIN_MODULUS_BITS || !p.bit(0) {
            return Err(Error::Parameter);
        }
        let q = (&p - 1u32) >> 1;
        if g < BigUint::from(2u32) || g >= p || !mod_exp(&g, &q, &p).is_one() {
            return Err(Error::Parameter);
        }
        Ok(Self { p, q, g })
    }

    /// Builds the parameters for one of the built-in safe primes, all of
    /// which have `2` as a quadratic residue.
    pub(crate) fn from_safe_prime(p_bytes: &[u8]) -> Self {
        let p = BigUint::from_bytes_be(p_bytes);
        let q = (&p - 1u32) >> 1;
        Self {
            p,
            q,
            g: BigUint::from(2u32),
        }
    }

    /// The safe prime `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q = (p - 1) / 2`.
    pub fn order(&self) -> &BigUint {
        &self.q
    }

    /// The subgroup generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.g
    }
}

/// A secret exponent in `[2, q - 1]`, wiped from memory on drop.
#[derive(Clone)]
pub struct Scalar(Vec<u8>);

impl Scalar {
    pub(crate) fn from_biguint(value: &BigUint) -> Self {
        Self(value.to_bytes_be())
    }

    pub(crate) fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(..)")
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Scalar {}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// A prime-order subgroup of `Z_p^*` for a safe prime `p`. Elements are
/// written multiplicatively and carried as reduced [`BigUint`]s.
pub trait Group {
    /// The byte length of a serialized element, `⌈bitlen(p) / 8⌉`.
    type ElemLen: ArrayLength<u8> + 'static;

    /// The byte length of a serialized scalar, `⌈bitlen(q) / 8⌉`.
    type ScalarLen: ArrayLength<u8> + 'static;

    /// The group constants, materialised once per process.
    fn params() -> &'static GroupParams;

    /// Deterministically maps an arbitrary byte string into the subgroup:
    /// `e = H(input) mod q` (with `0` replaced by `1`), then `(g^e)^2 mod p`.
    fn hash_to_group<H: Digest>(input: &[u8]) -> BigUint {
        let params = Self::params();
        let mut exponent = BigUint::from_bytes_be(&H::digest(input)) % &params.q;
        if exponent.is_zero() {
            exponent = BigUint::one();
        }
        let elem = mod_exp(&params.g, &exponent, &params.p);
        // Squaring keeps the result in QR_p whatever the generator.
        mod_exp(&elem, &BigUint::from(2u32), &params.p)
    }

    /// Raises `elem` to the power `scalar mod q`.
    fn scalar_mult(elem: &BigUint, scalar: &Scalar) -> BigUint {
        let params = Self::params();
        mod_exp(elem, &(scalar.to_biguint() % &params.q), &params.p)
    }

    /// Returns whether `elem` is a non-identity quadratic residue in
    /// `[2, p - 1]`.
    fn is_valid_elem(elem: &BigUint) -> bool {
        let params = Self::params();
        *elem >= BigUint::from(2u32)
            && *elem < params.p
            && mod_exp(elem, &params.q, &params.p).is_one()
    }

    /// Serializes an element to exactly [`Self::ElemLen`] big-endian bytes.
    fn serialize_elem(elem: &BigUint) -> GenericArray<u8, Self::ElemLen> {
        i2osp_big(&(elem % &Self::params().p))
    }

    /// Deserializes and validates an element.
    ///
    /// # Errors
    /// [`Error::InvalidGroupElement`] if the length is not
    /// [`Self::ElemLen`] or the value fails [`Group::is_valid_elem`].
    fn deserialize_elem(element_bits: &[u8]) -> Result<BigUint> {
        if element_bits.len() != Self::ElemLen::USIZE {
            return Err(Error::InvalidGroupElement);
        }
        let elem = BigUint::from_bytes_be(element_bits);
        if !Self::is_valid_elem(&elem) {
            return Err(Error::InvalidGroupElement);
        }
        Ok(elem)
    }

    /// Samples a scalar uniformly from `[2, q - 1]` by rejection sampling.
    ///
    /// # Errors
    /// - [`Error::Random`] if the RNG fails.
    /// - [`Error::Sampling`] if no candidate was accepted within the retry
    ///   budget.
    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar> {
        let q = &Self::params().q;
        let excess_bits = (Self::ScalarLen::U64 * 8).saturating_sub(q.bits());
        let mask = u8::MAX.checked_shr(excess_bits as u32).unwrap_or(0);
        let mut bytes = GenericArray::<u8, Self::ScalarLen>::default();

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            rng.try_fill_bytes(&mut bytes).map_err(|_| Error::Random)?;
            if let Some(first) = bytes.first_mut() {
                *first &= mask;
            }
            let candidate = BigUint::from_bytes_be(&bytes);
            bytes.as_mut_slice().zeroize();
            if candidate >= BigUint::from(2u32) && candidate < *q {
                return Ok(Scalar::from_biguint(&candidate));
            }
        }

        Err(Error::Sampling)
    }

    /// The multiplicative inverse of `scalar` modulo `q`.
    ///
    /// # Errors
    /// [`Error::InvalidScalar`] if `scalar` is not invertible.
    fn invert_scalar(scalar: &Scalar) -> Result<Scalar> {
        mod_inv(&scalar.to_biguint(), &Self::params().q)
            .map(|inverse| Scalar::from_biguint(&inverse))
            .ok_or(Error::InvalidScalar)
    }

    /// Serializes a scalar to exactly [`Self::ScalarLen`] big-endian bytes.
    fn serialize_scalar(scalar: &Scalar) -> GenericArray<u8, Self::ScalarLen> {
        i2osp_big(&(scalar.to_biguint() % &Self::params().q))
    }

    /// Deserializes a secret scalar.
    ///
    /// # Errors
    /// [`Error::InvalidScalar`] if the length is not [`Self::ScalarLen`] or
    /// the value is outside `[2, q - 1]`.
    fn deserialize_scalar(scalar_bits: &[u8]) -> Result<Scalar> {
        if scalar_bits.len() != Self::ScalarLen::USIZE {
            return Err(Error::InvalidScalar);
        }
        let scalar = BigUint::from_bytes_be(scalar_bits);
        if scalar < BigUint::from(2u32) || scalar >= Self::params().q {
            return Err(Error::InvalidScalar);
        }
        Ok(Scalar::from_biguint(&scalar))
    }
}
