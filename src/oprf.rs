// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Contains the OPRF API: the blind Diffie-Hellman construction (2HashDH)
//! over the quadratic residues of a safe-prime group.
//!
//! The client sends `M = H1(input)^r`, the server answers `N = M^k`, and the
//! client recovers `Z = N^(1/r) = H1(input)^k` and outputs `H2(Z)`. The
//! server never sees `input`, `H1(input)` or `Z`; the client never sees `k`.

use core::marker::PhantomData;

use derive_where::derive_where;
use digest::{Digest, Output};
use generic_array::GenericArray;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::group::Scalar;
use crate::{CipherSuite, Group, Result};

////////////////////////////
// High-level API Structs //
// ====================== //
////////////////////////////

/// A client which engages with an [OprfServer]. It holds the blinding
/// scalar between [`OprfClient::blind`] and [`OprfClient::finalize`], and is
/// consumed by the latter so that a blind is never used twice.
#[derive_where(Debug, ZeroizeOnDrop)]
pub struct OprfClient<CS: CipherSuite> {
    pub(crate) blind: Scalar,
    _suite: PhantomData<CS>,
}

/// A server which engages with an [OprfClient]. It owns the OPRF key `k`.
#[derive_where(Clone, Debug, ZeroizeOnDrop)]
pub struct OprfServer<CS: CipherSuite> {
    pub(crate) sk: Scalar,
    _suite: PhantomData<CS>,
}

/// The blinded element `M` sent by the client to the server.
#[derive_where(Clone, Debug, Eq, PartialEq)]
pub struct BlindedElement<CS: CipherSuite>(pub(crate) BigUint, PhantomData<CS>);

/// The evaluated element `N` sent by the server to the client.
#[derive_where(Clone, Debug, Eq, PartialEq)]
pub struct EvaluationElement<CS: CipherSuite>(pub(crate) BigUint, PhantomData<CS>);

/// Contains the fields that are returned by a client blind
#[derive_where(Debug)]
pub struct OprfClientBlindResult<CS: CipherSuite> {
    /// The state to be persisted on the client
    pub state: OprfClient<CS>,
    /// The message to send to the server
    pub message: BlindedElement<CS>,
}

/////////////////////////
// API Implementations //
// =================== //
/////////////////////////

impl<CS: CipherSuite> OprfClient<CS> {
    /// Computes the first step of the protocol: samples `r` and blinds
    /// `H1(input)` with it.
    ///
    /// # Errors
    /// - [`Error::Random`](crate::Error::Random) if the RNG fails.
    /// - [`Error::Sampling`](crate::Error::Sampling) if no valid blind was
    ///   drawn.
    pub fn blind<R: RngCore + CryptoRng>(
        input: &[u8],
        blinding_factor_rng: &mut R,
    ) -> Result<OprfClientBlindResult<CS>> {
        let blind = CS::Group::random_scalar(blinding_factor_rng)?;
        Ok(Self::deterministic_blind_unchecked_inner(input, blind))
    }

    #[cfg(any(feature = "danger", test))]
    /// Computes the first step of the protocol, taking a blinding factor
    /// scalar as input instead of sampling from an RNG.
    ///
    /// # Caution
    ///
    /// This should be used with caution, since a blind must never be used
    /// for more than one query.
    pub fn deterministic_blind_unchecked(
        input: &[u8],
        blind: Scalar,
    ) -> OprfClientBlindResult<CS> {
        Self::deterministic_blind_unchecked_inner(input, blind)
    }

    fn deterministic_blind_unchecked_inner(input: &[u8], blind: Scalar) -> OprfClientBlindResult<CS> {
        let mapped_element = CS::Group::hash_to_group::<CS::Hash>(input);
        let blinded_element = CS::Group::scalar_mult(&mapped_element, &blind);
        OprfClientBlindResult {
            state: Self {
                blind,
                _suite: PhantomData,
            },
            message: BlindedElement(blinded_element, PhantomData),
        }
    }

    /// Computes the third step of the protocol, in which the client unblinds
    /// the server's message and derives the PRF output.
    ///
    /// # Errors
    /// [`Error::InvalidScalar`](crate::Error::InvalidScalar) if the blind is
    /// not invertible modulo `q`.
    pub fn finalize(self, evaluation_element: &EvaluationElement<CS>) -> Result<Output<CS::Hash>> {
        let inverse = CS::Group::invert_scalar(&self.blind)?;
        let unblinded_element = CS::Group::scalar_mult(&evaluation_element.0, &inverse);
        Ok(finalize_after_unblind::<CS>(&unblinded_element))
    }
}

impl<CS: CipherSuite> OprfServer<CS> {
    /// Produces a new instance of an [OprfServer] with a key sampled
    /// uniformly from `[2, q - 1]`.
    ///
    /// # Errors
    /// - [`Error::Random`](crate::Error::Random) if the RNG fails.
    /// - [`Error::Sampling`](crate::Error::Sampling) if no valid key was
    ///   drawn.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        Ok(Self::from_scalar(CS::Group::random_scalar(rng)?))
    }

    /// Produces a new instance of an [OprfServer] using a supplied set of
    /// bytes to represent the server's private key
    ///
    /// # Errors
    /// [`Error::InvalidScalar`](crate::Error::InvalidScalar) if the bytes do
    /// not encode a scalar in `[2, q - 1]`.
    pub fn new_with_key(private_key_bytes: &[u8]) -> Result<Self> {
        CS::Group::deserialize_scalar(private_key_bytes).map(Self::from_scalar)
    }

    pub(crate) fn from_scalar(sk: Scalar) -> Self {
        Self {
            sk,
            _suite: PhantomData,
        }
    }

    /// Serializes the private key. Only meant for persisting a built
    /// database.
    pub fn serialize(&self) -> GenericArray<u8, <CS::Group as Group>::ScalarLen> {
        CS::Group::serialize_scalar(&self.sk)
    }

    #[cfg(any(feature = "danger", test))]
    /// Exposes the private key
    pub fn get_private_key(&self) -> Scalar {
        self.sk.clone()
    }

    /// Computes the second step of the protocol: `N = M^k`. This message is
    /// sent from the server (who holds the OPRF key) to the client.
    pub fn evaluate(&self, blinded_element: &BlindedElement<CS>) -> EvaluationElement<CS> {
        EvaluationElement(
            CS::Group::scalar_mult(&blinded_element.0, &self.sk),
            PhantomData,
        )
    }

    /// Computes the PRF output `H2(H1(input)^k)` directly, without blinding.
    /// This is what the server inserts into its filters, and what a client
    /// obtains after [`OprfClient::finalize`].
    pub fn evaluate_unblinded(&self, input: &[u8]) -> Output<CS::Hash> {
        let mapped_element = CS::Group::hash_to_group::<CS::Hash>(input);
        finalize_after_unblind::<CS>(&CS::Group::scalar_mult(&mapped_element, &self.sk))
    }
}

impl<CS: CipherSuite> BlindedElement<CS> {
    /// Serializes to exactly `ElemLen` big-endian bytes.
    pub fn serialize(&self) -> GenericArray<u8, <CS::Group as Group>::ElemLen> {
        CS::Group::serialize_elem(&self.0)
    }

    /// Deserializes and validates a blinded element.
    ///
    /// # Errors
    /// [`Error::InvalidGroupElement`](crate::Error::InvalidGroupElement) if
    /// the bytes are not a valid subgroup element.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        CS::Group::deserialize_elem(input).map(|elem| Self(elem, PhantomData))
    }
}

impl<CS: CipherSuite> EvaluationElement<CS> {
    /// Serializes to exactly `ElemLen` big-endian bytes.
    pub fn serialize(&self) -> GenericArray<u8, <CS::Group as Group>::ElemLen> {
        CS::Group::serialize_elem(&self.0)
    }

    /// Deserializes and validates an evaluated element.
    ///
    /// # Errors
    /// [`Error::InvalidGroupElement`](crate::Error::InvalidGroupElement) if
    /// the bytes are not a valid subgroup element.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        CS::Group::deserialize_elem(input).map(|elem| Self(elem, PhantomData))
    }
}

/////////////////////
// Inner functions //
// =============== //
/////////////////////

// y = H2(I2OSP(Z, ElemLen))
fn finalize_after_unblind<CS: CipherSuite>(unblinded_element: &BigUint) -> Output<CS::Hash> {
    CS::Hash::new()
        .chain_update(CS::Group::serialize_elem(unblinded_element))
        .finalize()
}

///////////
// Tests //
// ===== //
///////////
