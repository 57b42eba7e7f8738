// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The client side of a lookup: prepare a blinded request, then finalize the
//! server's response into a membership verdict.

use core::marker::PhantomData;

use derive_where::derive_where;
use log::trace;
use rand_core::{CryptoRng, RngCore};

use crate::bucket::{prefix, validate_bucket_bits};
use crate::message::{QueryRequest, QueryResponse};
use crate::oprf::{OprfClient, OprfClientBlindResult};
use crate::{BloomFilter, CipherSuite, Result, ServerDb};

#[cfg(any(feature = "danger", test))]
use crate::group::Scalar;

/// A client configured with the bucket width `b` of the server it talks to.
#[derive_where(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Client<CS: CipherSuite> {
    bucket_bits: u8,
    _suite: PhantomData<CS>,
}

/// The state kept between [`Client::prepare`] and [`Client::finalize`]: the
/// bucket and the secret blind `r`. It is consumed on finalization so a blind
/// is never reused, and zeroizes `r` when dropped.
#[derive_where(Debug)]
pub struct QuerySession<CS: CipherSuite> {
    bucket: u32,
    state: OprfClient<CS>,
}

impl<CS: CipherSuite> QuerySession<CS> {
    /// The bucket the request was sent for.
    pub fn bucket(&self) -> u32 {
        self.bucket
    }
}

impl<CS: CipherSuite> Client<CS> {
    /// Creates a client for servers built with `bucket_bits`.
    ///
    /// # Errors
    /// [`Error::Parameter`](crate::Error::Parameter) if `bucket_bits` is
    /// outside `[1, 32]`.
    pub fn new(bucket_bits: u8) -> Result<Self> {
        validate_bucket_bits(bucket_bits)?;
        Ok(Self {
            bucket_bits,
            _suite: PhantomData,
        })
    }

    /// Creates a client matching the bucket width of `server`.
    pub fn for_database(server: &ServerDb<CS>) -> Self {
        Self {
            bucket_bits: server.bucket_bits(),
            _suite: PhantomData,
        }
    }

    /// The bucket width `b`.
    pub fn bucket_bits(&self) -> u8 {
        self.bucket_bits
    }

    /// The bucket `password` falls in. This is the only information a
    /// request reveals about it.
    pub fn bucket_index(&self, password: &[u8]) -> u32 {
        prefix(password, self.bucket_bits)
    }

    /// Blinds `password` under a fresh `r` and builds the request.
    ///
    /// # Errors
    /// - [`Error::Random`](crate::Error::Random) if the RNG fails.
    /// - [`Error::Sampling`](crate::Error::Sampling) if no valid blind was
    ///   drawn.
    pub fn prepare<R: RngCore + CryptoRng>(
        &self,
        password: &[u8],
        rng: &mut R,
    ) -> Result<(QuerySession<CS>, QueryRequest<CS>)> {
        let blind_result = OprfClient::blind(password, rng)?;
        self.assemble(password, blind_result)
    }

    #[cfg(any(feature = "danger", test))]
    /// Same as [`Client::prepare`] with a caller-chosen blind.
    ///
    /// # Caution
    ///
    /// A blind must never be used for more than one query.
    pub fn prepare_with_blind(
        &self,
        password: &[u8],
        blind: Scalar,
    ) -> Result<(QuerySession<CS>, QueryRequest<CS>)> {
        let blind_result = OprfClient::deterministic_blind_unchecked(password, blind);
        self.assemble(password, blind_result)
    }

    fn assemble(
        &self,
        password: &[u8],
        blind_result: OprfClientBlindResult<CS>,
    ) -> Result<(QuerySession<CS>, QueryRequest<CS>)> {
        let bucket = self.bucket_index(password);
        let request = QueryRequest::new(self.bucket_bits, bucket, blind_result.message)?;
        trace!("prepared query for bucket {bucket}");
        Ok((
            QuerySession {
                bucket,
                state: blind_result.state,
            },
            request,
        ))
    }

    /// Unblinds `N`, derives `y = F(k, password)` and tests it against the
    /// bucket filter. `true` means the password is leaked, up to the
    /// filter's false-positive rate; `false` is definitive.
    ///
    /// # Errors
    /// - [`Error::MalformedFilter`](crate::Error::MalformedFilter) if the
    ///   filter bytes do not parse.
    /// - [`Error::InvalidScalar`](crate::Error::InvalidScalar) if the blind
    ///   is not invertible.
    pub fn finalize(&self, session: QuerySession<CS>, response: &QueryResponse<CS>) -> Result<bool> {
        let filter = BloomFilter::deserialize(response.filter())?;
        let output = session.state.finalize(response.evaluation_element())?;
        Ok(filter.contains(&output))
    }

    /// Parses a serialized response, then [`Client::finalize`]s it.
    ///
    /// # Errors
    /// Anything [`QueryResponse::deserialize`] or [`Client::finalize`]
    /// returns.
    pub fn finalize_bytes(&self, session: QuerySession<CS>, response: &[u8]) -> Result<bool> {
        self.finalize(session, &QueryResponse::deserialize(response)?)
    }
}
