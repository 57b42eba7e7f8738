// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! An in-process pairing of a [`ServerDb`] and a [`Client`], for callers that
//! hold both sides.

use derive_where::derive_where;
use log::warn;
use rand_core::{CryptoRng, RngCore};

use crate::{CipherSuite, Client, Config, Error, Result, ServerDb};

/// Runs full lookups against a database it owns.
#[derive_where(Clone, Debug)]
pub struct Protocol<CS: CipherSuite> {
    server: ServerDb<CS>,
    client: Client<CS>,
}

impl<CS: CipherSuite> Protocol<CS> {
    /// Builds a database over `leaked` under a fresh key, and a matching
    /// client.
    ///
    /// # Errors
    /// Anything [`ServerDb::build`] returns.
    pub fn setup<R, T>(leaked: &[T], config: &Config, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng,
        T: AsRef<[u8]> + Sync,
    {
        Ok(Self::new(ServerDb::build(leaked, config, rng)?))
    }

    /// Wraps an existing database, for example one restored with
    /// [`ServerDb::deserialize`].
    pub fn new(server: ServerDb<CS>) -> Self {
        let client = Client::for_database(&server);
        Self { server, client }
    }

    /// Checks whether `password` is in the leaked set: prepare, respond and
    /// finalize in one call.
    ///
    /// A lookup whose messages fail validation is reported as a miss and
    /// logged.
    ///
    /// # Errors
    /// [`Error::Random`] or [`Error::Sampling`] if no blind could be drawn.
    pub fn query<R: RngCore + CryptoRng>(&self, password: &[u8], rng: &mut R) -> Result<bool> {
        let (session, request) = self.client.prepare(password, rng)?;
        let outcome = self
            .server
            .respond_to(&request)
            .and_then(|response| self.client.finalize(session, &response));

        match outcome {
            Ok(leaked) => Ok(leaked),
            Err(error @ (Error::Random | Error::Sampling)) => Err(error),
            Err(error) => {
                warn!("lookup in bucket {} treated as a miss: {error}", request.bucket());
                Ok(false)
            }
        }
    }

    /// The server half.
    pub fn server(&self) -> &ServerDb<CS> {
        &self.server
    }

    /// The client half.
    pub fn client(&self) -> &Client<CS> {
        &self.client
    }
}
