// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The server side: an immutable database of per-bucket Bloom filters over
//! OPRF outputs, and the request handler that answers lookups against it.

use core::fmt;
use std::collections::BTreeMap;

use derive_where::derive_where;
use generic_array::typenum::Unsigned;
use log::{debug, trace};
use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;

use crate::bucket::{check_bucket_index, prefix, validate_bucket_bits};
use crate::message::{QueryRequest, QueryResponse};
use crate::oprf::{BlindedElement, OprfServer};
use crate::serialization::{take, take_u32};
use crate::{BloomFilter, CipherSuite, Config, Error, Group, Result};

/// A built leak database. Holds the OPRF key `k`, the bucket width `b` and
/// one filter per non-empty bucket, where bucket `i` contains
/// `F(k, x)` for every leaked `x` with `MSB_b(SHA-256(x)) = i`.
///
/// The database is never mutated after [`ServerDb::build`], so one instance
/// may answer any number of concurrent [`ServerDb::respond`] calls.
#[derive_where(Clone)]
pub struct ServerDb<CS: CipherSuite> {
    oprf: OprfServer<CS>,
    bucket_bits: u8,
    filters: BTreeMap<u32, BloomFilter>,
}

impl<CS: CipherSuite> fmt::Debug for ServerDb<CS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerDb")
            .field("suite", &CS::ID)
            .field("bucket_bits", &self.bucket_bits)
            .field("buckets", &self.filters.len())
            .finish_non_exhaustive()
    }
}

impl<CS: CipherSuite> ServerDb<CS> {
    /// Samples a fresh OPRF key and builds the database over `leaked`.
    ///
    /// # Errors
    /// - [`Error::Parameter`] if `config` fails [`Config::validate`].
    /// - [`Error::Random`] or [`Error::Sampling`] if key generation fails.
    pub fn build<R, T>(leaked: &[T], config: &Config, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng,
        T: AsRef<[u8]> + Sync,
    {
        config.validate()?;
        Self::build_with_key(leaked, config, OprfServer::new(rng)?)
    }

    /// Builds the database over `leaked` under an existing OPRF key.
    ///
    /// Entries are partitioned by bucket, then each bucket's filter is sized
    /// from its own population and filled in parallel. Duplicate entries are
    /// inserted twice, which is harmless.
    ///
    /// # Errors
    /// [`Error::Parameter`] if `config` fails [`Config::validate`] or a
    /// bucket needs a filter too large to describe.
    pub fn build_with_key<T>(leaked: &[T], config: &Config, oprf: OprfServer<CS>) -> Result<Self>
    where
        T: AsRef<[u8]> + Sync,
    {
        config.validate()?;

        let mut buckets: BTreeMap<u32, Vec<&[u8]>> = BTreeMap::new();
        for entry in leaked {
            let entry = entry.as_ref();
            buckets
                .entry(prefix(entry, config.bucket_bits))
                .or_default()
                .push(entry);
        }

        let filters = buckets
            .into_par_iter()
            .map(|(bucket, entries)| -> Result<(u32, BloomFilter)> {
                let mut filter = BloomFilter::with_target_fpr(
                    entries.len(),
                    config.target_fpr,
                    config.min_filter_bits,
                )?;
                for entry in entries {
                    filter.insert(&oprf.evaluate_unblinded(entry));
                }
                trace!(
                    "bucket {bucket}: {} entries, m = {}, k = {}",
                    filter.items(),
                    filter.m_bits(),
                    filter.hashes()
                );
                Ok((bucket, filter))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!(
            "built {} database: {} entries over {} of 2^{} buckets",
            CS::ID,
            leaked.len(),
            filters.len(),
            config.bucket_bits
        );

        Ok(Self {
            oprf,
            bucket_bits: config.bucket_bits,
            filters,
        })
    }

    /// Evaluates `M` under `k` and returns it with the filter of `bucket`.
    /// A bucket with no entries is answered with [`BloomFilter::empty`].
    ///
    /// # Errors
    /// [`Error::BucketOutOfRange`] if `bucket >= 2^b`.
    pub fn respond(
        &self,
        bucket: u32,
        blinded_element: &BlindedElement<CS>,
    ) -> Result<QueryResponse<CS>> {
        check_bucket_index(bucket, self.bucket_bits)?;
        let evaluation_element = self.oprf.evaluate(blinded_element);
        let filter = match self.filters.get(&bucket) {
            Some(filter) => filter.serialize(),
            None => BloomFilter::empty().serialize(),
        };
        trace!("answered bucket {bucket} with {} filter bytes", filter.len());
        Ok(QueryResponse::new(evaluation_element, filter))
    }

    /// Answers a parsed request.
    ///
    /// # Errors
    /// - [`Error::BucketBitsMismatch`] if the request was bucketed with a
    ///   different `b`.
    /// - Anything [`ServerDb::respond`] returns.
    pub fn respond_to(&self, request: &QueryRequest<CS>) -> Result<QueryResponse<CS>> {
        if request.bucket_bits() != self.bucket_bits {
            return Err(Error::BucketBitsMismatch);
        }
        self.respond(request.bucket(), request.blinded_element())
    }

    /// Answers a serialized request with a serialized response.
    ///
    /// # Errors
    /// Anything [`QueryRequest::deserialize`] or [`ServerDb::respond_to`]
    /// returns.
    pub fn respond_bytes(&self, request: &[u8]) -> Result<Vec<u8>> {
        let request = QueryRequest::deserialize(request)?;
        Ok(self.respond_to(&request)?.serialize())
    }

    /// The bucket width `b` clients must use.
    pub fn bucket_bits(&self) -> u8 {
        self.bucket_bits
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.filters.len()
    }

    /// The filter stored for `bucket`, if it holds any entries.
    pub fn filter(&self, bucket: u32) -> Option<&BloomFilter> {
        self.filters.get(&bucket)
    }

    /// Iterates over the non-empty buckets in ascending order.
    pub fn filters(&self) -> impl Iterator<Item = (u32, &BloomFilter)> {
        self.filters.iter().map(|(bucket, filter)| (*bucket, filter))
    }

    #[cfg(test)]
    pub(crate) fn oprf(&self) -> &OprfServer<CS> {
        &self.oprf
    }

    /// Serializes the whole database, key included:
    ///
    /// ```text
    /// k ‖ u8 b ‖ u32 count ‖ count × (u32 bucket ‖ u32 len ‖ filter)
    /// ```
    ///
    /// Buckets appear in ascending order. The output is secret.
    pub fn serialize(&self) -> Vec<u8> {
        let mut output = self.oprf.serialize().to_vec();
        output.push(self.bucket_bits);
        output.extend_from_slice(&(self.filters.len() as u32).to_be_bytes());
        for (bucket, filter) in &self.filters {
            let bytes = filter.serialize();
            output.extend_from_slice(&bucket.to_be_bytes());
            output.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            output.extend_from_slice(&bytes);
        }
        output
    }

    /// Restores a database written by [`ServerDb::serialize`].
    ///
    /// # Errors
    /// - [`Error::InvalidScalar`] if the key is not in `[2, q - 1]`.
    /// - [`Error::MalformedFilter`] if a stored filter does not parse.
    /// - [`Error::Deserialization`] on truncation, trailing bytes, a bad
    ///   bucket width, a repeated or out-of-range bucket, or an entry length
    ///   that disagrees with its filter's framing.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        let mut input = input;

        let key = take(&mut input, <CS::Group as Group>::ScalarLen::USIZE)?;
        let oprf = OprfServer::new_with_key(key)?;

        let bucket_bits = take(&mut input, 1)?[0];
        validate_bucket_bits(bucket_bits).map_err(|_| Error::Deserialization)?;

        let count = take_u32(&mut input)?;
        let mut filters = BTreeMap::new();
        for _ in 0..count {
            let bucket = take_u32(&mut input)?;
            check_bucket_index(bucket, bucket_bits).map_err(|_| Error::Deserialization)?;
            let len = take_u32(&mut input)? as usize;
            let filter = BloomFilter::deserialize(take(&mut input, len)?)?;
            if filter.serialized_len() != len {
                return Err(Error::Deserialization);
            }
            if filters.insert(bucket, filter).is_some() {
                return Err(Error::Deserialization);
            }
        }

        if !input.is_empty() {
            return Err(Error::Deserialization);
        }

        debug!(
            "restored {} database with {} buckets of 2^{}",
            CS::ID,
            filters.len(),
            bucket_bits
        );

        Ok(Self {
            oprf,
            bucket_bits,
            filters,
        })
    }
}
