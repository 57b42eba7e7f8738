// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Build-time parameters of a server database

use crate::bloom::DEFAULT_MIN_FILTER_BITS;
use crate::bucket::{validate_bucket_bits, DEFAULT_BUCKET_BITS};
use crate::{Error, Result};

/// Default per-bucket false-positive target.
pub const DEFAULT_TARGET_FPR: f64 = 1e-4;

/// Parameters fixed when a [`ServerDb`](crate::ServerDb) is built. The
/// group is chosen separately, as the [`CipherSuite`](crate::CipherSuite)
/// type parameter.
///
/// `bucket_bits` is a protocol-wide constant: clients must be constructed
/// with the same value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct Config {
    /// Bucket prefix width `b`, in `[1, 32]`.
    pub bucket_bits: u8,
    /// Per-bucket Bloom filter false-positive target, in `(0, 1)`.
    pub target_fpr: f64,
    /// Floor on the bit length of every bucket filter.
    pub min_filter_bits: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket_bits: DEFAULT_BUCKET_BITS,
            target_fpr: DEFAULT_TARGET_FPR,
            min_filter_bits: DEFAULT_MIN_FILTER_BITS,
        }
    }
}

impl Config {
    /// Default parameters with the given bucket width and target rate.
    pub fn new(bucket_bits: u8, target_fpr: f64) -> Self {
        Self {
            bucket_bits,
            target_fpr,
            ..Self::default()
        }
    }

    /// Fails fast on parameters the build pipeline cannot honour.
    ///
    /// # Errors
    /// [`Error::Parameter`] if `bucket_bits` is outside `[1, 32]`,
    /// `target_fpr` is outside `(0, 1)` or `min_filter_bits` is zero.
    pub fn validate(&self) -> Result<()> {
        validate_bucket_bits(self.bucket_bits)?;
        if !(self.target_fpr > 0.0 && self.target_fpr < 1.0) {
            return Err(Error::Parameter);
        }
        if self.min_filter_bits == 0 {
            return Err(Error::Parameter);
        }
        Ok(())
    }
}
