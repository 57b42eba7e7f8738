// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! A counted Bloom filter with double hashing, sized from a target
//! false-positive rate, and its self-describing wire format.

use blake2::Blake2b;
use digest::consts::U32;
use digest::Digest;
use sha2::Sha256;

use crate::serialization::{take, take_u32};
use crate::{Error, Result};

type Blake2b256 = Blake2b<U32>;

/// Floor on the bit length of a sized filter.
pub const DEFAULT_MIN_FILTER_BITS: u32 = 1024;

/// Hash count of the filter served for buckets that hold no entries.
pub const DEFAULT_EMPTY_FILTER_HASHES: u16 = 3;

/// False-positive rate used when the requested one is outside `(0, 1)`.
const FALLBACK_FPR: f64 = 1e-6;

// u32 m || u16 κ || u32 n
const HEADER_LEN: usize = 10;

/// A Bloom filter of `m` bits probed by `κ` double-hashed indices
/// `h_i(x) = (SHA-256(x) + i * BLAKE2b-256(x)) mod m`.
///
/// Bit `b` lives in byte `b / 8`, least-significant bit first. The item
/// counter is informational only.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct BloomFilter {
    m_bits: u32,
    hashes: u16,
    items: u32,
    bits: Vec<u8>,
}

impl BloomFilter {
    /// Returns the standard optimum `(m, κ)` for `items` entries at
    /// `target_fpr`, with `m` floored at `min_m_bits`. The floor widens the
    /// filter but leaves `κ = round(-log2 p)` unchanged.
    ///
    /// An empty bucket is sized as if it held one entry, and a rate outside
    /// `(0, 1)` falls back to `1e-6`.
    ///
    /// # Errors
    /// [`Error::Parameter`] if `m` does not fit in a `u32` or `κ` in a `u16`.
    pub fn optimal_params(items: usize, target_fpr: f64, min_m_bits: u32) -> Result<(u32, u16)> {
        let n = items.max(1) as f64;
        let p = if target_fpr > 0.0 && target_fpr < 1.0 {
            target_fpr
        } else {
            FALLBACK_FPR
        };
        let ln2 = core::f64::consts::LN_2;

        let optimum = -(n * p.ln()) / (ln2 * ln2);
        let m = optimum.ceil();
        if m > f64::from(u32::MAX) {
            return Err(Error::Parameter);
        }
        let m_bits = (m as u32).max(min_m_bits);

        // κ follows the unfloored optimum. Deriving it from a floored m
        // lets i * h2 wrap onto a single residue class of m.
        let hashes = ((optimum / n) * ln2).round().max(1.0);
        if hashes > f64::from(u16::MAX) {
            return Err(Error::Parameter);
        }

        Ok((m_bits, hashes as u16))
    }

    /// Allocates an all-zero filter of `m_bits` bits probed by `hashes`
    /// indices.
    ///
    /// # Errors
    /// [`Error::Parameter`] if either argument is zero.
    pub fn new(m_bits: u32, hashes: u16) -> Result<Self> {
        if m_bits == 0 || hashes == 0 {
            return Err(Error::Parameter);
        }
        Ok(Self::zeroed(m_bits, hashes))
    }

    /// Allocates a filter right-sized for `items` entries. See
    /// [`BloomFilter::optimal_params`].
    ///
    /// # Errors
    /// [`Error::Parameter`] if the optimal shape is degenerate or too large.
    pub fn with_target_fpr(items: usize, target_fpr: f64, min_m_bits: u32) -> Result<Self> {
        let (m_bits, hashes) = Self::optimal_params(items, target_fpr, min_m_bits)?;
        Self::new(m_bits, hashes)
    }

    /// The small filter answered for buckets that hold no entries.
    pub fn empty() -> Self {
        Self::zeroed(DEFAULT_MIN_FILTER_BITS, DEFAULT_EMPTY_FILTER_HASHES)
    }

    fn zeroed(m_bits: u32, hashes: u16) -> Self {
        Self {
            m_bits,
            hashes,
            items: 0,
            bits: vec![0; byte_len(m_bits)],
        }
    }

    /// Bit length `m`.
    pub fn m_bits(&self) -> u32 {
        self.m_bits
    }

    /// Number of probed indices `κ`.
    pub fn hashes(&self) -> u16 {
        self.hashes
    }

    /// Number of inserted items.
    pub fn items(&self) -> u32 {
        self.items
    }

    /// Length of [`BloomFilter::serialize`]'s output.
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN + self.bits.len()
    }

    /// Sets the `κ` bits of `item`.
    pub fn insert(&mut self, item: &[u8]) {
        for index in self.indices(item) {
            self.bits[index / 8] |= 1 << (index % 8);
        }
        self.items = self.items.saturating_add(1);
    }

    /// Returns `true` iff every bit of `item` is set. A `false` is
    /// definitive; a `true` may be a false positive.
    pub fn contains(&self, item: &[u8]) -> bool {
        self.indices(item).all(|index| {
            self.bits
                .get(index / 8)
                .map_or(false, |byte| byte & (1 << (index % 8)) != 0)
        })
    }

    fn indices(&self, item: &[u8]) -> impl Iterator<Item = usize> {
        let m = u64::from(self.m_bits);
        let h1 = reduce(&Sha256::digest(item), m);
        let h2 = reduce(&Blake2b256::digest(item), m);
        (0..u64::from(self.hashes)).map(move |i| ((h1 + i * h2) % m) as usize)
    }

    /// Serializes to `u32 m || u16 κ || u32 n || ⌈m / 8⌉` bytes, integers
    /// big-endian.
    pub fn serialize(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.serialized_len());
        output.extend_from_slice(&self.m_bits.to_be_bytes());
        output.extend_from_slice(&self.hashes.to_be_bytes());
        output.extend_from_slice(&self.items.to_be_bytes());
        output.extend_from_slice(&self.bits);
        output
    }

    /// Deserializes a filter. Bytes past the declared bit array are ignored.
    ///
    /// # Errors
    /// [`Error::MalformedFilter`] if the input is shorter than its header
    /// declares, or declares `m = 0` or `κ = 0`.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        let mut input = input;
        let m_bits = take_u32(&mut input).map_err(|_| Error::MalformedFilter)?;
        let hashes = take(&mut input, 2)
            .map(|bytes| u16::from_be_bytes([bytes[0], bytes[1]]))
            .map_err(|_| Error::MalformedFilter)?;
        let items = take_u32(&mut input).map_err(|_| Error::MalformedFilter)?;

        if m_bits == 0 || hashes == 0 {
            return Err(Error::MalformedFilter);
        }
        let bits = input
            .get(..byte_len(m_bits))
            .ok_or(Error::MalformedFilter)?
            .to_vec();

        Ok(Self {
            m_bits,
            hashes,
            items,
            bits,
        })
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<u8>> for BloomFilter {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::deserialize(&bytes)
    }
}

impl From<BloomFilter> for Vec<u8> {
    fn from(filter: BloomFilter) -> Self {
        filter.serialize()
    }
}

fn byte_len(m_bits: u32) -> usize {
    (m_bits as usize + 7) / 8
}

// Big-endian digest modulo m, without materialising the 256-bit integer.
fn reduce(digest: &[u8], m: u64) -> u64 {
    digest
        .iter()
        .fold(0, |acc, &byte| ((acc << 8) | u64::from(byte)) % m)
}
