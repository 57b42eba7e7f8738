// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The public prefix map that partitions the leaked set into buckets.
//!
//! A bucket index is the top `b` bits of `SHA-256(x)`. It is the only thing
//! the server learns about a queried password directly.

use digest::Digest;
use sha2::Sha256;

use crate::{Error, Result};

/// Default bucket prefix width.
pub const DEFAULT_BUCKET_BITS: u8 = 12;

/// Widest supported bucket prefix.
pub const MAX_BUCKET_BITS: u8 = 32;

/// Checks that `bucket_bits` lies in `[1, 32]`.
///
/// # Errors
/// [`Error::Parameter`] otherwise.
pub fn validate_bucket_bits(bucket_bits: u8) -> Result<()> {
    if bucket_bits == 0 || bucket_bits > MAX_BUCKET_BITS {
        return Err(Error::Parameter);
    }
    Ok(())
}

/// Returns `MSB_b(SHA-256(input))` read big-endian.
///
/// # Errors
/// [`Error::Parameter`] if `bucket_bits` is outside `[1, 32]`.
pub fn bucket_index(input: &[u8], bucket_bits: u8) -> Result<u32> {
    validate_bucket_bits(bucket_bits)?;
    Ok(prefix(input, bucket_bits))
}

// `bucket_bits` must already be validated
pub(crate) fn prefix(input: &[u8], bucket_bits: u8) -> u32 {
    let digest = Sha256::digest(input);
    let top = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    top >> (MAX_BUCKET_BITS - bucket_bits)
}

/// Number of buckets, `2^b`.
pub(crate) fn bucket_count(bucket_bits: u8) -> u64 {
    1u64 << bucket_bits
}

/// Width in bytes of a bucket index on the wire, `⌈b / 8⌉`.
pub(crate) fn bucket_index_len(bucket_bits: u8) -> usize {
    (usize::from(bucket_bits) + 7) / 8
}

/// Rejects an index that does not fit in `bucket_bits` bits.
pub(crate) fn check_bucket_index(bucket: u32, bucket_bits: u8) -> Result<()> {
    if u64::from(bucket) >= bucket_count(bucket_bits) {
        return Err(Error::BucketOutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_of_sha256() {
        // SHA-256("password") = 5e884898...
        assert_eq!(bucket_index(b"password", 12).unwrap(), 0x5e8);
        assert_eq!(bucket_index(b"password", 12).unwrap(), 1512);
        assert_eq!(bucket_index(b"password", 8).unwrap(), 0x5e);
        assert_eq!(bucket_index(b"password", 32).unwrap(), 0x5e88_4898);
        assert_eq!(bucket_index(b"password", 1).unwrap(), 0);
        assert_eq!(bucket_index(b"hunter2", 12).unwrap(), 3922);
    }

    #[test]
    fn test_prefix_matches_digest() {
        for input in [&b""[..], b"a", b"123456", b"correct horse battery staple"] {
            let digest = Sha256::digest(input);
            let top = (u32::from(digest[0]) << 4) | (u32::from(digest[1]) >> 4);
            assert_eq!(bucket_index(input, 12).unwrap(), top);
            assert!(bucket_index(input, 20).unwrap() < 1 << 20);
        }
    }

    #[test]
    fn test_bucket_bits_bounds() {
        assert_eq!(bucket_index(b"x", 0), Err(Error::Parameter));
        assert_eq!(bucket_index(b"x", 33), Err(Error::Parameter));
        assert!(validate_bucket_bits(1).is_ok());
        assert!(validate_bucket_bits(MAX_BUCKET_BITS).is_ok());
    }

    #[test]
    fn test_wire_width_and_range() {
        assert_eq!(bucket_index_len(1), 1);
        assert_eq!(bucket_index_len(8), 1);
        assert_eq!(bucket_index_len(12), 2);
        assert_eq!(bucket_index_len(32), 4);

        assert!(check_bucket_index(4095, 12).is_ok());
        assert_eq!(check_bucket_index(4096, 12), Err(Error::BucketOutOfRange));
        assert!(check_bucket_index(u32::MAX, 32).is_ok());
    }
}
