// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Fixed-width big-endian encodings shared by the wire and snapshot formats

use generic_array::{ArrayLength, GenericArray};
use num_bigint::BigUint;

use crate::{Error, Result};

// Corresponds to the OS2IP() function from RFC8017, for inputs that fit a
// machine word
pub(crate) fn os2ip(input: &[u8]) -> Result<usize> {
    let significant = input.iter().skip_while(|&&byte| byte == 0).count();
    if significant > core::mem::size_of::<usize>() {
        return Err(Error::Deserialization);
    }
    Ok(input
        .iter()
        .fold(0usize, |acc, &byte| (acc << 8) | usize::from(byte)))
}

/// Left-pads the big-endian encoding of `input` to `L` bytes. Callers reduce
/// `input` below `256^L` first; wider inputs keep their low-order bytes.
pub(crate) fn i2osp_big<L: ArrayLength<u8>>(input: &BigUint) -> GenericArray<u8, L> {
    let bytes = input.to_bytes_be();
    let mut output = GenericArray::default();
    let take = bytes.len().min(L::USIZE);
    output[L::USIZE - take..].copy_from_slice(&bytes[bytes.len() - take..]);
    output
}

/// Splits `len` bytes off the front of `input`.
pub(crate) fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(Error::Deserialization);
    }
    let (head, tail) = input.split_at(len);
    *input = tail;
    Ok(head)
}

pub(crate) fn take_u32(input: &mut &[u8]) -> Result<u32> {
    let bytes = take(input, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
