// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Errors which are produced during the build of a server database or an
//! execution of the lookup protocol

use displaydoc::Display;

/// [`Result`](core::result::Result) shorthand that uses [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Represents an error in the manipulation of protocol data
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// Invalid build or protocol parameter.
    Parameter,
    /// Group element is malformed, outside `[2, p - 1]` or not a quadratic
    /// residue.
    InvalidGroupElement,
    /// Scalar is malformed, outside `[2, q - 1]` or not invertible.
    InvalidScalar,
    /// Serialized Bloom filter is truncated or declares a degenerate shape.
    MalformedFilter,
    /// Failure to deserialize a protocol message or database snapshot.
    Deserialization,
    /// The request was built for a different bucket prefix width.
    BucketBitsMismatch,
    /// Bucket index does not fit in the configured prefix width.
    BucketOutOfRange,
    /// Rejection sampling of a scalar exhausted its retry budget.
    Sampling,
    /// The random number generator failed to produce entropy.
    Random,
}

impl std::error::Error for Error {}
