// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Defines the CipherSuite trait to specify the underlying primitives for the
//! lookup protocol

use digest::Digest;

use crate::Group;

/// Configures the underlying primitives used by the OPRF, the server
/// database and the client.
///
/// Client and server must agree on the suite; it fixes the group (and hence
/// the size of every group element on the wire) and the hash used for `H1`
/// and `H2`.
pub trait CipherSuite: Send + Sync + 'static {
    /// The ciphersuite identifier.
    const ID: &'static str;

    /// A safe-prime group. See [`Group`].
    type Group: Group;

    /// The main hash function used for hashing to the group and deriving the
    /// PRF output.
    type Hash: Digest;
}
