// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! A privacy-preserving lookup of passwords against a set of leaked
//! credentials.
//!
//! A server holding the leaked set `L` and a secret key `k` publishes, for
//! every bucket `i` in `[0, 2^b)`, a Bloom filter over `F(k, x)` for the
//! entries `x ∈ L` whose SHA-256 digest starts with the `b` bits of `i`. `F`
//! is the 2HashDH oblivious PRF over the quadratic residues modulo a safe
//! prime:
//!
//! ```text
//! F(k, x) = H2(H1(x)^k)
//! ```
//!
//! To check a password, a client sends its bucket and the blinded element
//! `H1(pw)^r`. The server raises it to `k` and returns it with the bucket's
//! filter. The client strips `r`, derives `F(k, pw)` and tests the filter.
//! The server learns only the bucket; the client learns only membership,
//! up to the filter's false-positive rate.
//!
//! # Example
//!
//! ```
//! use leakcheck::{Client, Config, Modp2048, ServerDb};
//! use rand::rngs::OsRng;
//!
//! let leaked = ["123456", "password", "qwerty"];
//! let server = ServerDb::<Modp2048>::build(&leaked, &Config::default(), &mut OsRng)?;
//!
//! let client = Client::<Modp2048>::new(server.bucket_bits())?;
//! let (session, request) = client.prepare(b"password", &mut OsRng)?;
//!
//! // `request.serialize()` goes over the wire...
//! let response = server.respond_bytes(&request.serialize())?;
//! // ...and the response comes back.
//! assert!(client.finalize_bytes(session, &response)?);
//! # Ok::<(), leakcheck::Error>(())
//! ```
//!
//! [`Protocol`] runs both sides in one process.
//!
//! # Features
//!
//! - `serde` (default) derives `Serialize` and `Deserialize` for [`Config`]
//!   and [`BloomFilter`].
//! - `danger` exposes APIs that take caller-chosen blinds. Never enable it
//!   outside tests.

#![deny(missing_docs)]
#![deny(unsafe_code)]

mod serialization;

pub mod bloom;
pub mod bucket;
pub mod ciphersuite;
pub mod client;
pub mod config;
pub mod error;
pub mod group;
pub mod message;
pub mod oprf;
pub mod protocol;
pub mod server;

#[cfg(test)]
mod tests;

pub use crate::bloom::BloomFilter;
pub use crate::bucket::bucket_index;
pub use crate::ciphersuite::CipherSuite;
pub use crate::client::{Client, QuerySession};
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::group::{Group, GroupParams, Modp1536, Modp2048, Modp3072, Scalar};
pub use crate::message::{QueryRequest, QueryResponse};
pub use crate::oprf::{BlindedElement, EvaluationElement, OprfClient, OprfServer};
pub use crate::protocol::Protocol;
pub use crate::server::ServerDb;
