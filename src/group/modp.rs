// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The MODP safe-prime groups of RFC 3526.

use once_cell::sync::OnceCell;

use generic_array::typenum::{U192, U256, U384};
use hex_literal::hex;

use super::{Group, GroupParams};

// RFC 3526, section 2: 1536-bit MODP group (id 5).
const MODP_1536_PRIME: [u8; 192] = hex!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74"
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437"
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED"
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05"
    "98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB"
    "9ED529077096966D670C354E4ABC9804F1746C08CA237327FFFFFFFFFFFFFFFF"
);

// RFC 3526, section 3: 2048-bit MODP group (id 14).
const MODP_2048_PRIME: [u8; 256] = hex!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74"
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437"
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED"
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05"
    "98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB"
    "9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B"
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718"
    "3995497CEA956AE515D2261898FA051015728E5A8AACAA68FFFFFFFFFFFFFFFF"
);

// RFC 3526, section 4: 3072-bit MODP group (id 15).
const MODP_3072_PRIME: [u8; 384] = hex!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74"
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437"
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED"
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05"
    "98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB"
    "9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B"
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718"
    "3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D04507A33"
    "A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7"
    "ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6BF12FFA06D98A0864"
    "D87602733EC86A64521F2B18177B200CBBE117577A615D6C770988C0BAD946E2"
    "08E24FA074E5AB3143DB5BFCE0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF"
);

macro_rules! impl_modp_group {
    ($name:ident, $label:literal, $len:ty, $prime:ident) => {
        /// [`Group`] implementation for the quadratic residues modulo the
        #[doc = concat!("RFC 3526 ", $label, " safe prime, with SHA-256 as its hash.")]
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name;

        impl crate::CipherSuite for $name {
            const ID: &'static str = $label;

            type Group = $name;

            type Hash = sha2::Sha256;
        }

        impl Group for $name {
            type ElemLen = $len;

            type ScalarLen = $len;

            fn params() -> &'static GroupParams {
                static PARAMS: OnceCell<GroupParams> = OnceCell::new();
                PARAMS.get_or_init(|| GroupParams::from_safe_prime(&$prime))
            }
        }
    };
}

impl_modp_group!(Modp1536, "MODP-1536", U192, MODP_1536_PRIME);
impl_modp_group!(Modp2048, "MODP-2048", U256, MODP_2048_PRIME);
impl_modp_group!(Modp3072, "MODP-3072", U384, MODP_3072_PRIME);
