// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The two messages exchanged during a lookup, and their wire encodings.
//!
//! ```text
//! request  = u16 b ‖ I2OSP(bucket, ⌈b / 8⌉) ‖ I2OSP(M, ElemLen)
//! response = I2OSP(N, ElemLen) ‖ filter
//! ```
//!
//! All integers are big-endian. The filter travels as raw bytes and is
//! validated by the client when it finalizes.

use derive_where::derive_where;
use generic_array::typenum::Unsigned;

use crate::bucket::{bucket_index_len, check_bucket_index, validate_bucket_bits};
use crate::oprf::{BlindedElement, EvaluationElement};
use crate::serialization::{os2ip, take};
use crate::{CipherSuite, Error, Group, Result};

/// The client's query: its public bucket and the blinded element `M`.
#[derive_where(Clone, Debug, Eq, PartialEq)]
pub struct QueryRequest<CS: CipherSuite> {
    bucket_bits: u8,
    bucket: u32,
    blinded_element: BlindedElement<CS>,
}

/// The server's answer: the evaluated element `N` and the serialized filter
/// of the requested bucket.
#[derive_where(Clone, Debug, Eq, PartialEq)]
pub struct QueryResponse<CS: CipherSuite> {
    evaluation_element: EvaluationElement<CS>,
    filter: Vec<u8>,
}

impl<CS: CipherSuite> QueryRequest<CS> {
    /// Assembles a request.
    ///
    /// # Errors
    /// - [`Error::Parameter`] if `bucket_bits` is outside `[1, 32]`.
    /// - [`Error::BucketOutOfRange`] if `bucket >= 2^bucket_bits`.
    pub fn new(
        bucket_bits: u8,
        bucket: u32,
        blinded_element: BlindedElement<CS>,
    ) -> Result<Self> {
        validate_bucket_bits(bucket_bits)?;
        check_bucket_index(bucket, bucket_bits)?;
        Ok(Self {
            bucket_bits,
            bucket,
            blinded_element,
        })
    }

    /// The prefix width the client hashed with.
    pub fn bucket_bits(&self) -> u8 {
        self.bucket_bits
    }

    /// The requested bucket.
    pub fn bucket(&self) -> u32 {
        self.bucket
    }

    /// The blinded element `M`.
    pub fn blinded_element(&self) -> &BlindedElement<CS> {
        &self.blinded_element
    }

    /// Serializes to `2 + ⌈b / 8⌉ + ElemLen` bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let index_len = bucket_index_len(self.bucket_bits);
        let element = self.blinded_element.serialize();

        let mut output = Vec::with_capacity(2 + index_len + element.len());
        output.extend_from_slice(&u16::from(self.bucket_bits).to_be_bytes());
        // The index is below 2^b, so its low `index_len` bytes are exact.
        output.extend_from_slice(&self.bucket.to_be_bytes()[4 - index_len..]);
        output.extend_from_slice(&element);
        output
    }

    /// Parses a request of exactly the expected length.
    ///
    /// # Errors
    /// - [`Error::Deserialization`] on a bad prefix width, truncation or
    ///   trailing bytes.
    /// - [`Error::BucketOutOfRange`] if the index does not fit in `b` bits.
    /// - [`Error::InvalidGroupElement`] if `M` is not a valid element.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        let mut input = input;

        let width = take(&mut input, 2)?;
        let bucket_bits = u8::try_from(u16::from_be_bytes([width[0], width[1]]))
            .map_err(|_| Error::Deserialization)?;
        validate_bucket_bits(bucket_bits).map_err(|_| Error::Deserialization)?;

        let index = os2ip(take(&mut input, bucket_index_len(bucket_bits))?)?;
        let bucket = u32::try_from(index).map_err(|_| Error::Deserialization)?;
        check_bucket_index(bucket, bucket_bits)?;

        let element = take(&mut input, <CS::Group as Group>::ElemLen::USIZE)?;
        if !input.is_empty() {
            return Err(Error::Deserialization);
        }

        Ok(Self {
            bucket_bits,
            bucket,
            blinded_element: BlindedElement::deserialize(element)?,
        })
    }
}

impl<CS: CipherSuite> QueryResponse<CS> {
    /// Pairs an evaluated element with serialized filter bytes.
    pub fn new(evaluation_element: EvaluationElement<CS>, filter: Vec<u8>) -> Self {
        Self {
            evaluation_element,
            filter,
        }
    }

    /// The evaluated element `N`.
    pub fn evaluation_element(&self) -> &EvaluationElement<CS> {
        &self.evaluation_element
    }

    /// The serialized bucket filter, unvalidated.
    pub fn filter(&self) -> &[u8] {
        &self.filter
    }

    /// Serializes to `ElemLen` bytes followed by the filter.
    pub fn serialize(&self) -> Vec<u8> {
        let element = self.evaluation_element.serialize();
        let mut output = Vec::with_capacity(element.len() + self.filter.len());
        output.extend_from_slice(&element);
        output.extend_from_slice(&self.filter);
        output
    }

    /// Splits a response into `N` and the filter bytes. The filter itself is
    /// only parsed on finalization.
    ///
    /// # Errors
    /// - [`Error::Deserialization`] if the input is shorter than `ElemLen`.
    /// - [`Error::InvalidGroupElement`] if `N` is not a valid element.
    pub fn deserialize(input: &[u8]) -> Result<Self> {
        let mut input = input;
        let element = take(&mut input, <CS::Group as Group>::ElemLen::USIZE)?;
        Ok(Self {
            evaluation_element: EvaluationElement::deserialize(element)?,
            filter: input.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;

    use super::*;
    use crate::group::{Modp1536, Modp2048};
    use crate::oprf::{OprfClient, OprfServer};
    use crate::BloomFilter;

    fn blinded<CS: CipherSuite>(input: &[u8]) -> BlindedElement<CS> {
        OprfClient::<CS>::blind(input, &mut OsRng).unwrap().message
    }

    fn request_layout<CS: CipherSuite>() {
        let element = blinded::<CS>(b"password");
        let request = QueryRequest::new(12, 0x5e8, element.clone()).unwrap();
        let bytes = request.serialize();

        let elem_len = <CS::Group as Group>::ElemLen::USIZE;
        assert_eq!(bytes.len(), 2 + 2 + elem_len);
        assert_eq!(&bytes[..4], &[0x00, 0x0c, 0x05, 0xe8]);
        assert_eq!(&bytes[4..], element.serialize().as_slice());
        assert_eq!(QueryRequest::<CS>::deserialize(&bytes).unwrap(), request);

        let wide = QueryRequest::new(32, u32::MAX, element.clone()).unwrap();
        let bytes = wide.serialize();
        assert_eq!(&bytes[..6], &[0x00, 0x20, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(QueryRequest::<CS>::deserialize(&bytes).unwrap(), wide);

        let narrow = QueryRequest::new(1, 1, element).unwrap();
        assert_eq!(&narrow.serialize()[..3], &[0x00, 0x01, 0x01]);
    }

    #[test]
    fn test_request_layout() {
        request_layout::<Modp1536>();
        request_layout::<Modp2048>();
    }

    #[test]
    fn test_request_construction_checks() {
        let element = blinded::<Modp1536>(b"x");
        assert_eq!(
            QueryRequest::new(0, 0, element.clone()),
            Err(Error::Parameter)
        );
        assert_eq!(
            QueryRequest::new(8, 256, element),
            Err(Error::BucketOutOfRange)
        );
    }

    #[test]
    fn test_request_rejects_malformed() {
        let request = QueryRequest::new(12, 7, blinded::<Modp1536>(b"x")).unwrap();
        let bytes = request.serialize();

        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&bytes[..bytes.len() - 1]),
            Err(Error::Deserialization)
        );
        let mut trailing = bytes.clone();
        trailing.push(0);
        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&trailing),
            Err(Error::Deserialization)
        );
        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&[]),
            Err(Error::Deserialization)
        );

        for width in [0u16, 33, 0x0100 | 12] {
            let mut bad = bytes.clone();
            bad[..2].copy_from_slice(&width.to_be_bytes());
            assert_eq!(
                QueryRequest::<Modp1536>::deserialize(&bad),
                Err(Error::Deserialization)
            );
        }

        // 0x1000 needs 13 bits
        let mut out_of_range = bytes.clone();
        out_of_range[2..4].copy_from_slice(&[0x10, 0x00]);
        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&out_of_range),
            Err(Error::BucketOutOfRange)
        );

        let mut identity = bytes.clone();
        identity[4..].fill(0);
        *identity.last_mut().unwrap() = 1;
        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&identity),
            Err(Error::InvalidGroupElement)
        );

        // A request from a larger group does not parse in a smaller one
        let other = QueryRequest::new(12, 7, blinded::<Modp2048>(b"x")).unwrap();
        assert_eq!(
            QueryRequest::<Modp1536>::deserialize(&other.serialize()),
            Err(Error::Deserialization)
        );
    }

    #[test]
    fn test_response_layout() {
        let server = OprfServer::<Modp1536>::new(&mut OsRng).unwrap();
        let evaluated = server.evaluate(&blinded::<Modp1536>(b"password"));
        let filter = BloomFilter::empty().serialize();

        let response = QueryResponse::new(evaluated.clone(), filter.clone());
        let bytes = response.serialize();
        assert_eq!(bytes.len(), 192 + filter.len());
        assert_eq!(&bytes[..192], evaluated.serialize().as_slice());
        assert_eq!(&bytes[192..], filter.as_slice());

        let parsed = QueryResponse::<Modp1536>::deserialize(&bytes).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(parsed.filter(), filter.as_slice());

        // The filter is opaque at this layer
        let bare = QueryResponse::<Modp1536>::deserialize(&bytes[..192]).unwrap();
        assert!(bare.filter().is_empty());
        assert_eq!(
            QueryResponse::<Modp1536>::deserialize(&bytes[..191]),
            Err(Error::Deserialization)
        );

        let mut zero = bytes;
        zero[..192].fill(0);
        assert_eq!(
            QueryResponse::<Modp1536>::deserialize(&zero),
            Err(Error::InvalidGroupElement)
        );
    }
}
