use crate::encoding::reader::Reader;
use crate::encoding::tag::{TagClass, TagHeader};
use crate::encoding::writer::Writer;
use crate::tags::payload::TagPayload;
use crate::{DecodeError, EncodeError};

/// A payload together with the exact header it was read with (or built with).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tagged<P> {
    header: TagHeader,
    value: P,
}

impl<P: TagPayload> Tagged<P> {
    pub fn application(value: P) -> Self {
        let header = TagHeader::balanced(
            TagClass::Application,
            P::DATA_TYPE as u8,
            value.header_len(TagClass::Application),
        );
        Self { header, value }
    }

    pub fn context(tag_number: u8, value: P) -> Self {
        let header = TagHeader::balanced(
            TagClass::Context,
            tag_number,
            value.header_len(TagClass::Context),
        );
        Self { header, value }
    }

    /// Reads an application tag of type `P`.
    ///
    /// A context tag here is a validation failure; an application tag of a
    /// different type is a tag-number mismatch.
    pub fn decode_application(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let header = TagHeader::decode(r)?;
        if header.class() != TagClass::Application {
            return Err(DecodeError::TagClassMismatch {
                expected: TagClass::Application,
                found: header.class(),
            });
        }
        let expected = P::DATA_TYPE as u8;
        if header.actual_tag_number() != expected {
            return Err(DecodeError::TagNumberMismatch {
                expected,
                found: header.actual_tag_number(),
            });
        }
        let value = P::decode_payload(r, &header)?;
        Ok(Self { header, value })
    }

    /// Reads the primitive context tag `[tag_number]`.
    pub fn decode_context(r: &mut Reader<'_>, tag_number: u8) -> Result<Self, DecodeError> {
        let header = TagHeader::decode(r)?;
        if header.actual_tag_number() != tag_number {
            return Err(DecodeError::TagNumberMismatch {
                expected: tag_number,
                found: header.actual_tag_number(),
            });
        }
        if header.class() != TagClass::Context {
            return Err(DecodeError::TagClassMismatch {
                expected: TagClass::Context,
                found: header.class(),
            });
        }
        if header.is_boundary() {
            return Err(DecodeError::UnexpectedBoundary { tag_number });
        }
        let value = P::decode_payload(r, &header)?;
        Ok(Self { header, value })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.header.encode(w)?;
        self.value.encode_payload(w, &self.header)
    }

    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + P::wire_len(&self.header)
    }
}

impl<P> Tagged<P> {
    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    pub fn value(&self) -> &P {
        &self.value
    }

    pub fn into_value(self) -> P {
        self.value
    }

    pub fn tag_number(&self) -> u8 {
        self.header.actual_tag_number()
    }
}

#[cfg(test)]
mod tests {
    use super::Tagged;
    use crate::encoding::reader::Reader;
    use crate::encoding::tag::TagClass;
    use crate::encoding::writer::Writer;
    use crate::tags::payload::{Null, OctetString};
    use crate::types::{CharacterString, ObjectId, ObjectType};
    use crate::DecodeError;
    use alloc::vec;
    use proptest::prelude::*;

    fn reencode<P: super::TagPayload>(t: &Tagged<P>) -> alloc::vec::Vec<u8> {
        let mut buf = vec![0u8; t.encoded_len()];
        let mut w = Writer::new(&mut buf);
        t.encode(&mut w).unwrap();
        assert_eq!(w.position(), buf.len());
        buf
    }

    #[test]
    fn application_real() {
        let bytes = [0x44, 0x42, 0x28, 0x00, 0x00];
        let t = Tagged::<f32>::decode_application(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(*t.value(), 42.0);
        assert_eq!(reencode(&t), bytes);
        assert_eq!(Tagged::application(42.0f32), t);
    }

    #[test]
    fn wrong_class_is_a_validation_failure() {
        // Context [2] where an application unsigned is expected.
        let err = Tagged::<u64>::decode_application(&mut Reader::new(&[0x29, 0x05])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TagClassMismatch {
                expected: TagClass::Application,
                found: TagClass::Context
            }
        );
        assert!(!err.is_absence());
    }

    #[test]
    fn wrong_number_is_an_assertion_failure() {
        let err = Tagged::<u64>::decode_context(&mut Reader::new(&[0x19, 0x05]), 2).unwrap_err();
        assert!(err.is_absence());
        let err = Tagged::<u64>::decode_application(&mut Reader::new(&[0x91, 0x05])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TagNumberMismatch {
                expected: 2,
                found: 9
            }
        );
    }

    #[test]
    fn boundary_where_primitive_expected() {
        let err = Tagged::<Null>::decode_context(&mut Reader::new(&[0x0E]), 0).unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedBoundary { tag_number: 0 });
        assert!(err.is_absence());
    }

    #[test]
    fn context_object_id() {
        let id = ObjectId::new(ObjectType::Device, 1234);
        let t = Tagged::context(0, id);
        let bytes = reencode(&t);
        assert_eq!(bytes[0], 0x0C);
        let back = Tagged::<ObjectId>::decode_context(&mut Reader::new(&bytes), 0).unwrap();
        assert_eq!(*back.value(), id);
        assert_eq!(back.tag_number(), 0);
    }

    #[test]
    fn padded_unsigned_roundtrips() {
        let bytes = [0x23, 0x00, 0x00, 0x2A];
        let t = Tagged::<u64>::decode_application(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(*t.value(), 42);
        assert_eq!(reencode(&t), bytes);
    }

    #[test]
    fn long_octet_string_uses_extended_length() {
        let t = Tagged::application(OctetString(vec![0xAB; 300]));
        let bytes = reencode(&t);
        assert_eq!(&bytes[..4], &[0x65, 254, 0x01, 0x2C]);
        assert_eq!(bytes.len(), 304);
    }

    proptest! {
        #[test]
        fn application_strings_roundtrip(s in "\\PC{0,40}") {
            let t = Tagged::application(CharacterString::utf8(s));
            let bytes = reencode(&t);
            let back =
                Tagged::<CharacterString>::decode_application(&mut Reader::new(&bytes)).unwrap();
            prop_assert_eq!(back, t);
        }

        #[test]
        fn signed_values_roundtrip(v in any::<i64>(), tag in 0u8..=254) {
            let t = Tagged::context(tag, v);
            let bytes = reencode(&t);
            let back = Tagged::<i64>::decode_context(&mut Reader::new(&bytes), tag).unwrap();
            prop_assert_eq!(back, t);
        }
    }
}
