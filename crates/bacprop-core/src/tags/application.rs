use crate::encoding::reader::Reader;
use crate::encoding::tag::{AppTag, TagClass, TagHeader};
use crate::encoding::writer::Writer;
use crate::tags::payload::{Enumerated, Null, OctetString};
use crate::tags::tagged::Tagged;
use crate::types::{BitString, CharacterString, Date, ObjectId, Time};
use crate::{DecodeError, EncodeError};

/// Any application-tagged value, selected by the peeked tag number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplicationTag {
    Null(Tagged<Null>),
    Boolean(Tagged<bool>),
    Unsigned(Tagged<u64>),
    Signed(Tagged<i64>),
    Real(Tagged<f32>),
    Double(Tagged<f64>),
    OctetString(Tagged<OctetString>),
    CharacterString(Tagged<CharacterString>),
    BitString(Tagged<BitString>),
    Enumerated(Tagged<Enumerated>),
    Date(Tagged<Date>),
    Time(Tagged<Time>),
    ObjectId(Tagged<ObjectId>),
}

macro_rules! each {
    ($value:expr, $t:ident => $body:expr) => {
        match $value {
            ApplicationTag::Null($t) => $body,
            ApplicationTag::Boolean($t) => $body,
            ApplicationTag::Unsigned($t) => $body,
            ApplicationTag::Signed($t) => $body,
            ApplicationTag::Real($t) => $body,
            ApplicationTag::Double($t) => $body,
            ApplicationTag::OctetString($t) => $body,
            ApplicationTag::CharacterString($t) => $body,
            ApplicationTag::BitString($t) => $body,
            ApplicationTag::Enumerated($t) => $body,
            ApplicationTag::Date($t) => $body,
            ApplicationTag::Time($t) => $body,
            ApplicationTag::ObjectId($t) => $body,
        }
    };
}

impl ApplicationTag {
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let peeked = TagHeader::peek(r)?;
        if peeked.class() != TagClass::Application {
            return Err(DecodeError::TagClassMismatch {
                expected: TagClass::Application,
                found: peeked.class(),
            });
        }
        let data_type =
            AppTag::from_u8(peeked.actual_tag_number()).map_err(|_| DecodeError::UnknownChoice {
                choice: "BACnetApplicationTag",
                tag_number: peeked.actual_tag_number(),
            })?;
        Ok(match data_type {
            AppTag::Null => Self::Null(Tagged::decode_application(r)?),
            AppTag::Boolean => Self::Boolean(Tagged::decode_application(r)?),
            AppTag::UnsignedInt => Self::Unsigned(Tagged::decode_application(r)?),
            AppTag::SignedInt => Self::Signed(Tagged::decode_application(r)?),
            AppTag::Real => Self::Real(Tagged::decode_application(r)?),
            AppTag::Double => Self::Double(Tagged::decode_application(r)?),
            AppTag::OctetString => Self::OctetString(Tagged::decode_application(r)?),
            AppTag::CharacterString => Self::CharacterString(Tagged::decode_application(r)?),
            AppTag::BitString => Self::BitString(Tagged::decode_application(r)?),
            AppTag::Enumerated => Self::Enumerated(Tagged::decode_application(r)?),
            AppTag::Date => Self::Date(Tagged::decode_application(r)?),
            AppTag::Time => Self::Time(Tagged::decode_application(r)?),
            AppTag::ObjectId => Self::ObjectId(Tagged::decode_application(r)?),
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        each!(self, t => t.encode(w))
    }

    pub fn encoded_len(&self) -> usize {
        each!(self, t => t.encoded_len())
    }

    pub fn header(&self) -> &TagHeader {
        each!(self, t => t.header())
    }

    pub fn data_type(&self) -> AppTag {
        match self {
            Self::Null(_) => AppTag::Null,
            Self::Boolean(_) => AppTag::Boolean,
            Self::Unsigned(_) => AppTag::UnsignedInt,
            Self::Signed(_) => AppTag::SignedInt,
            Self::Real(_) => AppTag::Real,
            Self::Double(_) => AppTag::Double,
            Self::OctetString(_) => AppTag::OctetString,
            Self::CharacterString(_) => AppTag::CharacterString,
            Self::BitString(_) => AppTag::BitString,
            Self::Enumerated(_) => AppTag::Enumerated,
            Self::Date(_) => AppTag::Date,
            Self::Time(_) => AppTag::Time,
            Self::ObjectId(_) => AppTag::ObjectId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationTag;
    use crate::encoding::reader::Reader;
    use crate::encoding::tag::{AppTag, TagClass};
    use crate::encoding::writer::Writer;
    use crate::DecodeError;

    fn roundtrip(bytes: &[u8]) -> ApplicationTag {
        let mut r = Reader::new(bytes);
        let tag = ApplicationTag::decode(&mut r).unwrap();
        assert!(r.is_empty());
        let mut buf = [0u8; 64];
        let mut w = Writer::new(&mut buf);
        tag.encode(&mut w).unwrap();
        assert_eq!(w.as_written(), bytes);
        assert_eq!(tag.encoded_len(), bytes.len());
        tag
    }

    #[test]
    fn dispatches_on_tag_number() {
        assert_eq!(roundtrip(&[0x00]).data_type(), AppTag::Null);
        assert_eq!(roundtrip(&[0x11]).data_type(), AppTag::Boolean);
        assert_eq!(roundtrip(&[0x21, 0x07]).data_type(), AppTag::UnsignedInt);
        assert_eq!(roundtrip(&[0x31, 0xF9]).data_type(), AppTag::SignedInt);
        assert_eq!(
            roundtrip(&[0x55, 0x08, 0x40, 0x45, 0, 0, 0, 0, 0, 0]).data_type(),
            AppTag::Double
        );
        assert_eq!(
            roundtrip(&[0x75, 0x06, 0x00, b'h', b'e', b'l', b'l', b'o']).data_type(),
            AppTag::CharacterString
        );
        assert_eq!(roundtrip(&[0x91, 0x02]).data_type(), AppTag::Enumerated);
        assert_eq!(
            roundtrip(&[0xA4, 124, 3, 15, 0xFF]).data_type(),
            AppTag::Date
        );
        assert_eq!(roundtrip(&[0xB4, 12, 0, 0, 0]).data_type(), AppTag::Time);
        assert_eq!(
            roundtrip(&[0xC4, 0x02, 0x00, 0x00, 0x01]).data_type(),
            AppTag::ObjectId
        );
    }

    #[test]
    fn reserved_application_numbers_are_unknown() {
        let err = ApplicationTag::decode(&mut Reader::new(&[0xD0])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownChoice {
                choice: "BACnetApplicationTag",
                tag_number: 13
            }
        );
    }

    #[test]
    fn context_tags_are_rejected() {
        let err = ApplicationTag::decode(&mut Reader::new(&[0x09, 0x00])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TagClassMismatch {
                expected: TagClass::Application,
                found: TagClass::Context
            }
        );
    }
}
