use alloc::vec::Vec;

use crate::encoding::primitives::{
    decode_signed, decode_unsigned, encode_signed, encode_unsigned, signed_len, unsigned_len,
};
use crate::encoding::reader::Reader;
use crate::encoding::tag::{AppTag, TagClass, TagHeader};
use crate::encoding::writer::Writer;
use crate::types::{
    AccessCredentialDisable, BinaryPv, BitString, CharacterString, Date, DoorSecuredStatus,
    EngineeringUnits, EscalatorOperationDirection, LightingOperation, ObjectId, PropertyId,
    SecurityLevel, Time,
};
use crate::{DecodeError, EncodeError};

/// The value half of a tag-length-value item.
///
/// The header is decoded first and handed to the payload, so payloads never
/// read past the length the header announced.
pub trait TagPayload: Sized {
    /// Application tag number used when this payload is application tagged.
    const DATA_TYPE: AppTag;

    /// Length field a freshly built header needs for this value.
    fn header_len(&self, class: TagClass) -> u32;

    /// Payload bytes following `header`.
    fn wire_len(header: &TagHeader) -> usize {
        header.actual_length() as usize
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError>;

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Null;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OctetString(pub Vec<u8>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumerated(pub u32);

/// Raw payload of a context tag whose meaning is not known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unknown(pub Vec<u8>);

fn payload_len(header: &TagHeader) -> usize {
    header.actual_length() as usize
}

fn expect_len(header: &TagHeader, len: u32) -> Result<(), DecodeError> {
    if header.actual_length() == len {
        Ok(())
    } else {
        Err(DecodeError::InvalidLength)
    }
}

fn check_len(header: &TagHeader, len: usize) -> Result<(), EncodeError> {
    if payload_len(header) == len {
        Ok(())
    } else {
        Err(EncodeError::InvalidLength)
    }
}

fn decode_enumerated(r: &mut Reader<'_>, header: &TagHeader) -> Result<u32, DecodeError> {
    let len = payload_len(header);
    if len > 4 {
        return Err(DecodeError::InvalidLength);
    }
    // decode_unsigned rejects zero length.
    Ok(decode_unsigned(r, len)? as u32)
}

fn encode_enumerated(
    w: &mut Writer<'_>,
    value: u32,
    header: &TagHeader,
) -> Result<(), EncodeError> {
    let len = payload_len(header);
    if len > 4 {
        return Err(EncodeError::InvalidLength);
    }
    encode_unsigned(w, u64::from(value), len)
}

impl TagPayload for Null {
    const DATA_TYPE: AppTag = AppTag::Null;

    fn header_len(&self, _class: TagClass) -> u32 {
        0
    }

    fn decode_payload(_r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 0)?;
        Ok(Null)
    }

    fn encode_payload(&self, _w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 0)
    }
}

/// Application booleans carry the value in the length field and have no
/// payload; context booleans have a single payload octet.
impl TagPayload for bool {
    const DATA_TYPE: AppTag = AppTag::Boolean;

    fn header_len(&self, class: TagClass) -> u32 {
        match class {
            TagClass::Application => u32::from(*self),
            TagClass::Context => 1,
        }
    }

    fn wire_len(header: &TagHeader) -> usize {
        match header.class() {
            TagClass::Application => 0,
            TagClass::Context => payload_len(header),
        }
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        let raw = match header.class() {
            TagClass::Application => header.length_value_type(),
            TagClass::Context => {
                expect_len(header, 1)?;
                r.read_u8()?
            }
        };
        match raw {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidValue),
        }
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        match header.class() {
            TagClass::Application if header.length_value_type() == u8::from(*self) => Ok(()),
            TagClass::Application => Err(EncodeError::InvalidLength),
            TagClass::Context => {
                check_len(header, 1)?;
                w.write_u8(u8::from(*self))
            }
        }
    }
}

impl TagPayload for u64 {
    const DATA_TYPE: AppTag = AppTag::UnsignedInt;

    fn header_len(&self, _class: TagClass) -> u32 {
        unsigned_len(*self)
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        decode_unsigned(r, payload_len(header))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        encode_unsigned(w, *self, payload_len(header))
    }
}

impl TagPayload for i64 {
    const DATA_TYPE: AppTag = AppTag::SignedInt;

    fn header_len(&self, _class: TagClass) -> u32 {
        signed_len(*self)
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        decode_signed(r, payload_len(header))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        encode_signed(w, *self, payload_len(header))
    }
}

impl TagPayload for f32 {
    const DATA_TYPE: AppTag = AppTag::Real;

    fn header_len(&self, _class: TagClass) -> u32 {
        4
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 4)?;
        Ok(f32::from_bits(r.read_be_u32()?))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 4)?;
        w.write_be_u32(self.to_bits())
    }
}

impl TagPayload for f64 {
    const DATA_TYPE: AppTag = AppTag::Double;

    fn header_len(&self, _class: TagClass) -> u32 {
        8
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 8)?;
        let bytes = r.read_exact(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_be_bytes(raw))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 8)?;
        w.write_all(&self.to_be_bytes())
    }
}

impl TagPayload for OctetString {
    const DATA_TYPE: AppTag = AppTag::OctetString;

    fn header_len(&self, _class: TagClass) -> u32 {
        self.0.len() as u32
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        Ok(Self(r.read_exact(payload_len(header))?.to_vec()))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, self.0.len())?;
        w.write_all(&self.0)
    }
}

/// Application form is an octet string; context tags keep their bytes as-is.
impl TagPayload for Unknown {
    const DATA_TYPE: AppTag = AppTag::OctetString;

    fn header_len(&self, _class: TagClass) -> u32 {
        self.0.len() as u32
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        Ok(Self(r.read_exact(payload_len(header))?.to_vec()))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, self.0.len())?;
        w.write_all(&self.0)
    }
}

impl TagPayload for CharacterString {
    const DATA_TYPE: AppTag = AppTag::CharacterString;

    fn header_len(&self, _class: TagClass) -> u32 {
        self.payload_len() as u32
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        let raw = r.read_exact(payload_len(header))?;
        CharacterString::from_payload(raw)
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, self.payload_len())?;
        self.write_payload(w)
    }
}

impl TagPayload for BitString {
    const DATA_TYPE: AppTag = AppTag::BitString;

    fn header_len(&self, _class: TagClass) -> u32 {
        1 + self.data.len() as u32
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        let raw = r.read_exact(payload_len(header))?;
        let (&unused_bits, data) = raw.split_first().ok_or(DecodeError::InvalidLength)?;
        if unused_bits > 7 {
            return Err(DecodeError::InvalidValue);
        }
        Ok(BitString::new(unused_bits, data.to_vec()))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 1 + self.data.len())?;
        if self.unused_bits > 7 {
            return Err(EncodeError::ValueOutOfRange);
        }
        w.write_u8(self.unused_bits)?;
        w.write_all(&self.data)
    }
}

impl TagPayload for Enumerated {
    const DATA_TYPE: AppTag = AppTag::Enumerated;

    fn header_len(&self, _class: TagClass) -> u32 {
        unsigned_len(u64::from(self.0))
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        decode_enumerated(r, header).map(Self)
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        encode_enumerated(w, self.0, header)
    }
}

impl TagPayload for Date {
    const DATA_TYPE: AppTag = AppTag::Date;

    fn header_len(&self, _class: TagClass) -> u32 {
        4
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 4)?;
        Ok(Date::from_bytes(r.read_be_u32()?.to_be_bytes()))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 4)?;
        w.write_all(&self.to_bytes())
    }
}

impl TagPayload for Time {
    const DATA_TYPE: AppTag = AppTag::Time;

    fn header_len(&self, _class: TagClass) -> u32 {
        4
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 4)?;
        Ok(Time::from_bytes(r.read_be_u32()?.to_be_bytes()))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 4)?;
        w.write_all(&self.to_bytes())
    }
}

impl TagPayload for ObjectId {
    const DATA_TYPE: AppTag = AppTag::ObjectId;

    fn header_len(&self, _class: TagClass) -> u32 {
        4
    }

    fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
        expect_len(header, 4)?;
        Ok(ObjectId::from_raw(r.read_be_u32()?))
    }

    fn encode_payload(&self, w: &mut Writer<'_>, header: &TagHeader) -> Result<(), EncodeError> {
        check_len(header, 4)?;
        w.write_be_u32(self.raw())
    }
}

macro_rules! enumerated_payload {
    ($($ty:ty),+ $(,)?) => {$(
        impl TagPayload for $ty {
            const DATA_TYPE: AppTag = AppTag::Enumerated;

            fn header_len(&self, _class: TagClass) -> u32 {
                unsigned_len(u64::from(self.to_u32()))
            }

            fn decode_payload(r: &mut Reader<'_>, header: &TagHeader) -> Result<Self, DecodeError> {
                decode_enumerated(r, header).map(<$ty>::from_u32)
            }

            fn encode_payload(
                &self,
                w: &mut Writer<'_>,
                header: &TagHeader,
            ) -> Result<(), EncodeError> {
                encode_enumerated(w, self.to_u32(), header)
            }
        }
    )+};
}

enumerated_payload!(
    PropertyId,
    BinaryPv,
    EngineeringUnits,
    AccessCredentialDisable,
    DoorSecuredStatus,
    EscalatorOperationDirection,
    SecurityLevel,
    LightingOperation,
);
