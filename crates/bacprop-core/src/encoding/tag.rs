use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    UnsignedInt = 2,
    SignedInt = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectId = 12,
}

impl AppTag {
    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Null),
            1 => Ok(Self::Boolean),
            2 => Ok(Self::UnsignedInt),
            3 => Ok(Self::SignedInt),
            4 => Ok(Self::Real),
            5 => Ok(Self::Double),
            6 => Ok(Self::OctetString),
            7 => Ok(Self::CharacterString),
            8 => Ok(Self::BitString),
            9 => Ok(Self::Enumerated),
            10 => Ok(Self::Date),
            11 => Ok(Self::Time),
            12 => Ok(Self::ObjectId),
            _ => Err(DecodeError::InvalidTag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagClass {
    Application,
    Context,
}

const LVT_EXTENDED: u8 = 5;
const LVT_OPENING: u8 = 6;
const LVT_CLOSING: u8 = 7;

/// A tag header exactly as it appeared on the wire.
///
/// Besides the tag number and length, the header keeps which encoding was
/// used for each: a tag number below 15 may still be written in the extended
/// form, and a short length may still use the one, two or four byte
/// extended length. Re-encoding reproduces the original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagHeader {
    tag_number: u8,
    class: TagClass,
    length_value_type: u8,
    ext_tag_number: Option<u8>,
    ext_length: Option<u8>,
    ext_ext_length: Option<u16>,
    ext_ext_ext_length: Option<u32>,
}

impl TagHeader {
    /// The minimal header for `number` and `length`.
    pub const fn balanced(class: TagClass, number: u8, length: u32) -> Self {
        let (tag_number, ext_tag_number) = if number <= 14 {
            (number, None)
        } else {
            (0x0F, Some(number))
        };
        let mut header = Self {
            tag_number,
            class,
            length_value_type: 0,
            ext_tag_number,
            ext_length: None,
            ext_ext_length: None,
            ext_ext_ext_length: None,
        };
        if length <= 4 {
            header.length_value_type = length as u8;
        } else {
            header.length_value_type = LVT_EXTENDED;
            if length <= 253 {
                header.ext_length = Some(length as u8);
            } else if length <= 65535 {
                header.ext_length = Some(254);
                header.ext_ext_length = Some(length as u16);
            } else {
                header.ext_length = Some(255);
                header.ext_ext_ext_length = Some(length);
            }
        }
        header
    }

    pub const fn opening(number: u8) -> Self {
        let mut header = Self::balanced(TagClass::Context, number, 0);
        header.length_value_type = LVT_OPENING;
        header
    }

    pub const fn closing(number: u8) -> Self {
        let mut header = Self::balanced(TagClass::Context, number, 0);
        header.length_value_type = LVT_CLOSING;
        header
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let tag_number = (first >> 4) & 0x0F;
        let class = if first & 0b0000_1000 != 0 {
            TagClass::Context
        } else {
            TagClass::Application
        };
        let length_value_type = first & 0x07;

        let ext_tag_number = if tag_number == 0x0F {
            Some(r.read_u8()?)
        } else {
            None
        };

        if class == TagClass::Application && length_value_type > LVT_EXTENDED {
            return Err(DecodeError::InvalidLength);
        }

        let mut header = Self {
            tag_number,
            class,
            length_value_type,
            ext_tag_number,
            ext_length: None,
            ext_ext_length: None,
            ext_ext_ext_length: None,
        };
        if length_value_type == LVT_EXTENDED {
            let ext = r.read_u8()?;
            header.ext_length = Some(ext);
            match ext {
                254 => header.ext_ext_length = Some(r.read_be_u16()?),
                255 => header.ext_ext_ext_length = Some(r.read_be_u32()?),
                _ => {}
            }
        }
        Ok(header)
    }

    /// Decodes the next header without advancing `r`.
    pub fn peek(r: &Reader<'_>) -> Result<Self, DecodeError> {
        let mut lookahead = *r;
        Self::decode(&mut lookahead)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if self.tag_number > 0x0F || self.length_value_type > LVT_CLOSING {
            return Err(EncodeError::ValueOutOfRange);
        }
        let class_bit = match self.class {
            TagClass::Application => 0,
            TagClass::Context => 0b0000_1000,
        };
        w.write_u8((self.tag_number << 4) | class_bit | self.length_value_type)?;
        if let Some(ext) = self.ext_tag_number {
            w.write_u8(ext)?;
        }
        if let Some(ext) = self.ext_length {
            w.write_u8(ext)?;
        }
        if let Some(len) = self.ext_ext_length {
            w.write_be_u16(len)?;
        }
        if let Some(len) = self.ext_ext_ext_length {
            w.write_be_u32(len)?;
        }
        Ok(())
    }

    pub fn encoded_len(&self) -> usize {
        1 + usize::from(self.ext_tag_number.is_some())
            + usize::from(self.ext_length.is_some())
            + self.ext_ext_length.map_or(0, |_| 2)
            + self.ext_ext_ext_length.map_or(0, |_| 4)
    }

    /// The four-bit tag number field; `0x0F` means "see the extension byte".
    pub const fn tag_number(&self) -> u8 {
        self.tag_number
    }

    pub const fn class(&self) -> TagClass {
        self.class
    }

    pub const fn length_value_type(&self) -> u8 {
        self.length_value_type
    }

    pub const fn actual_tag_number(&self) -> u8 {
        match self.ext_tag_number {
            Some(n) => n,
            None => self.tag_number,
        }
    }

    /// Payload length in bytes. Opening and closing tags have none.
    pub const fn actual_length(&self) -> u32 {
        match self.length_value_type {
            LVT_EXTENDED => match (self.ext_ext_ext_length, self.ext_ext_length, self.ext_length) {
                (Some(len), _, _) => len,
                (None, Some(len), _) => len as u32,
                (None, None, Some(len)) => len as u32,
                (None, None, None) => 0,
            },
            LVT_OPENING | LVT_CLOSING => 0,
            lvt => lvt as u32,
        }
    }

    pub const fn is_opening(&self) -> bool {
        matches!(self.class, TagClass::Context) && self.length_value_type == LVT_OPENING
    }

    pub const fn is_closing(&self) -> bool {
        matches!(self.class, TagClass::Context) && self.length_value_type == LVT_CLOSING
    }

    pub const fn is_boundary(&self) -> bool {
        self.is_opening() || self.is_closing()
    }

    /// Whether this is the closing tag `[number]`.
    pub const fn closes(&self, number: u8) -> bool {
        self.is_closing() && self.actual_tag_number() == number
    }

    /// Classifies the header. Application tags above 12 are reserved.
    pub fn tag(&self) -> Result<Tag, DecodeError> {
        let tag_num = self.actual_tag_number();
        let len = self.actual_length();
        Ok(match self.class {
            TagClass::Context if self.is_opening() => Tag::Opening { tag_num },
            TagClass::Context if self.is_closing() => Tag::Closing { tag_num },
            TagClass::Context => Tag::Context { tag_num, len },
            TagClass::Application => Tag::Application {
                tag: AppTag::from_u8(tag_num)?,
                len,
            },
        })
    }

    /// Reads the opening tag `[expected]`.
    pub fn decode_opening(r: &mut Reader<'_>, expected: u8) -> Result<Self, DecodeError> {
        Self::decode_boundary(r, expected, LVT_OPENING)
    }

    /// Reads the closing tag `[expected]`.
    pub fn decode_closing(r: &mut Reader<'_>, expected: u8) -> Result<Self, DecodeError> {
        Self::decode_boundary(r, expected, LVT_CLOSING)
    }

    fn decode_boundary(r: &mut Reader<'_>, expected: u8, lvt: u8) -> Result<Self, DecodeError> {
        let header = Self::decode(r)?;
        if header.class != TagClass::Context {
            return Err(DecodeError::TagClassMismatch {
                expected: TagClass::Context,
                found: header.class,
            });
        }
        if header.actual_tag_number() != expected {
            return Err(DecodeError::TagNumberMismatch {
                expected,
                found: header.actual_tag_number(),
            });
        }
        if header.length_value_type != lvt {
            return Err(DecodeError::InvalidTag);
        }
        Ok(header)
    }
}

/// Header classification without the encoding details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: AppTag, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        TagHeader::from(self).encode(w)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        TagHeader::decode(r)?.tag()
    }
}

impl From<Tag> for TagHeader {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Application { tag, len } => {
                TagHeader::balanced(TagClass::Application, tag as u8, len)
            }
            Tag::Context { tag_num, len } => TagHeader::balanced(TagClass::Context, tag_num, len),
            Tag::Opening { tag_num } => TagHeader::opening(tag_num),
            Tag::Closing { tag_num } => TagHeader::closing(tag_num),
        }
    }
}
