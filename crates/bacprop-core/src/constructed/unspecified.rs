use alloc::boxed::Box;

use crate::constructed::{ConstructedData, PropertyArgs};
use crate::encoding::reader::Reader;
use crate::encoding::tag::{TagClass, TagHeader};
use crate::encoding::writer::Writer;
use crate::tags::{ApplicationTag, Tagged, Unknown};
use crate::{DecodeError, EncodeError};

/// One item of a property value whose layout is not in the codec table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructedElement {
    Application(ApplicationTag),
    Context(Tagged<Unknown>),
    /// Nested value opened by `[n]`, decoded with the same object type and
    /// property.
    Constructed(Box<ConstructedData>),
}

impl ConstructedElement {
    const CONTEXT: &'static str = "BACnetConstructedDataElement";

    pub fn decode(r: &mut Reader<'_>, args: &PropertyArgs) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let peeked = TagHeader::peek(r)?;
        let tag_number = peeked.actual_tag_number();
        r.read_virtual("peekedTagNumber", &tag_number);
        let element = match peeked.class() {
            TagClass::Application => Self::Application(ApplicationTag::decode(r)?),
            TagClass::Context if peeked.is_opening() => {
                let nested = PropertyArgs {
                    tag_number,
                    ..*args
                };
                Self::Constructed(Box::new(ConstructedData::decode(r, nested)?))
            }
            TagClass::Context if peeked.is_closing() => {
                return Err(DecodeError::UnexpectedBoundary { tag_number })
            }
            TagClass::Context => Self::Context(Tagged::decode_context(r, tag_number)?),
        };
        r.close_context(Self::CONTEXT)?;
        Ok(element)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        match self {
            Self::Application(t) => t.encode(w)?,
            Self::Context(t) => t.encode(w)?,
            Self::Constructed(data) => data.encode(w)?,
        }
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Application(t) => t.encoded_len(),
            Self::Context(t) => t.encoded_len(),
            Self::Constructed(data) => data.encoded_len(),
        }
    }

    pub fn leading_header(&self) -> TagHeader {
        match self {
            Self::Application(t) => *t.header(),
            Self::Context(t) => *t.header(),
            Self::Constructed(data) => *data.opening_tag(),
        }
    }
}
