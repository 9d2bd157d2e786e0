//! Constructed data: a property value between an opening and a closing
//! context tag.
//!
//! [`ConstructedData::decode`] reads the opening tag, peeks the next header,
//! and looks the (object type, property) pair up in
//! [`PROPERTY_CODECS`](codec::PROPERTY_CODECS). A known property is read with
//! its field shape; anything else becomes a list of
//! [`ConstructedElement`]s. Either way, encoding the result reproduces the
//! input bytes.

pub mod codec;
pub mod element;
pub mod records;
pub mod timer;
pub mod unspecified;

pub use codec::{FieldShape, PropertyCodec, PROPERTY_CODECS};
pub use element::{Element, ElementKind};
pub use records::{
    BdtEntry, DeviceObjectReference, EnclosedObjectPropertyReference, HostAddress, HostNPort,
    NetworkSecurityPolicy, ObjectPropertyReference, OptionalBinaryPv,
};
pub use timer::{
    DateTimeEnclosed, LightingCommand, LightingCommandEnclosed, TimerStateChangeValue,
    VENDOR_PROPRIETARY_VALUE,
};
pub use unspecified::ConstructedElement;

use alloc::vec;
use alloc::vec::Vec;

use crate::encoding::fields::{read_field, read_terminated, write_field, write_terminated};
use crate::encoding::reader::Reader;
use crate::encoding::tag::TagHeader;
use crate::encoding::writer::Writer;
use crate::error::{BuildError, BuildProblem};
use crate::tags::Tagged;
use crate::types::{ObjectType, PropertyId};
use crate::{DecodeError, EncodeError};

/// Arguments that select how a constructed value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyArgs {
    /// Number of the enclosing opening and closing tag.
    pub tag_number: u8,
    pub object_type: ObjectType,
    pub property_id: PropertyId,
    /// Array index of the request; `Some(0)` asks for the element count.
    pub array_index: Option<u64>,
}

impl PropertyArgs {
    /// Property value tag `[3]`, as used by ReadProperty and WriteProperty.
    pub const DEFAULT_TAG_NUMBER: u8 = 3;

    pub const fn new(object_type: ObjectType, property_id: PropertyId) -> Self {
        Self {
            tag_number: Self::DEFAULT_TAG_NUMBER,
            object_type,
            property_id,
            array_index: None,
        }
    }

    pub const fn with_tag_number(mut self, tag_number: u8) -> Self {
        self.tag_number = tag_number;
        self
    }

    pub const fn with_array_index(mut self, array_index: Option<u64>) -> Self {
        self.array_index = array_index;
        self
    }
}

/// The property field, in the shape its codec declares.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Scalar(Element),
    Optional(Option<Element>),
    List(Vec<Element>),
    Array {
        number_of_data_elements: Option<Tagged<u64>>,
        elements: Vec<Element>,
    },
    /// Property without a codec.
    Unspecified(Vec<ConstructedElement>),
}

impl PropertyValue {
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Scalar(e) => e.encoded_len(),
            Self::Optional(e) => e.as_ref().map_or(0, Element::encoded_len),
            Self::List(elements) => elements.iter().map(Element::encoded_len).sum(),
            Self::Array {
                number_of_data_elements,
                elements,
            } => {
                number_of_data_elements.as_ref().map_or(0, Tagged::encoded_len)
                    + elements.iter().map(Element::encoded_len).sum::<usize>()
            }
            Self::Unspecified(elements) => {
                elements.iter().map(ConstructedElement::encoded_len).sum()
            }
        }
    }

    /// Header of the first item on the wire, if the value writes anything.
    pub fn leading_header(&self) -> Option<TagHeader> {
        match self {
            Self::Scalar(e) => Some(e.leading_header()),
            Self::Optional(e) => e.as_ref().map(Element::leading_header),
            Self::List(elements) => elements.first().map(Element::leading_header),
            Self::Array {
                number_of_data_elements: Some(count),
                ..
            } => Some(*count.header()),
            Self::Array { elements, .. } => elements.first().map(Element::leading_header),
            Self::Unspecified(elements) => {
                elements.first().map(ConstructedElement::leading_header)
            }
        }
    }
}

/// A decoded property value with its framing tags.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructedData {
    opening_tag: TagHeader,
    peeked_tag_header: TagHeader,
    value: PropertyValue,
    closing_tag: TagHeader,
    args: PropertyArgs,
}

impl ConstructedData {
    const CONTEXT: &'static str = "BACnetConstructedData";

    pub fn decode(r: &mut Reader<'_>, args: PropertyArgs) -> Result<Self, DecodeError> {
        if args.property_id == PropertyId::All {
            return Err(DecodeError::Message(
                "property 'all' never occurs in constructed data",
            ));
        }
        r.pull_context(Self::CONTEXT)?;
        let opening_tag = read_field(r, "openingTag", |r| {
            TagHeader::decode_opening(r, args.tag_number)
        })?;
        let peeked_tag_header = read_field(r, "peekedTagHeader", |r| TagHeader::peek(r))?;
        r.read_virtual("peekedTagNumber", &peeked_tag_header.actual_tag_number());

        let value = match PropertyCodec::lookup(args.object_type, args.property_id) {
            Some(codec) => {
                r.pull_context(codec.type_name)?;
                let value = codec
                    .decode(r, &args)
                    .map_err(|e| e.in_field(codec.type_name))?;
                r.close_context(codec.type_name)?;
                value
            }
            None => {
                log::debug!(
                    "no codec for {:?}/{:?}, reading unspecified data",
                    args.object_type,
                    args.property_id
                );
                PropertyValue::Unspecified(read_terminated(r, "data", args.tag_number, |r| {
                    ConstructedElement::decode(r, &args)
                })?)
            }
        };

        let closing_tag = read_field(r, "closingTag", |r| {
            TagHeader::decode_closing(r, args.tag_number)
        })?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            opening_tag,
            peeked_tag_header,
            value,
            closing_tag,
            args,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_field(w, "openingTag", |w| self.opening_tag.encode(w))?;
        w.write_virtual("peekedTagNumber", &self.peeked_tag_number());
        match (&self.value, self.codec()) {
            (PropertyValue::Unspecified(elements), _) => {
                write_terminated(w, "data", elements, |w, e| e.encode(w))?;
            }
            (value, Some(codec)) => {
                w.push_context(codec.type_name)?;
                codec
                    .encode(w, value)
                    .map_err(|e| e.in_field(codec.type_name))?;
                w.pop_context(codec.type_name)?;
            }
            (_, None) => {
                return Err(EncodeError::Message(
                    "no codec for this property; only unspecified data can be written",
                ))
            }
        }
        write_field(w, "closingTag", |w| self.closing_tag.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.opening_tag.encoded_len() + self.value.encoded_len() + self.closing_tag.encoded_len()
    }

    /// Encodes into a freshly allocated buffer of exactly the encoded length.
    pub fn to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = vec![0u8; self.encoded_len()];
        let mut w = Writer::new(&mut buf);
        self.encode(&mut w)?;
        let written = w.position();
        buf.truncate(written);
        Ok(buf)
    }

    /// Builds a value from parts, checking it against the property table.
    ///
    /// Framing tags get their minimal encoding and the peeked header is taken
    /// from the first item of `value`. Every problem found is reported.
    pub fn build(args: PropertyArgs, value: PropertyValue) -> Result<Self, BuildError> {
        let problems = if args.property_id == PropertyId::All {
            vec![BuildProblem::AllProperty]
        } else {
            match PropertyCodec::lookup(args.object_type, args.property_id) {
                Some(codec) => codec.validate(&args, &value),
                None if matches!(value, PropertyValue::Unspecified(_)) => Vec::new(),
                None => vec![BuildProblem::UnspecifiedOnly],
            }
        };
        if !problems.is_empty() {
            return Err(BuildError { problems });
        }

        let opening_tag = TagHeader::opening(args.tag_number);
        let closing_tag = TagHeader::closing(args.tag_number);
        let peeked_tag_header = value.leading_header().unwrap_or(closing_tag);
        Ok(Self {
            opening_tag,
            peeked_tag_header,
            value,
            closing_tag,
            args,
        })
    }

    pub fn codec(&self) -> Option<&'static PropertyCodec> {
        PropertyCodec::lookup(self.args.object_type, self.args.property_id)
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn into_value(self) -> PropertyValue {
        self.value
    }

    pub fn args(&self) -> &PropertyArgs {
        &self.args
    }

    pub fn opening_tag(&self) -> &TagHeader {
        &self.opening_tag
    }

    pub fn closing_tag(&self) -> &TagHeader {
        &self.closing_tag
    }

    pub fn peeked_tag_header(&self) -> &TagHeader {
        &self.peeked_tag_header
    }

    pub fn peeked_tag_number(&self) -> u8 {
        self.peeked_tag_header.actual_tag_number()
    }

    /// The stored element of a scalar or optional property.
    pub fn actual_value(&self) -> Option<&Element> {
        match &self.value {
            PropertyValue::Scalar(e) => Some(e),
            PropertyValue::Optional(e) => e.as_ref(),
            _ => None,
        }
    }

    /// Always 0 for array properties; `None` for other shapes.
    pub fn zero(&self) -> Option<u64> {
        match self.value {
            PropertyValue::Array { .. } => Some(0),
            _ => None,
        }
    }
}
