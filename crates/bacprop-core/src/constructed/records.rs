//! Composite values that appear as property elements.

use crate::encoding::fields::{read_field, read_optional, write_field, write_optional};
use crate::encoding::reader::Reader;
use crate::encoding::tag::TagHeader;
use crate::encoding::writer::Writer;
use crate::tags::{Null, OctetString, Tagged};
use crate::types::{BinaryPv, CharacterString, ObjectId, PropertyId, SecurityLevel};
use crate::{DecodeError, EncodeError};

/// Reads `[n]`, the inner value, and the matching closing tag.
pub(crate) fn read_enclosed<'a, T>(
    r: &mut Reader<'a>,
    tag_number: u8,
    f: impl FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
) -> Result<(TagHeader, T, TagHeader), DecodeError> {
    let opening = read_field(r, "openingTag", |r| TagHeader::decode_opening(r, tag_number))?;
    let value = f(r)?;
    let closing = read_field(r, "closingTag", |r| TagHeader::decode_closing(r, tag_number))?;
    Ok((opening, value, closing))
}

pub(crate) fn write_enclosed<'b>(
    w: &mut Writer<'b>,
    opening: &TagHeader,
    closing: &TagHeader,
    f: impl FnOnce(&mut Writer<'b>) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    write_field(w, "openingTag", |w| opening.encode(w))?;
    f(w)?;
    write_field(w, "closingTag", |w| closing.encode(w))
}

/// Object, property and optional array index, as context tags `[0]`..`[2]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectPropertyReference {
    object_identifier: Tagged<ObjectId>,
    property_identifier: Tagged<PropertyId>,
    array_index: Option<Tagged<u64>>,
}

impl ObjectPropertyReference {
    const CONTEXT: &'static str = "BACnetObjectPropertyReference";

    pub fn new(object: ObjectId, property: PropertyId, array_index: Option<u64>) -> Self {
        Self {
            object_identifier: Tagged::context(0, object),
            property_identifier: Tagged::context(1, property),
            array_index: array_index.map(|i| Tagged::context(2, i)),
        }
    }

    pub fn object_identifier(&self) -> ObjectId {
        *self.object_identifier.value()
    }

    pub fn property_identifier(&self) -> PropertyId {
        *self.property_identifier.value()
    }

    pub fn array_index(&self) -> Option<u64> {
        self.array_index.as_ref().map(|t| *t.value())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let object_identifier =
            read_field(r, "objectIdentifier", |r| Tagged::decode_context(r, 0))?;
        let property_identifier =
            read_field(r, "propertyIdentifier", |r| Tagged::decode_context(r, 1))?;
        let array_index = read_optional(r, "arrayIndex", |r| Tagged::decode_context(r, 2))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            object_identifier,
            property_identifier,
            array_index,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_field(w, "objectIdentifier", |w| self.object_identifier.encode(w))?;
        write_field(w, "propertyIdentifier", |w| {
            self.property_identifier.encode(w)
        })?;
        write_optional(w, "arrayIndex", self.array_index.as_ref(), |w, t| t.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.object_identifier.encoded_len()
            + self.property_identifier.encoded_len()
            + self.array_index.as_ref().map_or(0, Tagged::encoded_len)
    }

    pub fn leading_header(&self) -> TagHeader {
        *self.object_identifier.header()
    }
}

/// An [`ObjectPropertyReference`] between opening and closing tag `[n]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnclosedObjectPropertyReference {
    opening: TagHeader,
    reference: ObjectPropertyReference,
    closing: TagHeader,
}

impl EnclosedObjectPropertyReference {
    const CONTEXT: &'static str = "BACnetObjectPropertyReferenceEnclosed";

    pub fn new(tag_number: u8, reference: ObjectPropertyReference) -> Self {
        Self {
            opening: TagHeader::opening(tag_number),
            reference,
            closing: TagHeader::closing(tag_number),
        }
    }

    pub fn tag_number(&self) -> u8 {
        self.opening.actual_tag_number()
    }

    pub fn reference(&self) -> &ObjectPropertyReference {
        &self.reference
    }

    pub fn decode(r: &mut Reader<'_>, tag_number: u8) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let (opening, reference, closing) = read_enclosed(r, tag_number, |r| {
            read_field(r, "objectPropertyReference", ObjectPropertyReference::decode)
        })?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            opening,
            reference,
            closing,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_enclosed(w, &self.opening, &self.closing, |w| {
            write_field(w, "objectPropertyReference", |w| self.reference.encode(w))
        })?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.opening.encoded_len() + self.reference.encoded_len() + self.closing.encoded_len()
    }

    pub fn leading_header(&self) -> TagHeader {
        self.opening
    }
}

/// Optional device `[0]` and object `[1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceObjectReference {
    device_identifier: Option<Tagged<ObjectId>>,
    object_identifier: Tagged<ObjectId>,
}

impl DeviceObjectReference {
    const CONTEXT: &'static str = "BACnetDeviceObjectReference";

    pub fn new(device: Option<ObjectId>, object: ObjectId) -> Self {
        Self {
            device_identifier: device.map(|d| Tagged::context(0, d)),
            object_identifier: Tagged::context(1, object),
        }
    }

    pub fn device_identifier(&self) -> Option<ObjectId> {
        self.device_identifier.as_ref().map(|t| *t.value())
    }

    pub fn object_identifier(&self) -> ObjectId {
        *self.object_identifier.value()
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let device_identifier =
            read_optional(r, "deviceIdentifier", |r| Tagged::decode_context(r, 0))?;
        let object_identifier =
            read_field(r, "objectIdentifier", |r| Tagged::decode_context(r, 1))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            device_identifier,
            object_identifier,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_optional(
            w,
            "deviceIdentifier",
            self.device_identifier.as_ref(),
            |w, t| t.encode(w),
        )?;
        write_field(w, "objectIdentifier", |w| self.object_identifier.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.device_identifier
            .as_ref()
            .map_or(0, Tagged::encoded_len)
            + self.object_identifier.encoded_len()
    }

    pub fn leading_header(&self) -> TagHeader {
        match &self.device_identifier {
            Some(device) => *device.header(),
            None => *self.object_identifier.header(),
        }
    }
}

/// Port `[0]` and security level `[1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSecurityPolicy {
    port_id: Tagged<u64>,
    security_level: Tagged<SecurityLevel>,
}

impl NetworkSecurityPolicy {
    const CONTEXT: &'static str = "BACnetNetworkSecurityPolicy";

    pub fn new(port_id: u8, security_level: SecurityLevel) -> Self {
        Self {
            port_id: Tagged::context(0, u64::from(port_id)),
            security_level: Tagged::context(1, security_level),
        }
    }

    pub fn port_id(&self) -> u64 {
        *self.port_id.value()
    }

    pub fn security_level(&self) -> SecurityLevel {
        *self.security_level.value()
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let port_id = read_field(r, "portId", |r| Tagged::decode_context(r, 0))?;
        let security_level = read_field(r, "securityLevel", |r| Tagged::decode_context(r, 1))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            port_id,
            security_level,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_field(w, "portId", |w| self.port_id.encode(w))?;
        write_field(w, "securityLevel", |w| self.security_level.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.port_id.encoded_len() + self.security_level.encoded_len()
    }

    pub fn leading_header(&self) -> TagHeader {
        *self.port_id.header()
    }
}

/// Host part of a host-and-port, chosen by the peeked context tag number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostAddress {
    None(Tagged<Null>),
    IpAddress(Tagged<OctetString>),
    Name(Tagged<CharacterString>),
}

impl HostAddress {
    const CONTEXT: &'static str = "BACnetHostAddress";

    pub fn none() -> Self {
        Self::None(Tagged::context(0, Null))
    }

    pub fn ip(octets: [u8; 4]) -> Self {
        Self::IpAddress(Tagged::context(1, OctetString(octets.to_vec())))
    }

    pub fn name(name: CharacterString) -> Self {
        Self::Name(Tagged::context(2, name))
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let peeked = TagHeader::peek(r)?;
        let tag_number = peeked.actual_tag_number();
        r.read_virtual("peekedTagNumber", &tag_number);
        let host = match tag_number {
            0 => Self::None(read_field(r, "none", |r| Tagged::decode_context(r, 0))?),
            1 => Self::IpAddress(read_field(r, "ipAddress", |r| Tagged::decode_context(r, 1))?),
            2 => Self::Name(read_field(r, "name", |r| Tagged::decode_context(r, 2))?),
            _ => {
                return Err(DecodeError::UnknownChoice {
                    choice: Self::CONTEXT,
                    tag_number,
                })
            }
        };
        r.close_context(Self::CONTEXT)?;
        Ok(host)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        match self {
            Self::None(t) => write_field(w, "none", |w| t.encode(w))?,
            Self::IpAddress(t) => write_field(w, "ipAddress", |w| t.encode(w))?,
            Self::Name(t) => write_field(w, "name", |w| t.encode(w))?,
        }
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::None(t) => t.encoded_len(),
            Self::IpAddress(t) => t.encoded_len(),
            Self::Name(t) => t.encoded_len(),
        }
    }
}

/// Host enclosed in `[0]`, then port `[1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostNPort {
    host_opening: TagHeader,
    host: HostAddress,
    host_closing: TagHeader,
    port: Tagged<u64>,
}

impl HostNPort {
    const CONTEXT: &'static str = "BACnetHostNPort";

    pub fn new(host: HostAddress, port: u16) -> Self {
        Self {
            host_opening: TagHeader::opening(0),
            host,
            host_closing: TagHeader::closing(0),
            port: Tagged::context(1, u64::from(port)),
        }
    }

    pub fn host(&self) -> &HostAddress {
        &self.host
    }

    pub fn port(&self) -> u64 {
        *self.port.value()
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let (host_opening, host, host_closing) =
            read_enclosed(r, 0, |r| read_field(r, "host", HostAddress::decode))?;
        let port = read_field(r, "port", |r| Tagged::decode_context(r, 1))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            host_opening,
            host,
            host_closing,
            port,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_enclosed(w, &self.host_opening, &self.host_closing, |w| {
            write_field(w, "host", |w| self.host.encode(w))
        })?;
        write_field(w, "port", |w| self.port.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.host_opening.encoded_len()
            + self.host.encoded_len()
            + self.host_closing.encoded_len()
            + self.port.encoded_len()
    }
}

/// One row of a BBMD broadcast distribution table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BdtEntry {
    address_opening: TagHeader,
    address: HostNPort,
    address_closing: TagHeader,
    broadcast_mask: Option<Tagged<OctetString>>,
}

impl BdtEntry {
    const CONTEXT: &'static str = "BACnetBDTEntry";

    pub fn new(address: HostNPort, broadcast_mask: Option<[u8; 4]>) -> Self {
        Self {
            address_opening: TagHeader::opening(0),
            address,
            address_closing: TagHeader::closing(0),
            broadcast_mask: broadcast_mask.map(|m| Tagged::context(1, OctetString(m.to_vec()))),
        }
    }

    pub fn address(&self) -> &HostNPort {
        &self.address
    }

    pub fn broadcast_mask(&self) -> Option<&[u8]> {
        self.broadcast_mask.as_ref().map(|t| t.value().0.as_slice())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let (address_opening, address, address_closing) =
            read_enclosed(r, 0, |r| read_field(r, "bbmdAddress", HostNPort::decode))?;
        let broadcast_mask =
            read_optional(r, "broadcastMask", |r| Tagged::decode_context(r, 1))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            address_opening,
            address,
            address_closing,
            broadcast_mask,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_enclosed(w, &self.address_opening, &self.address_closing, |w| {
            write_field(w, "bbmdAddress", |w| self.address.encode(w))
        })?;
        write_optional(w, "broadcastMask", self.broadcast_mask.as_ref(), |w, t| {
            t.encode(w)
        })?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.address_opening.encoded_len()
            + self.address.encoded_len()
            + self.address_closing.encoded_len()
            + self.broadcast_mask.as_ref().map_or(0, Tagged::encoded_len)
    }

    pub fn leading_header(&self) -> TagHeader {
        self.address_opening
    }
}

/// Application null (peeked tag number 0) or a binary present value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionalBinaryPv {
    Null(Tagged<Null>),
    Value(Tagged<BinaryPv>),
}

impl OptionalBinaryPv {
    const CONTEXT: &'static str = "BACnetOptionalBinaryPV";

    pub fn null() -> Self {
        Self::Null(Tagged::application(Null))
    }

    pub fn value(value: BinaryPv) -> Self {
        Self::Value(Tagged::application(value))
    }

    pub fn binary_pv(&self) -> Option<BinaryPv> {
        match self {
            Self::Null(_) => None,
            Self::Value(t) => Some(*t.value()),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let peeked = TagHeader::peek(r)?;
        r.read_virtual("peekedTagNumber", &peeked.actual_tag_number());
        let value = if peeked.actual_tag_number() == 0 {
            Self::Null(read_field(r, "nullValue", Tagged::decode_application)?)
        } else {
            Self::Value(read_field(r, "binaryPv", Tagged::decode_application)?)
        };
        r.close_context(Self::CONTEXT)?;
        Ok(value)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        match self {
            Self::Null(t) => write_field(w, "nullValue", |w| t.encode(w))?,
            Self::Value(t) => write_field(w, "binaryPv", |w| t.encode(w))?,
        }
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Null(t) => t.encoded_len(),
            Self::Value(t) => t.encoded_len(),
        }
    }

    pub fn leading_header(&self) -> TagHeader {
        match self {
            Self::Null(t) => *t.header(),
            Self::Value(t) => *t.header(),
        }
    }
}
