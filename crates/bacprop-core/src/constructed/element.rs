use core::fmt;

use crate::constructed::records::{
    BdtEntry, DeviceObjectReference, EnclosedObjectPropertyReference, NetworkSecurityPolicy,
    ObjectPropertyReference, OptionalBinaryPv,
};
use crate::constructed::timer::TimerStateChangeValue;
use crate::constructed::PropertyArgs;
use crate::encoding::reader::Reader;
use crate::encoding::tag::TagHeader;
use crate::encoding::writer::Writer;
use crate::tags::Tagged;
use crate::types::{
    AccessCredentialDisable, BinaryPv, BitString, CharacterString, Date, DoorSecuredStatus,
    EngineeringUnits, EscalatorOperationDirection, ObjectId,
};
use crate::{DecodeError, EncodeError};

/// What a property value element is, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Boolean,
    Unsigned,
    Real,
    CharacterString,
    BitString,
    Date,
    ObjectIdentifier,
    BinaryPv,
    OptionalBinaryPv,
    EngineeringUnits,
    AccessCredentialDisable,
    DoorSecuredStatus,
    EscalatorOperationDirection,
    ObjectPropertyReference,
    /// Object property reference enclosed in the given context tag.
    EnclosedObjectPropertyReference(u8),
    DeviceObjectReference,
    BdtEntry,
    NetworkSecurityPolicy,
    TimerStateChangeValue,
}

impl ElementKind {
    /// Name of the wire type, as shown in trace output and listings.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "BACnetApplicationTagBoolean",
            Self::Unsigned => "BACnetApplicationTagUnsignedInteger",
            Self::Real => "BACnetApplicationTagReal",
            Self::CharacterString => "BACnetApplicationTagCharacterString",
            Self::BitString => "BACnetApplicationTagBitString",
            Self::Date => "BACnetApplicationTagDate",
            Self::ObjectIdentifier => "BACnetApplicationTagObjectIdentifier",
            Self::BinaryPv => "BACnetBinaryPVTagged",
            Self::OptionalBinaryPv => "BACnetOptionalBinaryPV",
            Self::EngineeringUnits => "BACnetEngineeringUnitsTagged",
            Self::AccessCredentialDisable => "BACnetAccessCredentialDisableTagged",
            Self::DoorSecuredStatus => "BACnetDoorSecuredStatusTagged",
            Self::EscalatorOperationDirection => "BACnetEscalatorOperationDirectionTagged",
            Self::ObjectPropertyReference => "BACnetObjectPropertyReference",
            Self::EnclosedObjectPropertyReference(_) => "BACnetObjectPropertyReferenceEnclosed",
            Self::DeviceObjectReference => "BACnetDeviceObjectReference",
            Self::BdtEntry => "BACnetBDTEntry",
            Self::NetworkSecurityPolicy => "BACnetNetworkSecurityPolicy",
            Self::TimerStateChangeValue => "BACnetTimerStateChangeValue",
        }
    }

    pub fn decode(self, r: &mut Reader<'_>, args: &PropertyArgs) -> Result<Element, DecodeError> {
        Ok(match self {
            Self::Boolean => Element::Boolean(Tagged::decode_application(r)?),
            Self::Unsigned => Element::Unsigned(Tagged::decode_application(r)?),
            Self::Real => Element::Real(Tagged::decode_application(r)?),
            Self::CharacterString => Element::CharacterString(Tagged::decode_application(r)?),
            Self::BitString => Element::BitString(Tagged::decode_application(r)?),
            Self::Date => Element::Date(Tagged::decode_application(r)?),
            Self::ObjectIdentifier => Element::ObjectIdentifier(Tagged::decode_application(r)?),
            Self::BinaryPv => Element::BinaryPv(Tagged::decode_application(r)?),
            Self::OptionalBinaryPv => Element::OptionalBinaryPv(OptionalBinaryPv::decode(r)?),
            Self::EngineeringUnits => Element::EngineeringUnits(Tagged::decode_application(r)?),
            Self::AccessCredentialDisable => {
                Element::AccessCredentialDisable(Tagged::decode_application(r)?)
            }
            Self::DoorSecuredStatus => Element::DoorSecuredStatus(Tagged::decode_application(r)?),
            Self::EscalatorOperationDirection => {
                Element::EscalatorOperationDirection(Tagged::decode_application(r)?)
            }
            Self::ObjectPropertyReference => {
                Element::ObjectPropertyReference(ObjectPropertyReference::decode(r)?)
            }
            Self::EnclosedObjectPropertyReference(tag_number) => {
                Element::EnclosedObjectPropertyReference(EnclosedObjectPropertyReference::decode(
                    r, tag_number,
                )?)
            }
            Self::DeviceObjectReference => {
                Element::DeviceObjectReference(DeviceObjectReference::decode(r)?)
            }
            Self::BdtEntry => Element::BdtEntry(BdtEntry::decode(r)?),
            Self::NetworkSecurityPolicy => {
                Element::NetworkSecurityPolicy(NetworkSecurityPolicy::decode(r)?)
            }
            Self::TimerStateChangeValue => {
                Element::TimerStateChangeValue(TimerStateChangeValue::decode(r, args)?)
            }
        })
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnclosedObjectPropertyReference(n) => write!(f, "{}[{n}]", self.type_name()),
            _ => f.write_str(self.type_name()),
        }
    }
}

/// A decoded property value element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Boolean(Tagged<bool>),
    Unsigned(Tagged<u64>),
    Real(Tagged<f32>),
    CharacterString(Tagged<CharacterString>),
    BitString(Tagged<BitString>),
    Date(Tagged<Date>),
    ObjectIdentifier(Tagged<ObjectId>),
    BinaryPv(Tagged<BinaryPv>),
    OptionalBinaryPv(OptionalBinaryPv),
    EngineeringUnits(Tagged<EngineeringUnits>),
    AccessCredentialDisable(Tagged<AccessCredentialDisable>),
    DoorSecuredStatus(Tagged<DoorSecuredStatus>),
    EscalatorOperationDirection(Tagged<EscalatorOperationDirection>),
    ObjectPropertyReference(ObjectPropertyReference),
    EnclosedObjectPropertyReference(EnclosedObjectPropertyReference),
    DeviceObjectReference(DeviceObjectReference),
    BdtEntry(BdtEntry),
    NetworkSecurityPolicy(NetworkSecurityPolicy),
    TimerStateChangeValue(TimerStateChangeValue),
}

macro_rules! each {
    ($value:expr, $e:ident => $body:expr) => {
        match $value {
            Element::Boolean($e) => $body,
            Element::Unsigned($e) => $body,
            Element::Real($e) => $body,
            Element::CharacterString($e) => $body,
            Element::BitString($e) => $body,
            Element::Date($e) => $body,
            Element::ObjectIdentifier($e) => $body,
            Element::BinaryPv($e) => $body,
            Element::OptionalBinaryPv($e) => $body,
            Element::EngineeringUnits($e) => $body,
            Element::AccessCredentialDisable($e) => $body,
            Element::DoorSecuredStatus($e) => $body,
            Element::EscalatorOperationDirection($e) => $body,
            Element::ObjectPropertyReference($e) => $body,
            Element::EnclosedObjectPropertyReference($e) => $body,
            Element::DeviceObjectReference($e) => $body,
            Element::BdtEntry($e) => $body,
            Element::NetworkSecurityPolicy($e) => $body,
            Element::TimerStateChangeValue($e) => $body,
        }
    };
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Boolean(_) => ElementKind::Boolean,
            Self::Unsigned(_) => ElementKind::Unsigned,
            Self::Real(_) => ElementKind::Real,
            Self::CharacterString(_) => ElementKind::CharacterString,
            Self::BitString(_) => ElementKind::BitString,
            Self::Date(_) => ElementKind::Date,
            Self::ObjectIdentifier(_) => ElementKind::ObjectIdentifier,
            Self::BinaryPv(_) => ElementKind::BinaryPv,
            Self::OptionalBinaryPv(_) => ElementKind::OptionalBinaryPv,
            Self::EngineeringUnits(_) => ElementKind::EngineeringUnits,
            Self::AccessCredentialDisable(_) => ElementKind::AccessCredentialDisable,
            Self::DoorSecuredStatus(_) => ElementKind::DoorSecuredStatus,
            Self::EscalatorOperationDirection(_) => ElementKind::EscalatorOperationDirection,
            Self::ObjectPropertyReference(_) => ElementKind::ObjectPropertyReference,
            Self::EnclosedObjectPropertyReference(e) => {
                ElementKind::EnclosedObjectPropertyReference(e.tag_number())
            }
            Self::DeviceObjectReference(_) => ElementKind::DeviceObjectReference,
            Self::BdtEntry(_) => ElementKind::BdtEntry,
            Self::NetworkSecurityPolicy(_) => ElementKind::NetworkSecurityPolicy,
            Self::TimerStateChangeValue(_) => ElementKind::TimerStateChangeValue,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        each!(self, e => e.encode(w))
    }

    pub fn encoded_len(&self) -> usize {
        each!(self, e => e.encoded_len())
    }

    /// The first header this element puts on the wire.
    pub fn leading_header(&self) -> TagHeader {
        match self {
            Self::Boolean(t) => *t.header(),
            Self::Unsigned(t) => *t.header(),
            Self::Real(t) => *t.header(),
            Self::CharacterString(t) => *t.header(),
            Self::BitString(t) => *t.header(),
            Self::Date(t) => *t.header(),
            Self::ObjectIdentifier(t) => *t.header(),
            Self::BinaryPv(t) => *t.header(),
            Self::EngineeringUnits(t) => *t.header(),
            Self::AccessCredentialDisable(t) => *t.header(),
            Self::DoorSecuredStatus(t) => *t.header(),
            Self::EscalatorOperationDirection(t) => *t.header(),
            Self::OptionalBinaryPv(e) => e.leading_header(),
            Self::ObjectPropertyReference(e) => e.leading_header(),
            Self::EnclosedObjectPropertyReference(e) => e.leading_header(),
            Self::DeviceObjectReference(e) => e.leading_header(),
            Self::BdtEntry(e) => e.leading_header(),
            Self::NetworkSecurityPolicy(e) => e.leading_header(),
            Self::TimerStateChangeValue(e) => e.leading_header(),
        }
    }

    pub fn real(value: f32) -> Self {
        Self::Real(Tagged::application(value))
    }

    pub fn unsigned(value: u64) -> Self {
        Self::Unsigned(Tagged::application(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean(Tagged::application(value))
    }

    pub fn character_string(value: impl Into<CharacterString>) -> Self {
        Self::CharacterString(Tagged::application(value.into()))
    }

    pub fn object_identifier(value: ObjectId) -> Self {
        Self::ObjectIdentifier(Tagged::application(value))
    }

    pub fn as_real(&self) -> Option<f32> {
        match self {
            Self::Real(t) => Some(*t.value()),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Self::Unsigned(t) => Some(*t.value()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(t) => Some(*t.value()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::CharacterString(t) => Some(t.value().as_str()),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectIdentifier(t) => Some(*t.value()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, ElementKind};
    use crate::constructed::PropertyArgs;
    use crate::encoding::reader::Reader;
    use crate::types::{EngineeringUnits, ObjectId, ObjectType, PropertyId};
    use crate::DecodeError;
    use alloc::string::ToString;

    fn args() -> PropertyArgs {
        PropertyArgs::new(ObjectType::AnalogInput, PropertyId::PresentValue)
    }

    #[test]
    fn kinds_decode_their_wire_type() {
        let e = ElementKind::Real
            .decode(&mut Reader::new(&[0x44, 0x42, 0x28, 0x00, 0x00]), &args())
            .unwrap();
        assert_eq!(e.kind(), ElementKind::Real);
        assert_eq!(e.as_real(), Some(42.0));
        assert_eq!(e, Element::real(42.0));

        let e = ElementKind::EngineeringUnits
            .decode(&mut Reader::new(&[0x91, 0x3E]), &args())
            .unwrap();
        let Element::EngineeringUnits(units) = &e else {
            panic!("expected units");
        };
        assert_eq!(*units.value(), EngineeringUnits::DegreesCelsius);
    }

    #[test]
    fn mismatched_application_type() {
        let err = ElementKind::Unsigned
            .decode(&mut Reader::new(&[0x44, 0x42, 0x28, 0x00, 0x00]), &args())
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::TagNumberMismatch {
                expected: 2,
                found: 4
            }
        );
    }

    #[test]
    fn accessors_are_kind_specific() {
        let e = Element::object_identifier(ObjectId::new(ObjectType::Device, 5));
        assert_eq!(e.as_object_id(), Some(ObjectId::new(ObjectType::Device, 5)));
        assert_eq!(e.as_real(), None);
        assert_eq!(Element::character_string("v1.2").as_str(), Some("v1.2"));
        assert_eq!(Element::boolean(true).encoded_len(), 1);
        assert_eq!(Element::unsigned(300).encoded_len(), 3);
    }

    #[test]
    fn enclosed_kind_displays_its_tag() {
        assert_eq!(
            ElementKind::EnclosedObjectPropertyReference(0).to_string(),
            "BACnetObjectPropertyReferenceEnclosed[0]"
        );
    }
}
