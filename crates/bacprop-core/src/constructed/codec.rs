//! The property table: which element kind and arity each (object type,
//! property) pair carries, and the shared field protocol that reads and
//! writes it.

use alloc::vec::Vec;

use crate::constructed::element::{Element, ElementKind};
use crate::constructed::{PropertyArgs, PropertyValue};
use crate::encoding::fields::{
    read_field, read_optional, read_terminated, write_field, write_optional, write_terminated,
};
use crate::encoding::reader::Reader;
use crate::encoding::writer::Writer;
use crate::error::BuildProblem;
use crate::tags::Tagged;
use crate::types::{ObjectType, PropertyId};
use crate::{DecodeError, EncodeError};

/// How many values a property field holds and how they are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldShape {
    /// Exactly one element.
    Scalar,
    /// Zero or one element; a missing element is not an error.
    Optional,
    /// Elements up to the closing tag, no count.
    List,
    /// Elements up to the closing tag, preceded by an optional element count
    /// when the array index argument is 0.
    Array,
}

/// One row of [`PROPERTY_CODECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyCodec {
    /// Name of the decoded type, also used as its trace context.
    pub type_name: &'static str,
    /// `None` matches every object type.
    pub object_type: Option<ObjectType>,
    pub property_id: PropertyId,
    pub field_name: &'static str,
    pub kind: ElementKind,
    pub shape: FieldShape,
    /// Element count an array must have when it is read whole.
    pub exact_len: Option<usize>,
}

macro_rules! codec {
    (
        $type_name:literal,
        $object_type:expr,
        $property:ident,
        $field:literal,
        $kind:expr,
        $shape:ident $(,)?
    ) => {
        codec!($type_name, $object_type, $property, $field, $kind, $shape, None)
    };
    (
        $type_name:literal,
        $object_type:expr,
        $property:ident,
        $field:literal,
        $kind:expr,
        $shape:ident,
        $exact_len:expr $(,)?
    ) => {
        PropertyCodec {
            type_name: concat!("BACnetConstructedData", $type_name),
            object_type: $object_type,
            property_id: PropertyId::$property,
            field_name: $field,
            kind: $kind,
            shape: FieldShape::$shape,
            exact_len: $exact_len,
        }
    };
}

const ANY: Option<ObjectType> = None;

/// Every property with a known layout.
///
/// Rows restricted to an object type take precedence over rows for any
/// object type with the same property.
pub static PROPERTY_CODECS: &[PropertyCodec] = &[
    codec!(
        "ActiveText",
        ANY,
        ActiveText,
        "activeText",
        ElementKind::CharacterString,
        Scalar
    ),
    codec!(
        "AnalogInputFaultHighLimit",
        Some(ObjectType::AnalogInput),
        FaultHighLimit,
        "faultHighLimit",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "AnalogValueFaultHighLimit",
        Some(ObjectType::AnalogValue),
        FaultHighLimit,
        "faultHighLimit",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "AnalogInputPresentValue",
        Some(ObjectType::AnalogInput),
        PresentValue,
        "presentValue",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "AnalogOutputPresentValue",
        Some(ObjectType::AnalogOutput),
        PresentValue,
        "presentValue",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "AnalogValuePresentValue",
        Some(ObjectType::AnalogValue),
        PresentValue,
        "presentValue",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "BBMDBroadcastDistributionTable",
        ANY,
        BbmdBroadcastDistributionTable,
        "bbmdBroadcastDistributionTable",
        ElementKind::BdtEntry,
        List
    ),
    codec!(
        "BinaryInputInterfaceValue",
        Some(ObjectType::BinaryInput),
        InterfaceValue,
        "interfaceValue",
        ElementKind::OptionalBinaryPv,
        Scalar
    ),
    codec!(
        "BinaryValuePresentValue",
        Some(ObjectType::BinaryValue),
        PresentValue,
        "presentValue",
        ElementKind::BinaryPv,
        Scalar
    ),
    codec!(
        "ControlledVariableUnits",
        ANY,
        ControlledVariableUnits,
        "units",
        ElementKind::EngineeringUnits,
        Scalar
    ),
    codec!(
        "CredentialDisable",
        ANY,
        CredentialDisable,
        "credentialDisable",
        ElementKind::AccessCredentialDisable,
        Scalar
    ),
    codec!(
        "DatePatternValueRelinquishDefault",
        Some(ObjectType::DatePatternValue),
        RelinquishDefault,
        "relinquishDefault",
        ElementKind::Date,
        Scalar
    ),
    codec!(
        "Description",
        ANY,
        Description,
        "description",
        ElementKind::CharacterString,
        Scalar
    ),
    codec!(
        "DirectReading",
        ANY,
        DirectReading,
        "directReading",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "DoorExtendedPulseTime",
        ANY,
        DoorExtendedPulseTime,
        "doorExtendedPulseTime",
        ElementKind::Unsigned,
        Scalar
    ),
    codec!(
        "DoorMembers",
        ANY,
        DoorMembers,
        "doorMembers",
        ElementKind::DeviceObjectReference,
        Array
    ),
    codec!(
        "FirmwareRevision",
        ANY,
        FirmwareRevision,
        "firmwareRevision",
        ElementKind::CharacterString,
        Scalar
    ),
    codec!(
        "InputReference",
        ANY,
        InputReference,
        "inputReference",
        ElementKind::ObjectPropertyReference,
        Scalar
    ),
    codec!(
        "LightingOutputTrackingValue",
        Some(ObjectType::LightingOutput),
        TrackingValue,
        "trackingValue",
        ElementKind::Real,
        Scalar
    ),
    codec!(
        "LoggingObject",
        ANY,
        LoggingObject,
        "loggingObject",
        ElementKind::ObjectIdentifier,
        Scalar
    ),
    codec!(
        "NetworkAccessSecurityPolicies",
        ANY,
        NetworkAccessSecurityPolicies,
        "networkAccessSecurityPolicies",
        ElementKind::NetworkSecurityPolicy,
        Array
    ),
    codec!(
        "NotificationThreshold",
        ANY,
        NotificationThreshold,
        "notificationThreshold",
        ElementKind::Unsigned,
        Scalar
    ),
    codec!(
        "ObjectIdentifier",
        ANY,
        ObjectIdentifier,
        "objectIdentifier",
        ElementKind::ObjectIdentifier,
        Scalar
    ),
    codec!(
        "ObjectName",
        ANY,
        ObjectName,
        "objectName",
        ElementKind::CharacterString,
        Scalar
    ),
    codec!(
        "OperationDirection",
        ANY,
        OperationDirection,
        "operationDirection",
        ElementKind::EscalatorOperationDirection,
        Scalar
    ),
    codec!(
        "PassengerAlarm",
        ANY,
        PassengerAlarm,
        "passengerAlarm",
        ElementKind::Boolean,
        Scalar
    ),
    codec!(
        "ProcessIdentifier",
        ANY,
        ProcessIdentifier,
        "processIdentifier",
        ElementKind::Unsigned,
        Scalar
    ),
    codec!(
        "ProtocolRevision",
        ANY,
        ProtocolRevision,
        "protocolRevision",
        ElementKind::Unsigned,
        Scalar
    ),
    codec!(
        "SecuredStatus",
        ANY,
        SecuredStatus,
        "securedStatus",
        ElementKind::DoorSecuredStatus,
        Scalar
    ),
    codec!(
        "SetpointReference",
        ANY,
        SetpointReference,
        "setpointReference",
        ElementKind::EnclosedObjectPropertyReference(0),
        Optional
    ),
    codec!(
        "SlaveProxyEnable",
        ANY,
        SlaveProxyEnable,
        "slaveProxyEnable",
        ElementKind::Boolean,
        Scalar
    ),
    codec!(
        "StateChangeValues",
        ANY,
        StateChangeValues,
        "stateChangeValues",
        ElementKind::TimerStateChangeValue,
        Array,
        Some(7)
    ),
    codec!(
        "StatusFlags",
        ANY,
        StatusFlags,
        "statusFlags",
        ElementKind::BitString,
        Scalar
    ),
    codec!(
        "UserInformationReference",
        ANY,
        UserInformationReference,
        "userInformationReference",
        ElementKind::CharacterString,
        Scalar
    ),
    codec!(
        "VendorName",
        ANY,
        VendorName,
        "vendorName",
        ElementKind::CharacterString,
        Scalar
    ),
];

impl PropertyCodec {
    /// Finds the codec for a property, preferring a row for this exact
    /// object type over a row for any object type.
    pub fn lookup(object_type: ObjectType, property_id: PropertyId) -> Option<&'static Self> {
        let mut wildcard = None;
        for codec in PROPERTY_CODECS.iter().filter(|c| c.property_id == property_id) {
            match codec.object_type {
                Some(ot) if ot == object_type => return Some(codec),
                None => wildcard = wildcard.or(Some(codec)),
                Some(_) => {}
            }
        }
        wildcard
    }

    /// Reads the property field from just after the peeked header up to, but
    /// not including, the closing tag.
    pub fn decode(
        &self,
        r: &mut Reader<'_>,
        args: &PropertyArgs,
    ) -> Result<PropertyValue, DecodeError> {
        let kind = self.kind;
        match self.shape {
            FieldShape::Scalar => {
                let element = read_field(r, self.field_name, |r| kind.decode(r, args))?;
                r.read_virtual("actualValue", &element);
                Ok(PropertyValue::Scalar(element))
            }
            FieldShape::Optional => {
                let element = read_optional(r, self.field_name, |r| kind.decode(r, args))?;
                r.read_virtual("actualValue", &element);
                Ok(PropertyValue::Optional(element))
            }
            FieldShape::List => {
                let elements = read_terminated(r, self.field_name, args.tag_number, |r| {
                    kind.decode(r, args)
                })?;
                Ok(PropertyValue::List(elements))
            }
            FieldShape::Array => {
                r.read_virtual("zero", &0u64);
                let number_of_data_elements = if args.array_index == Some(0) {
                    read_optional(r, "numberOfDataElements", Tagged::<u64>::decode_application)?
                } else {
                    None
                };
                let elements = read_terminated(r, self.field_name, args.tag_number, |r| {
                    kind.decode(r, args)
                })?;
                if let (Some(expected), None) = (self.exact_len, args.array_index) {
                    if elements.len() != expected {
                        return Err(DecodeError::ElementCount {
                            expected,
                            found: elements.len(),
                        }
                        .in_field(self.field_name));
                    }
                }
                Ok(PropertyValue::Array {
                    number_of_data_elements,
                    elements,
                })
            }
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>, value: &PropertyValue) -> Result<(), EncodeError> {
        match (self.shape, value) {
            (FieldShape::Scalar, PropertyValue::Scalar(element)) => {
                write_field(w, self.field_name, |w| element.encode(w))?;
                w.write_virtual("actualValue", element);
            }
            (FieldShape::Optional, PropertyValue::Optional(element)) => {
                write_optional(w, self.field_name, element.as_ref(), |w, e| e.encode(w))?;
                w.write_virtual("actualValue", element);
            }
            (FieldShape::List, PropertyValue::List(elements)) => {
                write_terminated(w, self.field_name, elements, |w, e| e.encode(w))?;
            }
            (
                FieldShape::Array,
                PropertyValue::Array {
                    number_of_data_elements,
                    elements,
                },
            ) => {
                w.write_virtual("zero", &0u64);
                write_optional(
                    w,
                    "numberOfDataElements",
                    number_of_data_elements.as_ref(),
                    |w, count| count.encode(w),
                )?;
                write_terminated(w, self.field_name, elements, |w, e| e.encode(w))?;
            }
            _ => {
                return Err(EncodeError::Message(
                    "property value shape does not match its codec",
                ))
            }
        }
        Ok(())
    }

    /// Collects everything that keeps `value` from being a valid value of
    /// this property.
    pub fn validate(&self, args: &PropertyArgs, value: &PropertyValue) -> Vec<BuildProblem> {
        let mut problems = Vec::new();
        match (self.shape, value) {
            (FieldShape::Scalar, PropertyValue::Scalar(element))
            | (FieldShape::Optional, PropertyValue::Optional(Some(element))) => {
                self.check_kind(None, element, &mut problems);
            }
            (FieldShape::Optional, PropertyValue::Optional(None)) => {}
            (FieldShape::Scalar, PropertyValue::Optional(None)) => {
                problems.push(BuildProblem::MissingField(self.field_name));
            }
            (FieldShape::List, PropertyValue::List(elements)) => {
                for (index, element) in elements.iter().enumerate() {
                    self.check_kind(Some(index), element, &mut problems);
                }
            }
            (
                FieldShape::Array,
                PropertyValue::Array {
                    number_of_data_elements,
                    elements,
                },
            ) => {
                if number_of_data_elements.is_some() && args.array_index != Some(0) {
                    problems.push(BuildProblem::UnexpectedCount);
                }
                if let (Some(expected), None) = (self.exact_len, args.array_index) {
                    if elements.len() != expected {
                        problems.push(BuildProblem::ElementCount {
                            field: self.field_name,
                            expected,
                            found: elements.len(),
                        });
                    }
                }
                for (index, element) in elements.iter().enumerate() {
                    self.check_kind(Some(index), element, &mut problems);
                }
            }
            _ => problems.push(BuildProblem::ShapeMismatch {
                field: self.field_name,
                expected: self.shape,
            }),
        }
        problems
    }

    fn check_kind(
        &self,
        index: Option<usize>,
        element: &Element,
        problems: &mut Vec<BuildProblem>,
    ) {
        let found = element.kind();
        if found != self.kind {
            problems.push(BuildProblem::KindMismatch {
                field: self.field_name,
                index,
                expected: self.kind,
                found,
            });
        }
    }
}
