use bacprop_core::constructed::{
    BdtEntry, ConstructedElement, DateTimeEnclosed, DeviceObjectReference, Element, ElementKind,
    EnclosedObjectPropertyReference, FieldShape, HostAddress, HostNPort, LightingCommand,
    LightingCommandEnclosed, NetworkSecurityPolicy, ObjectPropertyReference, OptionalBinaryPv,
    PropertyCodec, TimerStateChangeValue, PROPERTY_CODECS, VENDOR_PROPRIETARY_VALUE,
};
use bacprop_core::encoding::reader::Reader;
use bacprop_core::tags::{ApplicationTag, Enumerated, Null, OctetString, Tagged};
use bacprop_core::types::{
    AccessCredentialDisable, BinaryPv, BitString, CharacterString, Date, DoorSecuredStatus,
    EngineeringUnits, EscalatorOperationDirection, LightingOperation, ObjectId, ObjectType,
    PropertyId, SecurityLevel, Time,
};
use bacprop_core::{ConstructedData, PropertyArgs, PropertyValue};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

/// Object type used for rows that apply to every object type. No row is
/// restricted to it.
const ANY_OBJECT_TYPE: ObjectType = ObjectType::Device;

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |v| v.is_finite())
}

fn text() -> impl Strategy<Value = CharacterString> {
    "\\PC{0,12}".prop_map(|s| CharacterString::utf8(s))
}

fn bits() -> impl Strategy<Value = BitString> {
    vec(any::<bool>(), 0..20).prop_map(|bits| BitString::from_bits(&bits))
}

fn object_id() -> impl Strategy<Value = ObjectId> {
    any::<u32>().prop_map(ObjectId::from_raw)
}

/// Named values, and raw values that may or may not collide with a name.
fn enum_value<E: Clone + core::fmt::Debug + 'static>(
    named: fn(u32) -> E,
    raw: fn(u32) -> E,
) -> impl Strategy<Value = E> {
    prop_oneof![
        (0u32..64).prop_map(named),
        (0u32..64).prop_map(raw),
        any::<u32>().prop_map(named),
    ]
}

fn property_id() -> impl Strategy<Value = PropertyId> {
    enum_value(PropertyId::from_u32, PropertyId::Proprietary)
}

fn application_tag() -> impl Strategy<Value = ApplicationTag> {
    prop_oneof![
        Just(ApplicationTag::Null(Tagged::application(Null))),
        any::<bool>().prop_map(|v| ApplicationTag::Boolean(Tagged::application(v))),
        any::<u64>().prop_map(|v| ApplicationTag::Unsigned(Tagged::application(v))),
        any::<i64>().prop_map(|v| ApplicationTag::Signed(Tagged::application(v))),
        finite_f32().prop_map(|v| ApplicationTag::Real(Tagged::application(v))),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| ApplicationTag::Double(Tagged::application(v))),
        vec(any::<u8>(), 0..8)
            .prop_map(|b| ApplicationTag::OctetString(Tagged::application(OctetString(b)))),
        text().prop_map(|s| ApplicationTag::CharacterString(Tagged::application(s))),
        bits().prop_map(|b| ApplicationTag::BitString(Tagged::application(b))),
        any::<u32>().prop_map(|v| ApplicationTag::Enumerated(Tagged::application(Enumerated(v)))),
        any::<[u8; 4]>()
            .prop_map(|b| ApplicationTag::Date(Tagged::application(Date::from_bytes(b)))),
        any::<[u8; 4]>()
            .prop_map(|b| ApplicationTag::Time(Tagged::application(Time::from_bytes(b)))),
        object_id().prop_map(|id| ApplicationTag::ObjectId(Tagged::application(id))),
    ]
}

fn object_property_reference() -> impl Strategy<Value = ObjectPropertyReference> {
    (object_id(), property_id(), option::of(any::<u64>()))
        .prop_map(|(object, property, index)| ObjectPropertyReference::new(object, property, index))
}

fn host_address() -> impl Strategy<Value = HostAddress> {
    prop_oneof![
        Just(HostAddress::none()),
        any::<[u8; 4]>().prop_map(HostAddress::ip),
        text().prop_map(HostAddress::name),
    ]
}

fn lighting_command() -> impl Strategy<Value = LightingCommand> {
    (
        enum_value(LightingOperation::from_u32, LightingOperation::Proprietary),
        option::of(finite_f32()),
        option::of(finite_f32()),
        option::of(finite_f32()),
        option::of(any::<u64>()),
        option::of(any::<u8>()),
    )
        .prop_map(|(operation, level, rate, step, fade, priority)| {
            let mut command = LightingCommand::new(operation);
            if let Some(level) = level {
                command = command.with_target_level(level);
            }
            if let Some(rate) = rate {
                command = command.with_ramp_rate(rate);
            }
            if let Some(step) = step {
                command = command.with_step_increment(step);
            }
            if let Some(fade) = fade {
                command = command.with_fade_time(fade);
            }
            if let Some(priority) = priority {
                command = command.with_priority(priority);
            }
            command
        })
}

fn timer_state_change_value(
    object_type: ObjectType,
) -> impl Strategy<Value = TimerStateChangeValue> {
    let inner_args = PropertyArgs::new(object_type, VENDOR_PROPRIETARY_VALUE).with_tag_number(1);
    prop_oneof![
        application_tag().prop_map(TimerStateChangeValue::Application),
        Just(TimerStateChangeValue::no_value()),
        vec(application_tag(), 0..3).prop_map(move |items| {
            let items = items.into_iter().map(ConstructedElement::Application).collect();
            let data = ConstructedData::build(inner_args, PropertyValue::Unspecified(items))
                .expect("unspecified data builds for a property without a codec");
            TimerStateChangeValue::ConstructedValue(Box::new(data))
        }),
        (any::<[u8; 4]>(), any::<[u8; 4]>()).prop_map(|(date, time)| {
            TimerStateChangeValue::DateTime(DateTimeEnclosed::new(
                2,
                Date::from_bytes(date),
                Time::from_bytes(time),
            ))
        }),
        lighting_command().prop_map(|command| {
            TimerStateChangeValue::LightingCommand(LightingCommandEnclosed::new(3, command))
        }),
    ]
}

fn element(kind: ElementKind, object_type: ObjectType) -> BoxedStrategy<Element> {
    match kind {
        ElementKind::Boolean => any::<bool>().prop_map(Element::boolean).boxed(),
        ElementKind::Unsigned => any::<u64>().prop_map(Element::unsigned).boxed(),
        ElementKind::Real => finite_f32().prop_map(Element::real).boxed(),
        ElementKind::CharacterString => text()
            .prop_map(|s| Element::CharacterString(Tagged::application(s)))
            .boxed(),
        ElementKind::BitString => bits()
            .prop_map(|b| Element::BitString(Tagged::application(b)))
            .boxed(),
        ElementKind::Date => any::<[u8; 4]>()
            .prop_map(|b| Element::Date(Tagged::application(Date::from_bytes(b))))
            .boxed(),
        ElementKind::ObjectIdentifier => object_id().prop_map(Element::object_identifier).boxed(),
        ElementKind::BinaryPv => enum_value(BinaryPv::from_u32, BinaryPv::Proprietary)
            .prop_map(|v| Element::BinaryPv(Tagged::application(v)))
            .boxed(),
        ElementKind::OptionalBinaryPv => prop_oneof![
            Just(OptionalBinaryPv::null()),
            enum_value(BinaryPv::from_u32, BinaryPv::Proprietary).prop_map(OptionalBinaryPv::value),
        ]
        .prop_map(Element::OptionalBinaryPv)
        .boxed(),
        ElementKind::EngineeringUnits => {
            enum_value(EngineeringUnits::from_u32, EngineeringUnits::Proprietary)
                .prop_map(|v| Element::EngineeringUnits(Tagged::application(v)))
                .boxed()
        }
        ElementKind::AccessCredentialDisable => enum_value(
            AccessCredentialDisable::from_u32,
            AccessCredentialDisable::Proprietary,
        )
        .prop_map(|v| Element::AccessCredentialDisable(Tagged::application(v)))
        .boxed(),
        ElementKind::DoorSecuredStatus => {
            enum_value(DoorSecuredStatus::from_u32, DoorSecuredStatus::Proprietary)
                .prop_map(|v| Element::DoorSecuredStatus(Tagged::application(v)))
                .boxed()
        }
        ElementKind::EscalatorOperationDirection => enum_value(
            EscalatorOperationDirection::from_u32,
            EscalatorOperationDirection::Proprietary,
        )
        .prop_map(|v| Element::EscalatorOperationDirection(Tagged::application(v)))
        .boxed(),
        ElementKind::ObjectPropertyReference => object_property_reference()
            .prop_map(Element::ObjectPropertyReference)
            .boxed(),
        ElementKind::EnclosedObjectPropertyReference(tag_number) => object_property_reference()
            .prop_map(move |r| {
                Element::EnclosedObjectPropertyReference(EnclosedObjectPropertyReference::new(
                    tag_number, r,
                ))
            })
            .boxed(),
        ElementKind::DeviceObjectReference => (option::of(object_id()), object_id())
            .prop_map(|(device, object)| {
                Element::DeviceObjectReference(DeviceObjectReference::new(device, object))
            })
            .boxed(),
        ElementKind::BdtEntry => (host_address(), any::<u16>(), option::of(any::<[u8; 4]>()))
            .prop_map(|(host, port, mask)| {
                Element::BdtEntry(BdtEntry::new(HostNPort::new(host, port), mask))
            })
            .boxed(),
        ElementKind::NetworkSecurityPolicy => (
            any::<u8>(),
            enum_value(SecurityLevel::from_u32, SecurityLevel::Proprietary),
        )
            .prop_map(|(port, level)| {
                Element::NetworkSecurityPolicy(NetworkSecurityPolicy::new(port, level))
            })
            .boxed(),
        ElementKind::TimerStateChangeValue => timer_state_change_value(object_type)
            .prop_map(Element::TimerStateChangeValue)
            .boxed(),
    }
}

/// A valid value for one row of the property table, with the arguments it
/// is read back with.
fn property_case() -> impl Strategy<Value = (&'static PropertyCodec, PropertyArgs, PropertyValue)> {
    (0..PROPERTY_CODECS.len()).prop_flat_map(|row| {
        let codec = &PROPERTY_CODECS[row];
        let object_type = codec.object_type.unwrap_or(ANY_OBJECT_TYPE);
        let args = PropertyArgs::new(object_type, codec.property_id);
        let element = element(codec.kind, object_type);
        match codec.shape {
            FieldShape::Scalar => element
                .prop_map(move |e| (codec, args, PropertyValue::Scalar(e)))
                .boxed(),
            FieldShape::Optional => option::of(element)
                .prop_map(move |e| (codec, args, PropertyValue::Optional(e)))
                .boxed(),
            FieldShape::List => vec(element, 0..4)
                .prop_map(move |es| (codec, args, PropertyValue::List(es)))
                .boxed(),
            FieldShape::Array => {
                let index = prop_oneof![Just(None), Just(Some(0)), (1u64..8).prop_map(Some)];
                (index, any::<u64>())
                    .prop_flat_map(move |(index, count)| {
                        let len = match (codec.exact_len, index) {
                            (Some(n), None) => n..n + 1,
                            _ => 0..4,
                        };
                        // An indexed read for element 0 carries the count.
                        let number_of_data_elements =
                            (index == Some(0)).then(|| Tagged::application(count));
                        let args = args.with_array_index(index);
                        vec(element.clone(), len).prop_map(move |elements| {
                            let value = PropertyValue::Array {
                                number_of_data_elements: number_of_data_elements.clone(),
                                elements,
                            };
                            (codec, args, value)
                        })
                    })
                    .boxed()
            }
        }
    })
}

proptest! {
    #[test]
    fn every_table_row_round_trips((codec, args, value) in property_case()) {
        let resolved = PropertyCodec::lookup(args.object_type, args.property_id).unwrap();
        prop_assert_eq!(resolved.type_name, codec.type_name);

        let built = ConstructedData::build(args, value.clone()).unwrap();
        let bytes = built.to_vec().unwrap();
        prop_assert_eq!(bytes.len(), built.encoded_len());

        let mut r = Reader::new(&bytes);
        let decoded = ConstructedData::decode(&mut r, args).unwrap();
        prop_assert!(r.is_empty());
        prop_assert_eq!(&decoded, &built);
        prop_assert_eq!(decoded.to_vec().unwrap(), bytes);

        let stored = match &value {
            PropertyValue::Scalar(e) => Some(e),
            PropertyValue::Optional(e) => e.as_ref(),
            _ => None,
        };
        prop_assert_eq!(decoded.actual_value(), stored);
        let is_array = matches!(value, PropertyValue::Array { .. });
        prop_assert_eq!(decoded.zero(), is_array.then_some(0));
    }
}

#[test]
fn raw_enumeration_value_with_a_name_round_trips() {
    let args = PropertyArgs::new(ObjectType::BinaryValue, PropertyId::PresentValue);
    let built = ConstructedData::build(
        args,
        PropertyValue::Scalar(Element::BinaryPv(Tagged::application(
            BinaryPv::Proprietary(1),
        ))),
    )
    .unwrap();
    let bytes = built.to_vec().unwrap();
    assert_eq!(bytes, [0x3E, 0x91, 0x01, 0x3F]);
    let decoded = ConstructedData::decode(&mut Reader::new(&bytes), args).unwrap();
    assert_eq!(decoded, built);
    let Some(Element::BinaryPv(pv)) = decoded.actual_value() else {
        panic!("expected a binary present value");
    };
    assert!(matches!(pv.value(), BinaryPv::Active));
}
