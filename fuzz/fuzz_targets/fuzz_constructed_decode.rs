#![no_main]

use bacprop_core::constructed::PROPERTY_CODECS;
use bacprop_core::encoding::reader::Reader;
use bacprop_core::types::{ObjectType, PropertyId};
use bacprop_core::{ConstructedData, PropertyArgs};
use libfuzzer_sys::fuzz_target;

// First byte picks a table row (or an unknown property), second byte the
// array index; the rest is the constructed value.
fuzz_target!(|data: &[u8]| {
    let [selector, index, rest @ ..] = data else {
        return;
    };
    let args = match PROPERTY_CODECS.get(usize::from(*selector)) {
        Some(codec) => PropertyArgs::new(
            codec.object_type.unwrap_or(ObjectType::Device),
            codec.property_id,
        ),
        None => PropertyArgs::new(ObjectType::Device, PropertyId::from_u32(u32::from(*selector))),
    };
    let args = args.with_array_index((*index < 4).then_some(u64::from(*index)));

    let mut r = Reader::new(rest);
    if let Ok(value) = ConstructedData::decode(&mut r, args) {
        let encoded = value.to_vec().expect("decoded value must encode");
        assert_eq!(encoded, &rest[..r.position()]);
    }
});
