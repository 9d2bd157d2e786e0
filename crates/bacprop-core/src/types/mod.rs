/// Equality and hashing by wire value, so a raw fallback that holds a named
/// value compares equal to the named variant.
macro_rules! wire_value_eq {
    ($name:ident, $to_raw:ident) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.$to_raw() == other.$to_raw()
            }
        }

        impl Eq for $name {}

        impl core::hash::Hash for $name {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                self.$to_raw().hash(state);
            }
        }
    };
}

pub mod bit_string;
pub mod character_string;
pub mod date_time;
pub mod enums;
pub mod object_id;
pub mod object_type;
pub mod property_id;

pub use bit_string::BitString;
pub use character_string::{CharacterEncoding, CharacterString};
pub use date_time::{Date, Time};
pub use enums::{
    AccessCredentialDisable, BinaryPv, DoorSecuredStatus, EngineeringUnits,
    EscalatorOperationDirection, LightingOperation, SecurityLevel,
};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use property_id::PropertyId;
