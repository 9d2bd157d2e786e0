//! BACnet constructed-data property codecs in pure Rust.
//!
//! `bacprop-core` decodes and encodes BACnet property values ("constructed
//! data"): the tag-length-value payload a device returns between context tag
//! `[3]` of a ReadProperty-ACK, or receives in a WriteProperty request. The
//! inner shape of that payload depends on the object type and property
//! identifier, so a single table-driven codec ([`constructed::PropertyCodec`])
//! maps each known pair to a field kind and arity. Unknown pairs fall back to
//! a generic element sequence, so any well-formed payload round-trips.
//!
//! Tag headers are kept exactly as they appeared on the wire: encoding a
//! decoded value reproduces the original bytes.
//!
//! # Feature flags
//!
//! - **`std`** (default): enables `std::error::Error` through `thiserror/std`.
//! - **`serde`**: derives `Serialize`/`Deserialize` on value types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Constructed property values: framing, the property table, and element types.
pub mod constructed;
/// Byte cursors, tag headers, payload primitives, and the field read/write protocol.
pub mod encoding;
/// Error types for encoding, decoding, and building values.
pub mod error;
/// ReadProperty and WriteProperty service payloads carrying constructed data.
pub mod services;
/// Typed tag values: the payload trait, tagged wrappers, and application tags.
pub mod tags;
/// Core BACnet data types: identifiers, dates, strings, and enumerations.
pub mod types;

pub use constructed::{ConstructedData, PropertyArgs, PropertyValue};
pub use error::{BuildError, DecodeError, EncodeError};
