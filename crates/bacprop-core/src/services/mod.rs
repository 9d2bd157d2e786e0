//! Service parameters that carry a property value as constructed data.
//!
//! Decoding starts just after the APDU header; the object type used to pick
//! the property codec comes from the object identifier in the request.

pub mod read_property;
pub mod write_property;

pub use read_property::ReadPropertyAck;
pub use write_property::WritePropertyRequest;

use crate::encoding::fields::read_optional;
use crate::encoding::reader::Reader;
use crate::tags::Tagged;
use crate::types::{ObjectId, PropertyId};
use crate::DecodeError;

/// Context tag holding the property value in ReadProperty and WriteProperty.
pub const PROPERTY_VALUE_TAG: u8 = 3;

/// Decode a required context-tagged unsigned integer at the expected tag number.
pub(crate) fn decode_required_ctx_unsigned(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<u64, DecodeError> {
    Ok(Tagged::<u64>::decode_context(r, expected_tag_num)?.into_value())
}

/// Decode a context-tagged unsigned integer that may be missing.
pub(crate) fn decode_optional_ctx_unsigned(
    r: &mut Reader<'_>,
    field: &'static str,
    expected_tag_num: u8,
) -> Result<Option<u64>, DecodeError> {
    read_optional(r, field, |r| decode_required_ctx_unsigned(r, expected_tag_num))
}

/// Decode a required context-tagged BACnet object identifier at the expected tag number.
pub(crate) fn decode_required_ctx_object_id(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<ObjectId, DecodeError> {
    Ok(Tagged::<ObjectId>::decode_context(r, expected_tag_num)?.into_value())
}

pub(crate) fn decode_required_ctx_property_id(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<PropertyId, DecodeError> {
    let raw = decode_required_ctx_unsigned(r, expected_tag_num)?;
    let raw = u32::try_from(raw).map_err(|_| DecodeError::InvalidValue)?;
    Ok(PropertyId::from_u32(raw))
}
