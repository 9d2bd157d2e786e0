use crate::constructed::{ConstructedData, PropertyArgs};
use crate::encoding::fields::read_field;
use crate::encoding::{
    primitives::{encode_ctx_object_id, encode_ctx_unsigned},
    reader::Reader,
    writer::Writer,
};
use crate::services::{
    decode_optional_ctx_unsigned, decode_required_ctx_object_id, decode_required_ctx_property_id,
    PROPERTY_VALUE_TAG,
};
use crate::types::{ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

/// ReadProperty-ACK service parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadPropertyAck {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u64>,
    pub value: ConstructedData,
}

impl ReadPropertyAck {
    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context("ReadPropertyAck")?;
        let object_id = read_field(r, "objectIdentifier", |r| {
            decode_required_ctx_object_id(r, 0)
        })?;
        let property_id = read_field(r, "propertyIdentifier", |r| {
            decode_required_ctx_property_id(r, 1)
        })?;
        let array_index = decode_optional_ctx_unsigned(r, "propertyArrayIndex", 2)?;

        let args = PropertyArgs::new(object_id.object_type(), property_id)
            .with_tag_number(PROPERTY_VALUE_TAG)
            .with_array_index(array_index);
        let value = read_field(r, "propertyValue", |r| ConstructedData::decode(r, args))?;
        r.close_context("ReadPropertyAck")?;

        Ok(Self {
            object_id,
            property_id,
            array_index,
            value,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if self.value.args().tag_number != PROPERTY_VALUE_TAG {
            return Err(EncodeError::Message("property value must be enclosed in tag [3]"));
        }
        encode_ctx_object_id(w, 0, self.object_id.raw())?;
        encode_ctx_unsigned(w, 1, u64::from(self.property_id.to_u32()))?;
        if let Some(idx) = self.array_index {
            encode_ctx_unsigned(w, 2, idx)?;
        }
        self.value.encode(w)
    }
}
