use crate::encoding::{reader::Reader, tag::Tag, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Minimal number of bytes holding `value`.
pub const fn unsigned_len(value: u64) -> u32 {
    let bits = 64 - value.leading_zeros();
    if bits == 0 {
        1
    } else {
        bits.div_ceil(8)
    }
}

/// Minimal number of bytes holding `value` in two's complement.
pub const fn signed_len(value: i64) -> u32 {
    let significant = if value < 0 {
        64 - (!value).leading_zeros()
    } else {
        64 - value.leading_zeros()
    };
    // One extra bit for the sign.
    (significant + 1).div_ceil(8)
}

/// Writes `value` big-endian in exactly `len` bytes.
pub fn encode_unsigned(w: &mut Writer<'_>, value: u64, len: usize) -> Result<(), EncodeError> {
    if len == 0 || len > 8 {
        return Err(EncodeError::InvalidLength);
    }
    if (unsigned_len(value) as usize) > len {
        return Err(EncodeError::ValueOutOfRange);
    }
    let bytes = value.to_be_bytes();
    w.write_all(&bytes[8 - len..])
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidLength);
    }
    let mut value = 0u64;
    for _ in 0..len {
        value = (value << 8) | r.read_u8()? as u64;
    }
    Ok(value)
}

/// Writes `value` big-endian two's complement in exactly `len` bytes.
pub fn encode_signed(w: &mut Writer<'_>, value: i64, len: usize) -> Result<(), EncodeError> {
    if len == 0 || len > 8 {
        return Err(EncodeError::InvalidLength);
    }
    if (signed_len(value) as usize) > len {
        return Err(EncodeError::ValueOutOfRange);
    }
    let bytes = value.to_be_bytes();
    w.write_all(&bytes[8 - len..])
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidLength);
    }

    let bytes = r.read_exact(len)?;
    let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 8];
    out[8 - len..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(out))
}

pub fn encode_ctx_unsigned(w: &mut Writer<'_>, tag_num: u8, value: u64) -> Result<(), EncodeError> {
    let len = unsigned_len(value);
    Tag::Context { tag_num, len }.encode(w)?;
    encode_unsigned(w, value, len as usize)
}

pub fn encode_ctx_object_id(
    w: &mut Writer<'_>,
    tag_num: u8,
    object_id_raw: u32,
) -> Result<(), EncodeError> {
    Tag::Context { tag_num, len: 4 }.encode(w)?;
    w.write_be_u32(object_id_raw)
}

#[cfg(test)]
mod tests {
    use super::{
        decode_signed, decode_unsigned, encode_ctx_unsigned, encode_signed, encode_unsigned,
        signed_len, unsigned_len,
    };
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::EncodeError;
    use proptest::prelude::*;

    #[test]
    fn minimal_lengths() {
        assert_eq!(unsigned_len(0), 1);
        assert_eq!(unsigned_len(0xFF), 1);
        assert_eq!(unsigned_len(0x100), 2);
        assert_eq!(unsigned_len(u64::MAX), 8);
        assert_eq!(signed_len(0), 1);
        assert_eq!(signed_len(127), 1);
        assert_eq!(signed_len(128), 2);
        assert_eq!(signed_len(-128), 1);
        assert_eq!(signed_len(-129), 2);
        assert_eq!(signed_len(i64::MIN), 8);
    }

    #[test]
    fn padded_unsigned_keeps_its_width() {
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        encode_unsigned(&mut w, 5, 3).unwrap();
        assert_eq!(w.as_written(), &[0, 0, 5]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_unsigned(&mut r, 3).unwrap(), 5);
    }

    #[test]
    fn too_narrow_is_rejected() {
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        assert_eq!(
            encode_unsigned(&mut w, 0x1234, 1).unwrap_err(),
            EncodeError::ValueOutOfRange
        );
        assert_eq!(
            encode_signed(&mut w, 200, 1).unwrap_err(),
            EncodeError::ValueOutOfRange
        );
        assert_eq!(
            encode_unsigned(&mut w, 1, 9).unwrap_err(),
            EncodeError::InvalidLength
        );
    }

    #[test]
    fn ctx_unsigned_is_minimal() {
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        encode_ctx_unsigned(&mut w, 1, 85).unwrap();
        assert_eq!(w.as_written(), &[0x19, 0x55]);
    }

    proptest! {
        #[test]
        fn unsigned_roundtrip(v in any::<u64>(), extra in 0usize..8) {
            let len = (unsigned_len(v) as usize + extra).min(8);
            let mut b = [0u8; 8];
            let mut w = Writer::new(&mut b);
            encode_unsigned(&mut w, v, len).unwrap();
            prop_assert_eq!(w.position(), len);
            let mut r = Reader::new(w.as_written());
            let got = decode_unsigned(&mut r, len).unwrap();
            prop_assert_eq!(got, v);
        }

        #[test]
        fn signed_roundtrip(v in any::<i64>(), extra in 0usize..8) {
            let len = (signed_len(v) as usize + extra).min(8);
            let mut b = [0u8; 8];
            let mut w = Writer::new(&mut b);
            encode_signed(&mut w, v, len).unwrap();
            let mut r = Reader::new(w.as_written());
            let got = decode_signed(&mut r, len).unwrap();
            prop_assert_eq!(got, v);
        }
    }
}
