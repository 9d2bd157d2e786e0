use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::encoding::writer::Writer;
use crate::{DecodeError, EncodeError};

/// Character set announced in the first payload octet of a character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterEncoding {
    Utf8,
    Dbcs,
    Jis,
    Ucs4,
    Ucs2,
    Iso8859_1,
}

impl CharacterEncoding {
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Utf8 => 0,
            Self::Dbcs => 1,
            Self::Jis => 2,
            Self::Ucs4 => 3,
            Self::Ucs2 => 4,
            Self::Iso8859_1 => 5,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Utf8),
            1 => Some(Self::Dbcs),
            2 => Some(Self::Jis),
            3 => Some(Self::Ucs4),
            4 => Some(Self::Ucs2),
            5 => Some(Self::Iso8859_1),
            _ => None,
        }
    }
}

/// A decoded character string together with the character set it was sent in.
///
/// UTF-8, UCS-2 (big-endian) and ISO 8859-1 are supported; the other
/// character sets fail to decode with [`DecodeError::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterString {
    pub encoding: CharacterEncoding,
    pub value: String,
}

impl CharacterString {
    pub fn utf8(value: impl Into<String>) -> Self {
        Self {
            encoding: CharacterEncoding::Utf8,
            value: value.into(),
        }
    }

    /// Parses a full payload, character set octet included.
    pub fn from_payload(raw: &[u8]) -> Result<Self, DecodeError> {
        let (&charset, text) = raw.split_first().ok_or(DecodeError::InvalidLength)?;
        let encoding = CharacterEncoding::from_u8(charset).ok_or(DecodeError::InvalidValue)?;
        let value = match encoding {
            CharacterEncoding::Utf8 => core::str::from_utf8(text)
                .map_err(|_| DecodeError::InvalidValue)?
                .into(),
            CharacterEncoding::Ucs2 => {
                if text.len() % 2 != 0 {
                    return Err(DecodeError::InvalidLength);
                }
                let units = text
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .collect::<Result<String, _>>()
                    .map_err(|_| DecodeError::InvalidValue)?
            }
            CharacterEncoding::Iso8859_1 => text.iter().map(|&b| char::from(b)).collect(),
            CharacterEncoding::Dbcs | CharacterEncoding::Jis | CharacterEncoding::Ucs4 => {
                return Err(DecodeError::Unsupported)
            }
        };
        Ok(Self { encoding, value })
    }

    /// Payload length in bytes, character set octet included.
    pub fn payload_len(&self) -> usize {
        1 + match self.encoding {
            CharacterEncoding::Ucs2 => self.value.encode_utf16().count() * 2,
            CharacterEncoding::Iso8859_1 => self.value.chars().count(),
            _ => self.value.len(),
        }
    }

    pub fn write_payload(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(self.encoding.to_u8())?;
        match self.encoding {
            CharacterEncoding::Utf8 => w.write_all(self.value.as_bytes()),
            CharacterEncoding::Ucs2 => {
                for unit in self.value.encode_utf16() {
                    w.write_be_u16(unit)?;
                }
                Ok(())
            }
            CharacterEncoding::Iso8859_1 => {
                for c in self.value.chars() {
                    let byte =
                        u8::try_from(u32::from(c)).map_err(|_| EncodeError::ValueOutOfRange)?;
                    w.write_u8(byte)?;
                }
                Ok(())
            }
            CharacterEncoding::Dbcs | CharacterEncoding::Jis | CharacterEncoding::Ucs4 => {
                Err(EncodeError::Unsupported)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = alloc::vec![0u8; self.payload_len()];
        let mut w = Writer::new(&mut buf);
        self.write_payload(&mut w)?;
        Ok(buf)
    }
}

impl From<&str> for CharacterString {
    fn from(value: &str) -> Self {
        Self::utf8(value)
    }
}

impl fmt::Display for CharacterString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{CharacterEncoding, CharacterString};
    use crate::{DecodeError, EncodeError};

    #[test]
    fn utf8_payload() {
        let s = CharacterString::from_payload(b"\x00Lobby AHU").unwrap();
        assert_eq!(s.encoding, CharacterEncoding::Utf8);
        assert_eq!(s.as_str(), "Lobby AHU");
        assert_eq!(s.to_payload().unwrap(), b"\x00Lobby AHU");
    }

    #[test]
    fn ucs2_payload() {
        let raw = [4, 0x00, b'O', 0x00, b'K', 0x00, 0xE9];
        let s = CharacterString::from_payload(&raw).unwrap();
        assert_eq!(s.as_str(), "OK\u{e9}");
        assert_eq!(s.payload_len(), raw.len());
        assert_eq!(s.to_payload().unwrap(), raw);
    }

    #[test]
    fn latin1_payload() {
        let raw = [5, b'C', 0xB0];
        let s = CharacterString::from_payload(&raw).unwrap();
        assert_eq!(s.as_str(), "C\u{b0}");
        assert_eq!(s.to_payload().unwrap(), raw);

        let wide = CharacterString {
            encoding: CharacterEncoding::Iso8859_1,
            value: "\u{20ac}".into(),
        };
        assert_eq!(wide.to_payload().unwrap_err(), EncodeError::ValueOutOfRange);
    }

    #[test]
    fn rejected_payloads() {
        assert_eq!(
            CharacterString::from_payload(&[]).unwrap_err(),
            DecodeError::InvalidLength
        );
        assert_eq!(
            CharacterString::from_payload(&[1, 0x30, 0x30]).unwrap_err(),
            DecodeError::Unsupported
        );
        assert_eq!(
            CharacterString::from_payload(&[0, 0xFF]).unwrap_err(),
            DecodeError::InvalidValue
        );
        assert_eq!(
            CharacterString::from_payload(&[4, 0x00]).unwrap_err(),
            DecodeError::InvalidLength
        );
    }
}
