use bacprop_core::types::ObjectType;
use clap::ValueEnum;
use thiserror::Error;

/// CLI-friendly enum for selecting BACnet object types.
///
/// Maps human-readable names to [`ObjectType`] variants for use with clap argument parsing.
/// Types without a name here can be given as a raw number instead.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ObjectTypeArg {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Device,
    Loop,
    MultiStateValue,
    AccessDoor,
    Timer,
    NetworkSecurity,
    DatePatternValue,
    LightingOutput,
    NetworkPort,
    Escalator,
    Lift,
}

impl ObjectTypeArg {
    /// Convert to the core [`ObjectType`] representation.
    pub const fn into_object_type(self) -> ObjectType {
        match self {
            Self::AnalogInput => ObjectType::AnalogInput,
            Self::AnalogOutput => ObjectType::AnalogOutput,
            Self::AnalogValue => ObjectType::AnalogValue,
            Self::BinaryInput => ObjectType::BinaryInput,
            Self::BinaryOutput => ObjectType::BinaryOutput,
            Self::BinaryValue => ObjectType::BinaryValue,
            Self::Device => ObjectType::Device,
            Self::Loop => ObjectType::Loop,
            Self::MultiStateValue => ObjectType::MultiStateValue,
            Self::AccessDoor => ObjectType::AccessDoor,
            Self::Timer => ObjectType::Timer,
            Self::NetworkSecurity => ObjectType::NetworkSecurity,
            Self::DatePatternValue => ObjectType::DatePatternValue,
            Self::LightingOutput => ObjectType::LightingOutput,
            Self::NetworkPort => ObjectType::NetworkPort,
            Self::Escalator => ObjectType::Escalator,
            Self::Lift => ObjectType::Lift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("odd number of hex digits")]
    OddLength,
    #[error("invalid hex digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

/// Parses hex text into bytes. Whitespace, `:` and `-` separators and an
/// optional `0x` prefix are ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let text = text.trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let mut digits = Vec::with_capacity(text.len());
    for (position, c) in text.char_indices() {
        if c.is_whitespace() || c == ':' || c == '-' {
            continue;
        }
        let value = c
            .to_digit(16)
            .ok_or(HexError::InvalidDigit { digit: c, position })?;
        digits.push(value as u8);
    }
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength);
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Formats bytes as space-separated upper-case hex.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{format_hex, parse_hex, HexError, ObjectTypeArg};
    use bacprop_core::types::ObjectType;

    #[test]
    fn parses_separated_hex() {
        assert_eq!(parse_hex("3e 44 42:28-00 00 3F").unwrap().len(), 7);
        assert_eq!(parse_hex("0x3E3F").unwrap(), [0x3E, 0x3F]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(parse_hex("3E3").unwrap_err(), HexError::OddLength);
        assert_eq!(
            parse_hex("3G").unwrap_err(),
            HexError::InvalidDigit {
                digit: 'G',
                position: 1
            }
        );
    }

    #[test]
    fn formats_hex() {
        assert_eq!(format_hex(&[0x3E, 0x0A, 0x3F]), "3E 0A 3F");
    }

    #[test]
    fn object_type_names_map() {
        assert_eq!(
            ObjectTypeArg::AccessDoor.into_object_type(),
            ObjectType::AccessDoor
        );
        assert_eq!(ObjectTypeArg::Lift.into_object_type().to_u16(), 59);
    }
}
