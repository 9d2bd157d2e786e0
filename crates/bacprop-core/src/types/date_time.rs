/// A BACnet date. `0xFF` in any field means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year_since_1900: u8,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

impl Date {
    pub const UNSPECIFIED: u8 = 0xFF;

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            year_since_1900: bytes[0],
            month: bytes[1],
            day: bytes[2],
            weekday: bytes[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.year_since_1900, self.month, self.day, self.weekday]
    }

    /// Calendar year, if specified.
    pub const fn year(self) -> Option<u16> {
        if self.year_since_1900 == Self::UNSPECIFIED {
            None
        } else {
            Some(1900 + self.year_since_1900 as u16)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

impl Time {
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            hour: bytes[0],
            minute: bytes[1],
            second: bytes[2],
            hundredths: bytes[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.hour, self.minute, self.second, self.hundredths]
    }
}
