use alloc::vec::Vec;

/// A BACnet bit string: the count of unused trailing bits in the last octet,
/// then the packed bits, most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString {
    pub unused_bits: u8,
    pub data: Vec<u8>,
}

impl BitString {
    pub fn new(unused_bits: u8, data: Vec<u8>) -> Self {
        Self { unused_bits, data }
    }

    /// Builds a bit string from individual bits, first bit first.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut data = Vec::with_capacity(bits.len().div_ceil(8));
        for chunk in bits.chunks(8) {
            let mut byte = 0u8;
            for (i, bit) in chunk.iter().enumerate() {
                if *bit {
                    byte |= 0x80 >> i;
                }
            }
            data.push(byte);
        }
        let unused_bits = ((8 - bits.len() % 8) % 8) as u8;
        Self { unused_bits, data }
    }

    /// Number of meaningful bits.
    pub fn len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused_bits as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len() {
            return None;
        }
        Some(self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::BitString;

    #[test]
    fn status_flags_bits() {
        // in-alarm, fault, overridden, out-of-service
        let flags = BitString::from_bits(&[false, true, false, false]);
        assert_eq!(flags.unused_bits, 4);
        assert_eq!(flags.data, [0x40]);
        assert_eq!(flags.len(), 4);
        assert_eq!(flags.bit(1), Some(true));
        assert_eq!(flags.bit(4), None);
    }

    #[test]
    fn empty_bit_string() {
        let empty = BitString::from_bits(&[]);
        assert!(empty.is_empty());
        assert!(empty.data.is_empty());
        assert_eq!(empty.unused_bits, 0);
    }
}
