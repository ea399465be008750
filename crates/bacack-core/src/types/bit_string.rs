use alloc::vec::Vec;

/// BACnet bit string: payload bytes with the count of unused trailing bits in
/// the last byte. Bit 0 is the most significant bit of the first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString {
    pub unused_bits: u8,
    pub data: Vec<u8>,
}

impl BitString {
    pub fn new(unused_bits: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            unused_bits,
            data: data.into(),
        }
    }

    /// Number of meaningful bits.
    pub fn bit_count(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused_bits as usize)
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count() {
            return None;
        }
        let byte = self.data[index / 8];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count()).filter_map(|i| self.bit(i))
    }
}
