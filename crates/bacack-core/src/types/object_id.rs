use crate::types::ObjectType;
use core::fmt;

/// A packed BACnet object identifier combining an [`ObjectType`] and a 22-bit
/// instance number into a single `u32`.
///
/// The upper 10 bits encode the object type and the lower 22 bits encode the
/// instance number, matching the BACnet wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

/// Highest instance number; also the "uninitialized" wildcard in requests.
pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

impl ObjectId {
    /// Creates an `ObjectId` from a type and instance number.
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self((((object_type.to_u16() as u32) & 0x03FF) << 22) | (instance & MAX_INSTANCE))
    }

    /// Returns the raw packed `u32` representation.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Constructs an `ObjectId` from a pre-packed `u32`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Decodes the 4-byte big-endian wire form.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Numeric object type from the upper 10 bits.
    pub const fn type_code(self) -> u16 {
        ((self.0 >> 22) & 0x03FF) as u16
    }

    pub const fn object_type(self) -> ObjectType {
        ObjectType::from_u16(self.type_code())
    }

    /// Extracts the 22-bit instance number.
    pub const fn instance(self) -> u32 {
        self.0 & MAX_INSTANCE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_type().name() {
            Some(name) => write!(f, "{name},{}", self.instance()),
            None => write!(f, "{},{}", self.type_code(), self.instance()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;
    use crate::types::ObjectType;
    use alloc::string::ToString;

    #[test]
    fn packs_type_and_instance() {
        let id = ObjectId::new(ObjectType::AnalogInput, 1);
        assert_eq!(id.object_type(), ObjectType::AnalogInput);
        assert_eq!(id.instance(), 1);
    }

    #[test]
    fn splits_wire_bytes() {
        let id = ObjectId::from_be_bytes([0x02, 0x00, 0x03, 0xE8]);
        assert_eq!(id.type_code(), 8);
        assert_eq!(id.object_type(), ObjectType::Device);
        assert_eq!(id.instance(), 1000);
        assert_eq!(id.to_string(), "device,1000");
        assert_eq!(ObjectId::from_raw(0x0200_03E8), id);
        assert_eq!(id.raw(), 0x0200_03E8);
    }

    #[test]
    fn vendor_types_display_numerically() {
        let id = ObjectId::new(ObjectType::Other(130), 7);
        assert_eq!(id.to_string(), "130,7");
    }
}
