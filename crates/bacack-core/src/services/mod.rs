pub mod layout;
pub mod value_codec;

pub const SERVICE_READ_PROPERTY: u8 = 0x0C;
pub const SERVICE_READ_PROPERTY_MULTIPLE: u8 = 0x0E;
pub const SERVICE_READ_RANGE: u8 = 0x1A;
