use crate::encoding::tag::AppTag;
use crate::types::{BitString, Date, ObjectId, Time};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Character set code leading every BACnet character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CharacterSet {
    /// ANSI X3.4, which BACnet now defines as UTF-8.
    Utf8 = 0,
    /// IBM/Microsoft DBCS.
    Dbcs = 1,
    JisX0208 = 2,
    /// UCS-4, big-endian.
    Ucs4 = 3,
    /// UCS-2, big-endian.
    Ucs2 = 4,
    Iso8859_1 = 5,
}

impl CharacterSet {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Utf8),
            1 => Some(Self::Dbcs),
            2 => Some(Self::JisX0208),
            3 => Some(Self::Ucs4),
            4 => Some(Self::Ucs2),
            5 => Some(Self::Iso8859_1),
            _ => None,
        }
    }
}

/// A decoded property value.
///
/// The first thirteen variants mirror the BACnet application tags. The rest
/// cover what a purely structural decoder can say about everything else.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Unsigned(u64),
    Signed(i64),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString { charset: CharacterSet, text: String },
    BitString(BitString),
    Enumerated(u32),
    Date(Date),
    Time(Time),
    ObjectId(ObjectId),
    /// Opening/closing context group nested inside a value.
    Constructed {
        tag_num: u8,
        values: Vec<PropertyValue>,
    },
    /// Context-tagged primitive inside a value; its type depends on the
    /// object model and is left undecoded.
    ContextTagged { tag_num: u8, data: Vec<u8> },
    /// Reserved application tag, or a character string in a set this decoder
    /// cannot convert. `data` is the whole payload window.
    Unsupported { tag_num: u8, data: Vec<u8> },
}

impl PropertyValue {
    /// UTF-8 character string shorthand.
    pub fn text(text: impl Into<String>) -> Self {
        Self::CharacterString {
            charset: CharacterSet::Utf8,
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::CharacterString { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Unsigned and enumerated values; both are plain integers on the wire.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            Self::Enumerated(v) => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(id) => Some(*id),
            _ => None,
        }
    }

    /// Application tag this value encodes under, if it is a primitive.
    pub const fn app_tag(&self) -> Option<AppTag> {
        match self {
            Self::Null => Some(AppTag::Null),
            Self::Boolean(_) => Some(AppTag::Boolean),
            Self::Unsigned(_) => Some(AppTag::UnsignedInt),
            Self::Signed(_) => Some(AppTag::SignedInt),
            Self::Real(_) => Some(AppTag::Real),
            Self::Double(_) => Some(AppTag::Double),
            Self::OctetString(_) => Some(AppTag::OctetString),
            Self::CharacterString { .. } => Some(AppTag::CharacterString),
            Self::BitString(_) => Some(AppTag::BitString),
            Self::Enumerated(_) => Some(AppTag::Enumerated),
            Self::Date(_) => Some(AppTag::Date),
            Self::Time(_) => Some(AppTag::Time),
            Self::ObjectId(_) => Some(AppTag::ObjectId),
            Self::Constructed { .. } | Self::ContextTagged { .. } | Self::Unsupported { .. } => {
                None
            }
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    for b in data {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Signed(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::OctetString(data) => {
                f.write_str("0x")?;
                write_hex(f, data)
            }
            Self::CharacterString { text, .. } => write!(f, "{text:?}"),
            Self::BitString(bits) => {
                f.write_str("{")?;
                for (i, bit) in bits.bits().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(if bit { "T" } else { "F" })?;
                }
                f.write_str("}")
            }
            Self::Enumerated(v) => write!(f, "enum({v})"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::ObjectId(id) => write!(f, "({id})"),
            Self::Constructed { tag_num, values } => {
                write!(f, "[{tag_num}]{{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
            Self::ContextTagged { tag_num, data } => {
                write!(f, "[{tag_num}]0x")?;
                write_hex(f, data)
            }
            Self::Unsupported { tag_num, data } => {
                write!(f, "unsupported(tag {tag_num}, 0x")?;
                write_hex(f, data)?;
                f.write_str(")")
            }
        }
    }
}
