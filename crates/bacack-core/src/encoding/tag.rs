use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Application tag numbers with a globally fixed primitive type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    UnsignedInt = 2,
    SignedInt = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectId = 12,
}

impl AppTag {
    /// Returns `None` for the reserved numbers 13 and up.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::Boolean),
            2 => Some(Self::UnsignedInt),
            3 => Some(Self::SignedInt),
            4 => Some(Self::Real),
            5 => Some(Self::Double),
            6 => Some(Self::OctetString),
            7 => Some(Self::CharacterString),
            8 => Some(Self::BitString),
            9 => Some(Self::Enumerated),
            10 => Some(Self::Date),
            11 => Some(Self::Time),
            12 => Some(Self::ObjectId),
            _ => None,
        }
    }
}

/// One decoded tag header.
///
/// Application tags keep their raw number so that reserved types can still be
/// skipped by length. For the application Boolean, `len` is the value itself
/// (0 or 1) and no payload bytes follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag_num: u8, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

const CLASS_CONTEXT: u8 = 0b0000_1000;
const EXTENDED_TAG_NUM: u8 = 0x0F;
const LVT_EXTENDED_LEN: u8 = 5;
const LVT_OPENING: u8 = 6;
const LVT_CLOSING: u8 = 7;

impl Tag {
    pub const fn application(tag: AppTag, len: u32) -> Self {
        Tag::Application {
            tag_num: tag as u8,
            len,
        }
    }

    pub const fn tag_num(self) -> u8 {
        match self {
            Tag::Application { tag_num, .. }
            | Tag::Context { tag_num, .. }
            | Tag::Opening { tag_num }
            | Tag::Closing { tag_num } => tag_num,
        }
    }

    /// Number of payload bytes that follow the header.
    pub const fn payload_len(self) -> u32 {
        match self {
            Tag::Application { tag_num: 1, .. } => 0,
            Tag::Application { len, .. } | Tag::Context { len, .. } => len,
            Tag::Opening { .. } | Tag::Closing { .. } => 0,
        }
    }

    pub fn encode(self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Tag::Application { tag_num, len } => encode_with_meta(w, tag_num, false, len),
            Tag::Context { tag_num, len } => encode_with_meta(w, tag_num, true, len),
            Tag::Opening { tag_num } => encode_open_close(w, tag_num, LVT_OPENING),
            Tag::Closing { tag_num } => encode_open_close(w, tag_num, LVT_CLOSING),
        }
    }

    /// Decodes one tag header, leaving the reader at the first payload byte.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let class_context = (first & CLASS_CONTEXT) != 0;

        let mut tag_num = first >> 4;
        if tag_num == EXTENDED_TAG_NUM {
            tag_num = r.read_u8().map_err(|_| DecodeError::InvalidTag)?;
            if tag_num == 0xFF {
                return Err(DecodeError::InvalidTag);
            }
        }

        let len_val = first & 0x07;
        let tag = if class_context {
            match len_val {
                LVT_OPENING => Tag::Opening { tag_num },
                LVT_CLOSING => Tag::Closing { tag_num },
                _ => Tag::Context {
                    tag_num,
                    len: decode_len(r, len_val)?,
                },
            }
        } else if tag_num == AppTag::Boolean as u8 {
            if len_val > 1 {
                return Err(DecodeError::InvalidTag);
            }
            Tag::Application {
                tag_num,
                len: len_val as u32,
            }
        } else {
            if len_val > LVT_EXTENDED_LEN {
                return Err(DecodeError::InvalidTag);
            }
            Tag::Application {
                tag_num,
                len: decode_len(r, len_val)?,
            }
        };
        log::trace!("decoded {tag:?}");
        Ok(tag)
    }
}

fn first_octet(tag_num: u8, is_context: bool, len_val: u8) -> u8 {
    let mut first = if tag_num < EXTENDED_TAG_NUM {
        tag_num << 4
    } else {
        EXTENDED_TAG_NUM << 4
    };
    if is_context {
        first |= CLASS_CONTEXT;
    }
    first | len_val
}

fn encode_with_meta(
    w: &mut Writer,
    tag_num: u8,
    is_context: bool,
    len: u32,
) -> Result<(), EncodeError> {
    if tag_num == 0xFF {
        return Err(EncodeError::ValueOutOfRange);
    }
    let len_val = if len <= 4 { len as u8 } else { LVT_EXTENDED_LEN };
    w.write_u8(first_octet(tag_num, is_context, len_val));
    if tag_num >= EXTENDED_TAG_NUM {
        w.write_u8(tag_num);
    }

    if len_val == LVT_EXTENDED_LEN {
        if len <= 253 {
            w.write_u8(len as u8);
        } else if let Ok(short) = u16::try_from(len) {
            w.write_u8(254);
            w.write_be_u16(short);
        } else {
            w.write_u8(255);
            w.write_be_u32(len);
        }
    }
    Ok(())
}

fn encode_open_close(w: &mut Writer, tag_num: u8, len_val: u8) -> Result<(), EncodeError> {
    if tag_num == 0xFF {
        return Err(EncodeError::ValueOutOfRange);
    }
    w.write_u8(first_octet(tag_num, true, len_val));
    if tag_num >= EXTENDED_TAG_NUM {
        w.write_u8(tag_num);
    }
    Ok(())
}

fn decode_len(r: &mut Reader<'_>, len_val: u8) -> Result<u32, DecodeError> {
    match len_val {
        0..=4 => Ok(len_val as u32),
        LVT_EXTENDED_LEN => {
            let ext = |e: DecodeError| match e {
                DecodeError::TruncatedData => DecodeError::InvalidTag,
                other => other,
            };
            match r.read_u8().map_err(ext)? {
                254 => Ok(r.read_be_u16().map_err(ext)? as u32),
                255 => r.read_be_u32().map_err(ext),
                v => Ok(v as u32),
            }
        }
        _ => Err(DecodeError::InvalidTag),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppTag, Tag};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;

    fn decode_all(bytes: &[u8]) -> Result<(Tag, usize), DecodeError> {
        let mut r = Reader::new(bytes);
        let tag = Tag::decode(&mut r)?;
        Ok((tag, r.position()))
    }

    #[test]
    fn decodes_header_forms() {
        assert_eq!(
            decode_all(&[0x21, 0x23]).unwrap(),
            (Tag::application(AppTag::UnsignedInt, 1), 1)
        );
        assert_eq!(
            decode_all(&[0x29, 0x38]).unwrap(),
            (Tag::Context { tag_num: 2, len: 1 }, 1)
        );
        assert_eq!(decode_all(&[0x4E]).unwrap(), (Tag::Opening { tag_num: 4 }, 1));
        assert_eq!(decode_all(&[0x1F]).unwrap(), (Tag::Closing { tag_num: 1 }, 1));
    }

    #[test]
    fn decodes_extended_length_forms() {
        assert_eq!(
            decode_all(&[0x75, 0x0F]).unwrap(),
            (Tag::application(AppTag::CharacterString, 15), 2)
        );
        assert_eq!(
            decode_all(&[0x65, 0xFE, 0x01, 0x2C]).unwrap(),
            (Tag::application(AppTag::OctetString, 300), 4)
        );
        assert_eq!(
            decode_all(&[0x65, 0xFF, 0x00, 0x01, 0x00, 0x00]).unwrap(),
            (Tag::application(AppTag::OctetString, 65_536), 6)
        );
    }

    #[test]
    fn decodes_extended_tag_number() {
        assert_eq!(
            decode_all(&[0xF9, 0x2A, 0x07]).unwrap(),
            (Tag::Context { tag_num: 42, len: 1 }, 2)
        );
        assert_eq!(decode_all(&[0xFE, 0x10]).unwrap(), (Tag::Opening { tag_num: 16 }, 2));
        assert_eq!(decode_all(&[0xF9, 0xFF]).unwrap_err(), DecodeError::InvalidTag);
    }

    #[test]
    fn application_boolean_carries_value_in_header() {
        let (tag, consumed) = decode_all(&[0x11]).unwrap();
        assert_eq!(tag, Tag::application(AppTag::Boolean, 1));
        assert_eq!(tag.payload_len(), 0);
        assert_eq!(consumed, 1);
        assert_eq!(decode_all(&[0x12]).unwrap_err(), DecodeError::InvalidTag);
    }

    #[test]
    fn rejects_contradictory_headers() {
        // opening/closing markers on application class
        assert_eq!(decode_all(&[0x26]).unwrap_err(), DecodeError::InvalidTag);
        assert_eq!(decode_all(&[0x77]).unwrap_err(), DecodeError::InvalidTag);
        // truncated extended length / tag number
        assert_eq!(decode_all(&[0x75]).unwrap_err(), DecodeError::InvalidTag);
        assert_eq!(decode_all(&[0x65, 0xFE, 0x01]).unwrap_err(), DecodeError::InvalidTag);
        assert_eq!(decode_all(&[0xF8]).unwrap_err(), DecodeError::InvalidTag);
        assert_eq!(decode_all(&[]).unwrap_err(), DecodeError::TruncatedData);
    }

    #[test]
    fn encode_matches_decode_for_extended_forms() {
        let tags = [
            Tag::application(AppTag::UnsignedInt, 3),
            Tag::application(AppTag::Boolean, 0),
            Tag::Context {
                tag_num: 30,
                len: 300,
            },
            Tag::Context {
                tag_num: 14,
                len: 253,
            },
            Tag::application(AppTag::OctetString, 70_000),
            Tag::Opening { tag_num: 15 },
            Tag::Closing { tag_num: 200 },
        ];
        for tag in tags {
            let mut w = Writer::new();
            tag.encode(&mut w).unwrap();
            let mut r = Reader::new(w.as_written());
            assert_eq!(Tag::decode(&mut r).unwrap(), tag);
            assert!(r.is_empty());
        }
    }
}
