use crate::encoding::{
    primitives::{decode_signed, decode_unsigned, decode_unsigned32, signed_width, unsigned_width},
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::{BitString, CharacterSet, Date, ObjectId, PropertyValue, Time};
use crate::{DecodeError, EncodeError};
use alloc::string::String;
use alloc::vec::Vec;

fn u32_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange)
}

fn fixed<const N: usize>(window: &[u8]) -> Result<[u8; N], DecodeError> {
    window
        .try_into()
        .map_err(|_| DecodeError::InvalidValueLength)
}

/// Decodes the payload window of an application tag.
///
/// `window` must be exactly the bytes the tag header declared. Reserved tag
/// numbers are not an error; they come back as
/// [`PropertyValue::Unsupported`] holding the raw window.
pub fn decode_value(tag_num: u8, window: &[u8]) -> Result<PropertyValue, DecodeError> {
    let Some(tag) = AppTag::from_u8(tag_num) else {
        log::warn!(
            "application tag {tag_num} is not implemented, keeping {} raw bytes",
            window.len()
        );
        return Ok(PropertyValue::Unsupported {
            tag_num,
            data: window.to_vec(),
        });
    };

    let mut r = Reader::new(window);
    let value = match tag {
        AppTag::Null if window.is_empty() => PropertyValue::Null,
        AppTag::Null => return Err(DecodeError::InvalidValueLength),
        AppTag::Boolean => match window {
            [] => PropertyValue::Boolean(false),
            [b] => PropertyValue::Boolean(*b != 0),
            _ => return Err(DecodeError::InvalidValueLength),
        },
        AppTag::UnsignedInt => PropertyValue::Unsigned(decode_unsigned(&mut r, window.len())?),
        AppTag::SignedInt => PropertyValue::Signed(decode_signed(&mut r, window.len())?),
        AppTag::Real => PropertyValue::Real(f32::from_be_bytes(fixed(window)?)),
        AppTag::Double => PropertyValue::Double(f64::from_be_bytes(fixed(window)?)),
        AppTag::OctetString => PropertyValue::OctetString(window.to_vec()),
        AppTag::CharacterString => decode_character_string(window)?,
        AppTag::BitString => decode_bit_string(window)?,
        AppTag::Enumerated => PropertyValue::Enumerated(decode_unsigned32(&mut r, window.len())?),
        AppTag::Date => PropertyValue::Date(Date::from_bytes(fixed(window)?)),
        AppTag::Time => PropertyValue::Time(Time::from_bytes(fixed(window)?)),
        AppTag::ObjectId => PropertyValue::ObjectId(ObjectId::from_be_bytes(fixed(window)?)),
    };
    Ok(value)
}

/// Reads the payload of an application tag whose header was just decoded.
///
/// The application Boolean has no payload; its value is the header's
/// length field.
pub fn decode_application_value(
    r: &mut Reader<'_>,
    tag_num: u8,
    len: u32,
) -> Result<PropertyValue, DecodeError> {
    if tag_num == AppTag::Boolean as u8 {
        return Ok(PropertyValue::Boolean(len != 0));
    }
    let window = r.read_window(len)?;
    decode_value(tag_num, window)
}

/// Decodes one complete application-tagged value (header and payload).
pub fn decode_tagged_value(r: &mut Reader<'_>) -> Result<PropertyValue, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application { tag_num, len } => decode_application_value(r, tag_num, len),
        _ => Err(DecodeError::InvalidTag),
    }
}

fn decode_character_string(window: &[u8]) -> Result<PropertyValue, DecodeError> {
    let (&code, body) = window
        .split_first()
        .ok_or(DecodeError::InvalidValueLength)?;

    let decoded = CharacterSet::from_u8(code)
        .and_then(|charset| decode_text(charset, body).map(|text| (charset, text)));
    match decoded {
        Some((charset, text)) => Ok(PropertyValue::CharacterString { charset, text }),
        None => {
            log::warn!("character set {code} is not implemented, keeping raw string bytes");
            Ok(PropertyValue::Unsupported {
                tag_num: AppTag::CharacterString as u8,
                data: window.to_vec(),
            })
        }
    }
}

fn decode_text(charset: CharacterSet, body: &[u8]) -> Option<String> {
    match charset {
        CharacterSet::Utf8 => Some(String::from_utf8_lossy(body).into_owned()),
        CharacterSet::Ucs2 if body.len() % 2 == 0 => Some(
            char::decode_utf16(
                body.chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
            )
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
        ),
        CharacterSet::Ucs4 if body.len() % 4 == 0 => Some(
            body.chunks_exact(4)
                .map(|quad| {
                    char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]))
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect(),
        ),
        CharacterSet::Iso8859_1 => Some(body.iter().map(|&b| b as char).collect()),
        CharacterSet::JisX0208 => Some(
            encoding_rs::SHIFT_JIS
                .decode_without_bom_handling(body)
                .0
                .into_owned(),
        ),
        _ => None,
    }
}

fn decode_bit_string(window: &[u8]) -> Result<PropertyValue, DecodeError> {
    let (&unused_bits, data) = window
        .split_first()
        .ok_or(DecodeError::InvalidValueLength)?;
    if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
        return Err(DecodeError::InvalidValueLength);
    }
    Ok(PropertyValue::BitString(BitString::new(unused_bits, data)))
}

/// Writes `value` back to its tag and payload bytes.
///
/// Raw variants are re-emitted under the tag number they were decoded from.
pub fn encode_property_value(w: &mut Writer, value: &PropertyValue) -> Result<(), EncodeError> {
    match value {
        PropertyValue::Null => Tag::application(AppTag::Null, 0).encode(w),
        PropertyValue::Boolean(v) => Tag::application(AppTag::Boolean, *v as u32).encode(w),
        PropertyValue::Unsigned(v) => {
            let bytes = v.to_be_bytes();
            encode_app_payload(w, AppTag::UnsignedInt, &bytes[8 - unsigned_width(*v)..])
        }
        PropertyValue::Signed(v) => {
            let bytes = v.to_be_bytes();
            encode_app_payload(w, AppTag::SignedInt, &bytes[8 - signed_width(*v)..])
        }
        PropertyValue::Real(v) => encode_app_payload(w, AppTag::Real, &v.to_be_bytes()),
        PropertyValue::Double(v) => encode_app_payload(w, AppTag::Double, &v.to_be_bytes()),
        PropertyValue::OctetString(data) => encode_app_payload(w, AppTag::OctetString, data),
        PropertyValue::CharacterString { charset, text } => {
            let mut body = Vec::with_capacity(text.len() + 1);
            body.push(*charset as u8);
            encode_text(*charset, text, &mut body)?;
            encode_app_payload(w, AppTag::CharacterString, &body)
        }
        PropertyValue::BitString(bits) => {
            if bits.unused_bits > 7 {
                return Err(EncodeError::ValueOutOfRange);
            }
            let mut body = Vec::with_capacity(bits.data.len() + 1);
            body.push(bits.unused_bits);
            body.extend_from_slice(&bits.data);
            encode_app_payload(w, AppTag::BitString, &body)
        }
        PropertyValue::Enumerated(v) => {
            let v = *v as u64;
            let bytes = v.to_be_bytes();
            encode_app_payload(w, AppTag::Enumerated, &bytes[8 - unsigned_width(v)..])
        }
        PropertyValue::Date(d) => encode_app_payload(w, AppTag::Date, &d.to_bytes()),
        PropertyValue::Time(t) => encode_app_payload(w, AppTag::Time, &t.to_bytes()),
        PropertyValue::ObjectId(id) => {
            encode_app_payload(w, AppTag::ObjectId, &id.raw().to_be_bytes())
        }
        PropertyValue::Constructed { tag_num, values } => {
            Tag::Opening { tag_num: *tag_num }.encode(w)?;
            for child in values {
                encode_property_value(w, child)?;
            }
            Tag::Closing { tag_num: *tag_num }.encode(w)
        }
        PropertyValue::ContextTagged { tag_num, data } => {
            Tag::Context {
                tag_num: *tag_num,
                len: u32_len(data.len())?,
            }
            .encode(w)?;
            w.write_all(data);
            Ok(())
        }
        PropertyValue::Unsupported { tag_num, data } => {
            Tag::Application {
                tag_num: *tag_num,
                len: u32_len(data.len())?,
            }
            .encode(w)?;
            w.write_all(data);
            Ok(())
        }
    }
}

fn encode_app_payload(w: &mut Writer, tag: AppTag, payload: &[u8]) -> Result<(), EncodeError> {
    Tag::application(tag, u32_len(payload.len())?).encode(w)?;
    w.write_all(payload);
    Ok(())
}

fn encode_text(charset: CharacterSet, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match charset {
        CharacterSet::Utf8 => out.extend_from_slice(text.as_bytes()),
        CharacterSet::Ucs2 => {
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
        CharacterSet::Ucs4 => {
            for c in text.chars() {
                out.extend_from_slice(&(c as u32).to_be_bytes());
            }
        }
        CharacterSet::Iso8859_1 => {
            for c in text.chars() {
                let b = u8::try_from(c as u32).map_err(|_| EncodeError::ValueOutOfRange)?;
                out.push(b);
            }
        }
        CharacterSet::JisX0208 => {
            let (bytes, _, unmappable) = encoding_rs::SHIFT_JIS.encode(text);
            if unmappable {
                return Err(EncodeError::ValueOutOfRange);
            }
            out.extend_from_slice(&bytes);
        }
        CharacterSet::Dbcs => return Err(EncodeError::ValueOutOfRange),
    }
    Ok(())
}
