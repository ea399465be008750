use crate::encoding::{reader::Reader, tag::Tag, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Minimal number of big-endian bytes needed for `value` (at least one).
pub fn unsigned_width(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Minimal number of two's-complement bytes that preserve the sign of `value`.
pub fn signed_width(value: i64) -> usize {
    (1..8)
        .find(|&len| {
            let shift = 64 - 8 * len as u32;
            (value << shift) >> shift == value
        })
        .unwrap_or(8)
}

pub fn encode_unsigned(w: &mut Writer, value: u64) -> usize {
    let len = unsigned_width(value);
    w.write_all(&value.to_be_bytes()[8 - len..]);
    len
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidValueLength);
    }
    let bytes = r.read_exact(len)?;
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
}

/// Unsigned field that the protocol caps at 32 bits (enumerations, property ids, indexes).
pub fn decode_unsigned32(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    if len > 4 {
        return Err(DecodeError::InvalidValueLength);
    }
    decode_unsigned(r, len).map(|v| v as u32)
}

pub fn encode_signed(w: &mut Writer, value: i64) -> usize {
    let len = signed_width(value);
    w.write_all(&value.to_be_bytes()[8 - len..]);
    len
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidValueLength);
    }

    let bytes = r.read_exact(len)?;
    let fill = if (bytes[0] & 0x80) != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 8];
    out[8 - len..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(out))
}

pub fn encode_ctx_unsigned(w: &mut Writer, tag_num: u8, value: u64) -> Result<(), EncodeError> {
    let len = unsigned_width(value);
    Tag::Context {
        tag_num,
        len: len as u32,
    }
    .encode(w)?;
    w.write_all(&value.to_be_bytes()[8 - len..]);
    Ok(())
}

pub fn encode_ctx_object_id(
    w: &mut Writer,
    tag_num: u8,
    object_id_raw: u32,
) -> Result<(), EncodeError> {
    Tag::Context { tag_num, len: 4 }.encode(w)?;
    w.write_be_u32(object_id_raw);
    Ok(())
}

pub fn encode_opening_tag(w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)
}

pub fn encode_closing_tag(w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Closing { tag_num }.encode(w)
}

#[cfg(test)]
mod tests {
    use super::{
        decode_signed, decode_unsigned, decode_unsigned32, encode_ctx_unsigned, encode_signed,
        encode_unsigned, signed_width, unsigned_width,
    };
    use crate::encoding::{reader::Reader, tag::Tag, writer::Writer};
    use crate::DecodeError;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unsigned_roundtrip(v in any::<u64>()) {
            let mut w = Writer::new();
            let len = encode_unsigned(&mut w, v);
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_unsigned(&mut r, len).unwrap(), v);
            prop_assert!(r.is_empty());
        }

        #[test]
        fn signed_roundtrip(v in any::<i64>()) {
            let mut w = Writer::new();
            let len = encode_signed(&mut w, v);
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_signed(&mut r, len).unwrap(), v);
        }
    }

    #[test]
    fn widths_are_minimal() {
        assert_eq!(unsigned_width(0), 1);
        assert_eq!(unsigned_width(0xFF), 1);
        assert_eq!(unsigned_width(0x100), 2);
        assert_eq!(unsigned_width(u64::MAX), 8);
        assert_eq!(signed_width(-128), 1);
        assert_eq!(signed_width(128), 2);
        assert_eq!(signed_width(-129), 2);
        assert_eq!(signed_width(i64::MIN), 8);
    }

    #[test]
    fn signed_sign_extends_from_declared_width() {
        let mut r = Reader::new(&[0xFF, 0x85]);
        assert_eq!(decode_signed(&mut r, 2).unwrap(), -123);
        let mut r = Reader::new(&[0x00, 0x85]);
        assert_eq!(decode_signed(&mut r, 2).unwrap(), 133);
    }

    #[test]
    fn zero_width_integers_are_rejected() {
        let mut r = Reader::new(&[]);
        assert_eq!(
            decode_unsigned(&mut r, 0).unwrap_err(),
            DecodeError::InvalidValueLength
        );
        assert_eq!(
            decode_signed(&mut r, 0).unwrap_err(),
            DecodeError::InvalidValueLength
        );
        let mut r = Reader::new(&[0; 5]);
        assert_eq!(
            decode_unsigned32(&mut r, 5).unwrap_err(),
            DecodeError::InvalidValueLength
        );
    }

    #[test]
    fn ctx_unsigned_uses_minimal_length() {
        let mut w = Writer::new();
        encode_ctx_unsigned(&mut w, 2, 121).unwrap();
        assert_eq!(w.as_written(), &[0x29, 0x79]);

        let mut r = Reader::new(w.as_written());
        match Tag::decode(&mut r).unwrap() {
            Tag::Context { tag_num: 2, len } => {
                assert_eq!(decode_unsigned32(&mut r, len as usize).unwrap(), 121);
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }
}
