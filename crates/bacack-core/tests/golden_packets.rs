use bacack_core::apdu::ComplexAckHeader;
use bacack_core::bvlc::{BvlcFunction, BvlcHeader};
use bacack_core::encoding::primitives::{
    encode_closing_tag, encode_ctx_object_id, encode_ctx_unsigned, encode_opening_tag,
};
use bacack_core::encoding::writer::Writer;
use bacack_core::npdu::{Npdu, NpduAddress};
use bacack_core::services::value_codec::encode_property_value;
use bacack_core::services::{SERVICE_READ_PROPERTY, SERVICE_READ_PROPERTY_MULTIPLE};
use bacack_core::types::{
    BitString, CharacterSet, ObjectId, ObjectType, PropertyValue, RecordValue,
};
use bacack_core::{AckDecoder, DecodeError};

fn with_bvlc(payload: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    BvlcHeader {
        function: BvlcFunction::OriginalUnicastNpdu,
        length: (payload.len() + 4) as u16,
        forwarded_from: None,
    }
    .encode(&mut w);
    w.write_all(payload);
    w.into_bytes()
}

fn read_property_ack(object_id: ObjectId, property: u64, values: &[PropertyValue]) -> Vec<u8> {
    let mut w = Writer::new();
    Npdu::new(0).encode(&mut w).unwrap();
    ComplexAckHeader::new(0x42, SERVICE_READ_PROPERTY).encode(&mut w);
    encode_ctx_object_id(&mut w, 0, object_id.raw()).unwrap();
    encode_ctx_unsigned(&mut w, 1, property).unwrap();
    encode_opening_tag(&mut w, 3).unwrap();
    for value in values {
        encode_property_value(&mut w, value).unwrap();
    }
    encode_closing_tag(&mut w, 3).unwrap();
    w.into_bytes()
}

#[test]
fn read_property_ack_frame_matches_fixture() {
    let frame = read_property_ack(
        ObjectId::new(ObjectType::AnalogInput, 1),
        85,
        &[PropertyValue::Real(123.0)],
    );
    assert_eq!(
        frame,
        &[
            0x01, 0x00, 0x30, 0x42, 0x0C, 0x0C, 0x00, 0x00, 0x00, 0x01, 0x19, 0x55, 0x3E, 0x44,
            0x42, 0xF6, 0x00, 0x00, 0x3F,
        ]
    );

    let response = AckDecoder::default().decode_bytes(&with_bvlc(&frame)).unwrap();
    assert_eq!(response.invoke_id(), 0x42);
    assert_eq!(
        response.property(85).unwrap().value,
        RecordValue::Single(PropertyValue::Real(123.0))
    );
    assert_eq!(response.raw_apdu(), &frame[2..]);
}

#[test]
fn every_value_type_survives_a_frame() {
    let values = [
        PropertyValue::Null,
        PropertyValue::Boolean(true),
        PropertyValue::Unsigned(70_000),
        PropertyValue::Signed(-2),
        PropertyValue::Real(-1.5),
        PropertyValue::Double(6.02e23),
        PropertyValue::OctetString(vec![0xDE, 0xAD]),
        PropertyValue::CharacterString {
            charset: CharacterSet::Ucs2,
            text: "Kühlung".into(),
        },
        PropertyValue::BitString(BitString::new(4, [0b1000_0000])),
        PropertyValue::Enumerated(3),
        PropertyValue::Date(bacack_core::types::Date::from_bytes([124, 12, 31, 2])),
        PropertyValue::Time(bacack_core::types::Time::from_bytes([23, 59, 59, 99])),
        PropertyValue::ObjectId(ObjectId::new(ObjectType::Schedule, 4)),
        PropertyValue::Constructed {
            tag_num: 0,
            values: vec![PropertyValue::Unsigned(1), PropertyValue::text("x")],
        },
    ];
    let frame = read_property_ack(ObjectId::new(ObjectType::Device, 9), 512, &values);
    let response = AckDecoder::default().decode_bytes(&frame).unwrap();
    assert_eq!(response.property(512).unwrap().value, RecordValue::Array(values.to_vec()));
}

#[test]
fn routed_multiple_ack_with_two_objects() {
    let mut w = Writer::new();
    let mut npdu = Npdu::new(0x08);
    npdu.source = Some(NpduAddress {
        network: 2001,
        mac: vec![0x11],
    });
    npdu.encode(&mut w).unwrap();
    ComplexAckHeader::new(3, SERVICE_READ_PROPERTY_MULTIPLE).encode(&mut w);
    for (instance, name) in [(1u32, "AI-1"), (2, "AI-2")] {
        encode_ctx_object_id(&mut w, 0, ObjectId::new(ObjectType::AnalogInput, instance).raw())
            .unwrap();
        encode_opening_tag(&mut w, 1).unwrap();
        encode_ctx_unsigned(&mut w, 2, 77).unwrap();
        encode_opening_tag(&mut w, 4).unwrap();
        encode_property_value(&mut w, &PropertyValue::text(name)).unwrap();
        encode_closing_tag(&mut w, 4).unwrap();
        encode_closing_tag(&mut w, 1).unwrap();
    }

    let response = AckDecoder::default()
        .decode_bytes(&with_bvlc(w.as_written()))
        .unwrap();
    assert_eq!(response.npdu.source.as_ref().map(|s| s.network), Some(2001));
    assert_eq!(response.records().len(), 2);
    assert_eq!(
        response.records()[0].object_id,
        Some(ObjectId::new(ObjectType::AnalogInput, 1))
    );
    // the map keeps the later record for the shared property identifier
    let latest = response.property(77).unwrap();
    assert_eq!(latest.object_id.map(|id| id.instance()), Some(2));
    assert_eq!(latest.value.as_single().and_then(PropertyValue::as_str), Some("AI-2"));
}

#[test]
fn truncated_frames_fail_cleanly() {
    let frame = read_property_ack(
        ObjectId::new(ObjectType::AnalogInput, 1),
        85,
        &[PropertyValue::Real(123.0)],
    );
    for cut in 0..frame.len() {
        match AckDecoder::default().decode_bytes(&frame[..cut]) {
            // cut between complete fields, before the value arrived
            Ok(response) => assert!(response.property(85).is_none(), "cut at {cut}"),
            Err(err) => assert!(
                matches!(err, DecodeError::TruncatedData | DecodeError::UnbalancedTags),
                "cut at {cut} gave {err:?}"
            ),
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn response_serializes_to_json() {
    let frame = read_property_ack(
        ObjectId::new(ObjectType::BinaryValue, 7),
        85,
        &[PropertyValue::Enumerated(1)],
    );
    let response = AckDecoder::default().decode_bytes(&frame).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["header"]["invoke_id"], 0x42);
    assert_eq!(
        json["properties"]["85"]["value"]["Single"]["Enumerated"],
        serde_json::json!(1)
    );

    let back: bacack_core::Response = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}
