use crate::apdu::{walk_body, ComplexAckHeader, DEFAULT_MAX_DEPTH};
use crate::bvlc::{BvlcHeader, BVLC_TYPE_BIP};
use crate::encoding::reader::Reader;
use crate::npdu::Npdu;
use crate::services::layout::{find_layout, AckLayout, EMPTY_LAYOUT, STANDARD_LAYOUTS};
use crate::types::{ObjectId, PropertyRecord, PropertyTable, PropertyValue};
use crate::DecodeError;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Decoder configuration.
///
/// ```
/// use bacack_core::AckDecoder;
///
/// let decoder = AckDecoder::default().with_max_depth(8);
/// assert!(decoder.decode("0100300c0c0c0200000a19553e4442f600003f").is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AckDecoder<'a> {
    layouts: &'a [AckLayout<'a>],
    max_depth: usize,
}

impl Default for AckDecoder<'static> {
    fn default() -> Self {
        Self {
            layouts: STANDARD_LAYOUTS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a> AckDecoder<'a> {
    /// Caps the combined nesting of structural and value groups.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the per-service layouts. Services missing from `layouts`
    /// decode with every context tag skipped.
    pub fn with_layouts<'b>(self, layouts: &'b [AckLayout<'b>]) -> AckDecoder<'b> {
        AckDecoder {
            layouts,
            max_depth: self.max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes a frame given as hex digits (either case, no separators).
    pub fn decode(&self, hex: &str) -> Result<Response, DecodeError> {
        let bytes = hex::decode(hex)?;
        self.decode_bytes(&bytes)
    }

    /// Decodes a frame starting at the BVLC header or directly at the NPDU.
    pub fn decode_bytes(&self, frame: &[u8]) -> Result<Response, DecodeError> {
        let (bvlc, mut r) = match frame.first() {
            Some(&BVLC_TYPE_BIP) => {
                let mut r = Reader::new(frame);
                let header = BvlcHeader::decode(&mut r)?;
                let end = usize::from(header.length);
                let bounded = frame.get(..end).ok_or(DecodeError::TruncatedData)?;
                if end < frame.len() {
                    log::debug!(
                        "ignoring {} bytes past the BVLC length",
                        frame.len() - end
                    );
                }
                let rest = bounded
                    .get(r.position()..)
                    .ok_or(DecodeError::TruncatedData)?;
                (Some(header), Reader::new(rest))
            }
            _ => (None, Reader::new(frame)),
        };

        let npdu = Npdu::decode(&mut r)?;
        if npdu.is_network_message() {
            log::debug!("network layer message {:?} carries no APDU", npdu.message_type);
            return Err(DecodeError::UnsupportedEncoding);
        }

        let raw_apdu = r.read_rest();
        let mut r = Reader::new(raw_apdu);
        let header = ComplexAckHeader::decode(&mut r)?;
        if header.segmented {
            log::debug!(
                "invoke id {} is segment {:?}, decoding it without reassembly",
                header.invoke_id,
                header.sequence_number
            );
        }

        let layout = find_layout(self.layouts, header.service_choice).unwrap_or_else(|| {
            log::debug!(
                "no layout for service choice {:#04x}, skipping context tags",
                header.service_choice
            );
            &EMPTY_LAYOUT
        });
        let walked = walk_body(r.read_rest(), layout, self.max_depth)?;
        log::debug!(
            "invoke id {} ({}): {} records, {} bare values",
            header.invoke_id,
            layout.name,
            walked.records.len(),
            walked.bare_values.len()
        );

        let mut properties = BTreeMap::new();
        for record in &walked.records {
            properties.insert(record.identifier, record.clone());
        }

        Ok(Response {
            bvlc,
            npdu,
            header,
            object_id: walked.object_id,
            properties,
            records: walked.records,
            bare_values: walked.bare_values,
            raw_apdu: raw_apdu.to_vec(),
        })
    }
}

/// A decoded Complex-ACK.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
    pub bvlc: Option<BvlcHeader>,
    pub npdu: Npdu,
    pub header: ComplexAckHeader,
    pub object_id: Option<ObjectId>,
    /// Latest record per property identifier.
    pub properties: BTreeMap<u32, PropertyRecord>,
    /// Every record in the order it appeared.
    pub records: Vec<PropertyRecord>,
    pub bare_values: Vec<PropertyValue>,
    pub raw_apdu: Vec<u8>,
}

impl Response {
    /// Decodes `hex` with the default configuration.
    pub fn decode(hex: &str) -> Result<Self, DecodeError> {
        AckDecoder::default().decode(hex)
    }

    pub fn invoke_id(&self) -> u8 {
        self.header.invoke_id
    }

    pub fn service_choice(&self) -> u8 {
        self.header.service_choice
    }

    pub fn is_segmented(&self) -> bool {
        self.header.segmented
    }

    pub fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }

    pub fn property(&self, identifier: u32) -> Option<&PropertyRecord> {
        self.properties.get(&identifier)
    }

    /// Looks a property up by name through `table`.
    pub fn property_named(&self, table: &PropertyTable<'_>, name: &str) -> Option<&PropertyRecord> {
        table.id(name).and_then(|id| self.property(id))
    }

    pub fn properties(&self) -> impl Iterator<Item = (u32, &PropertyRecord)> + '_ {
        self.properties.iter().map(|(id, record)| (*id, record))
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn bare_values(&self) -> &[PropertyValue] {
        &self.bare_values
    }

    pub fn raw_apdu(&self) -> &[u8] {
        &self.raw_apdu
    }
}

#[cfg(test)]
mod tests {
    use super::{AckDecoder, Response};
    use crate::services::layout::{AckLayout, ContextRole, RoleEntry};
    use crate::types::{ObjectType, PropertyValue, RecordValue, STANDARD_PROPERTIES};
    use crate::DecodeError;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    const DEVICE_INFO: &str = "810a0076010030160e0c020003e81e29384ea474080a034f29394eb404221e084f\
        29464e750f004d4143482d50726f576562436f6d4f293a4e71004f294d4e7509004d4143482d50726f4f\
        29784e21234f29794e751e0052656c6961626c6520436f6e74726f6c7320436f72706f726174696f6e4f1f";

    fn text_of(response: &Response, id: u32) -> Option<&str> {
        response.property(id)?.value.as_single()?.as_str()
    }

    #[test]
    fn decodes_device_information() {
        let response = Response::decode(DEVICE_INFO).unwrap();

        assert_eq!(response.invoke_id(), 0x16);
        assert_eq!(response.service_choice(), 0x0E);
        assert!(!response.is_segmented());
        let id = response.object_id().unwrap();
        assert_eq!(id.object_type(), ObjectType::Device);
        assert_eq!(id.instance(), 1000);

        assert_eq!(text_of(&response, 70), Some("MACH-ProWebCom"));
        assert_eq!(text_of(&response, 58), Some(""));
        assert_eq!(text_of(&response, 77), Some("MACH-Pro"));
        assert_eq!(text_of(&response, 121), Some("Reliable Controls Corporation"));
        assert_eq!(
            response.property(120).unwrap().value,
            RecordValue::Single(PropertyValue::Unsigned(35))
        );
        assert_eq!(
            response
                .property(56)
                .and_then(|r| r.value.as_single())
                .map(|v| alloc::format!("{v}")),
            Some(String::from("2016-08-10"))
        );
        assert_eq!(
            response
                .property_named(&STANDARD_PROPERTIES, "local-time")
                .and_then(|r| r.value.as_single())
                .map(|v| alloc::format!("{v}")),
            Some(String::from("04:34:30.08"))
        );
        assert_eq!(response.records().len(), 7);
        assert!(response.bare_values().is_empty());
        assert_eq!(response.raw_apdu()[..3], [0x30, 0x16, 0x0E]);
    }

    #[test]
    fn decoding_is_idempotent() {
        assert_eq!(Response::decode(DEVICE_INFO).unwrap(), Response::decode(DEVICE_INFO).unwrap());
        let upper = DEVICE_INFO.to_ascii_uppercase();
        assert_eq!(Response::decode(&upper).unwrap(), Response::decode(DEVICE_INFO).unwrap());
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert_eq!(Response::decode("0100300").unwrap_err(), DecodeError::InvalidHex);
        assert_eq!(Response::decode("01zz").unwrap_err(), DecodeError::InvalidHex);
        assert_eq!(Response::decode("").unwrap_err(), DecodeError::TruncatedData);
    }

    #[test]
    fn removing_the_final_closing_tag_unbalances() {
        let body = &DEVICE_INFO[8..DEVICE_INFO.len() - 2];
        // BVLC length would now overrun the data, so decode from the NPDU
        assert_eq!(Response::decode(body).unwrap_err(), DecodeError::UnbalancedTags);
    }

    #[test]
    fn bvlc_length_bounds_the_frame() {
        assert_eq!(
            Response::decode("810a00ff0100300c0c").unwrap_err(),
            DecodeError::TruncatedData
        );
        let trailing = "810a00140100300c0c0c0000000119553e21013fffff";
        let response = Response::decode(trailing).unwrap();
        assert_eq!(
            response.property(85).unwrap().value,
            RecordValue::Single(PropertyValue::Unsigned(1))
        );
    }

    #[test]
    fn rejects_non_ack_pdus_and_network_messages() {
        assert_eq!(
            Response::decode("0104000500010c").unwrap_err(),
            DecodeError::UnsupportedEncoding
        );
        assert_eq!(
            Response::decode("01800000").unwrap_err(),
            DecodeError::UnsupportedEncoding
        );
    }

    #[test]
    fn unknown_service_yields_no_properties() {
        let response = Response::decode("010030011f0c00000001").unwrap();
        assert_eq!(response.service_choice(), 0x1F);
        assert!(response.properties().next().is_none());
        assert!(response.object_id().is_none());
    }

    #[test]
    fn custom_layouts_and_depth() {
        static PRIVATE: &[AckLayout<'static>] = &[AckLayout {
            service_choice: 0x1F,
            name: "vendor-read",
            entries: &[
                RoleEntry::top(0, ContextRole::ObjectIdentifier),
                RoleEntry::top(1, ContextRole::PropertyIdentifier),
                RoleEntry::top(2, ContextRole::PropertyValue),
            ],
        }];
        let decoder = AckDecoder::default().with_layouts(PRIVATE);
        let response = decoder.decode("010030011f0c00000001195d2e21042f").unwrap();
        assert_eq!(
            response.property(93).unwrap().value,
            RecordValue::Single(PropertyValue::Unsigned(4))
        );

        let shallow = AckDecoder::default().with_max_depth(0);
        assert_eq!(shallow.max_depth(), 0);
        assert_eq!(
            shallow
                .decode("0100300c0c0c0200000a19553e4442f600003f")
                .unwrap_err(),
            DecodeError::DepthLimitExceeded
        );
    }

    #[test]
    fn last_record_wins_in_the_property_map() {
        let response =
            Response::decode("010030010e0c000000011e29554e21014f29554e21024f1f").unwrap();
        assert_eq!(response.records().len(), 2);
        assert_eq!(
            response.property(85).unwrap().value,
            RecordValue::Single(PropertyValue::Unsigned(2))
        );
    }

    proptest! {
        #[test]
        fn well_formed_hex_never_reports_invalid_hex(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
            let hex = hex::encode(&bytes);
            let decoded = Response::decode(&hex);
            prop_assert!(decoded != Err(DecodeError::InvalidHex));
        }

        #[test]
        fn odd_length_hex_is_invalid(
            bytes in proptest::collection::vec(any::<u8>(), 1..96),
            at in any::<usize>(),
        ) {
            let mut hex = hex::encode(&bytes);
            hex.remove(at % hex.len());
            prop_assert_eq!(Response::decode(&hex), Err(DecodeError::InvalidHex));
        }

        #[test]
        fn non_hex_digits_are_invalid(
            bytes in proptest::collection::vec(any::<u8>(), 1..96),
            at in any::<usize>(),
            bad in prop::sample::select(vec!['g', 'x', 'Z', ' ', '-', ':', '#', '\u{e9}']),
        ) {
            let hex = hex::encode(&bytes);
            let at = at % hex.len();
            let spliced: String = hex
                .chars()
                .enumerate()
                .map(|(i, c)| if i == at { bad } else { c })
                .collect();
            prop_assert_eq!(Response::decode(&spliced), Err(DecodeError::InvalidHex));
        }

        #[test]
        fn mutated_frames_never_panic(
            flips in proptest::collection::vec((0usize..118, any::<u8>()), 1..6),
        ) {
            let mut bytes: Vec<u8> = hex::decode(DEVICE_INFO).unwrap();
            for (at, value) in flips {
                bytes[at] = value;
            }
            let _ = AckDecoder::default().decode_bytes(&bytes);
        }
    }
}
