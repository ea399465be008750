use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::DecodeError;

const FLAG_SEGMENTED: u8 = 0b0000_1000;
const FLAG_MORE_FOLLOWS: u8 = 0b0000_0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexAckHeader {
    pub segmented: bool,
    pub more_follows: bool,
    pub invoke_id: u8,
    pub sequence_number: Option<u8>,
    pub proposed_window_size: Option<u8>,
    pub service_choice: u8,
}

impl ComplexAckHeader {
    /// Header of an unsegmented ACK.
    pub const fn new(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            segmented: false,
            more_follows: false,
            invoke_id,
            sequence_number: None,
            proposed_window_size: None,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer) {
        let mut b0 = (ApduType::ComplexAck as u8) << 4;
        if self.segmented {
            b0 |= FLAG_SEGMENTED;
        }
        if self.more_follows {
            b0 |= FLAG_MORE_FOLLOWS;
        }
        w.write_u8(b0);
        w.write_u8(self.invoke_id);
        if self.segmented {
            w.write_u8(self.sequence_number.unwrap_or(0));
            w.write_u8(self.proposed_window_size.unwrap_or(1));
        }
        w.write_u8(self.service_choice);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = r.read_u8()?;
        let apdu_type = ApduType::of_first_byte(b0);
        if apdu_type != Some(ApduType::ComplexAck) {
            log::debug!("APDU type {apdu_type:?} (first byte {b0:#04x}) is not a Complex-ACK");
            return Err(DecodeError::UnsupportedEncoding);
        }

        let segmented = (b0 & FLAG_SEGMENTED) != 0;
        let more_follows = (b0 & FLAG_MORE_FOLLOWS) != 0;
        let invoke_id = r.read_u8()?;
        let (sequence_number, proposed_window_size) = if segmented {
            (Some(r.read_u8()?), Some(r.read_u8()?))
        } else {
            (None, None)
        };
        let service_choice = r.read_u8()?;

        Ok(Self {
            segmented,
            more_follows,
            invoke_id,
            sequence_number,
            proposed_window_size,
            service_choice,
        })
    }
}
