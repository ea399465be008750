use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

/// BACnet network layer protocol version (always `0x01`).
pub const NPDU_VERSION: u8 = 0x01;

const CONTROL_NETWORK_MESSAGE: u8 = 0x80;
const CONTROL_DESTINATION: u8 = 0x20;
const CONTROL_SOURCE: u8 = 0x08;
const CONTROL_EXPECTING_REPLY: u8 = 0x04;

/// Network number plus MAC address of a routed peer.
///
/// An empty `mac` on a destination means a broadcast on that network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpduAddress {
    pub network: u16,
    pub mac: Vec<u8>,
}

/// NPDU header preceding the APDU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npdu {
    pub control: u8,
    pub destination: Option<NpduAddress>,
    pub source: Option<NpduAddress>,
    pub hop_count: Option<u8>,
    pub message_type: Option<u8>,
    pub vendor_id: Option<u16>,
}

impl Npdu {
    pub const fn new(control: u8) -> Self {
        Self {
            control,
            destination: None,
            source: None,
            hop_count: None,
            message_type: None,
            vendor_id: None,
        }
    }

    pub const fn is_network_message(&self) -> bool {
        self.control & CONTROL_NETWORK_MESSAGE != 0
    }

    pub const fn expects_reply(&self) -> bool {
        self.control & CONTROL_EXPECTING_REPLY != 0
    }

    /// Network priority, 0 (normal) through 3 (life safety).
    pub const fn priority(&self) -> u8 {
        self.control & 0x03
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u8(NPDU_VERSION);
        w.write_u8(self.control);

        if let Some(dest) = &self.destination {
            encode_addr(w, dest)?;
        }
        if let Some(src) = &self.source {
            encode_addr(w, src)?;
        }
        if self.destination.is_some() {
            w.write_u8(self.hop_count.unwrap_or(255));
        }
        if self.is_network_message() {
            w.write_u8(self.message_type.unwrap_or(0));
            if matches!(self.message_type, Some(0x80..=0xFF)) {
                w.write_be_u16(self.vendor_id.unwrap_or(0));
            }
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let version = r.read_u8()?;
        if version != NPDU_VERSION {
            log::debug!("NPDU version {version} is not supported");
            return Err(DecodeError::UnsupportedEncoding);
        }

        let control = r.read_u8()?;
        let destination = if control & CONTROL_DESTINATION != 0 {
            Some(decode_addr(r)?)
        } else {
            None
        };
        let source = if control & CONTROL_SOURCE != 0 {
            Some(decode_addr(r)?)
        } else {
            None
        };
        let hop_count = if destination.is_some() {
            Some(r.read_u8()?)
        } else {
            None
        };

        let (message_type, vendor_id) = if control & CONTROL_NETWORK_MESSAGE != 0 {
            let mt = r.read_u8()?;
            let vid = if mt >= 0x80 {
                Some(r.read_be_u16()?)
            } else {
                None
            };
            (Some(mt), vid)
        } else {
            (None, None)
        };

        Ok(Self {
            control,
            destination,
            source,
            hop_count,
            message_type,
            vendor_id,
        })
    }
}

fn encode_addr(w: &mut Writer, addr: &NpduAddress) -> Result<(), EncodeError> {
    let mac_len = u8::try_from(addr.mac.len()).map_err(|_| EncodeError::ValueOutOfRange)?;
    w.write_be_u16(addr.network);
    w.write_u8(mac_len);
    w.write_all(&addr.mac);
    Ok(())
}

fn decode_addr(r: &mut Reader<'_>) -> Result<NpduAddress, DecodeError> {
    let network = r.read_be_u16()?;
    let mac_len = r.read_u8()?;
    let mac = r.read_exact(usize::from(mac_len))?.to_vec();
    Ok(NpduAddress { network, mac })
}
