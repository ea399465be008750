use crate::encoding::{reader::Reader, writer::Writer};
use crate::DecodeError;

pub const BVLC_TYPE_BIP: u8 = 0x81;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BvlcFunction {
    Result,
    WriteBroadcastDistributionTable,
    ReadBroadcastDistributionTable,
    ReadBroadcastDistributionTableAck,
    ForwardedNpdu,
    RegisterForeignDevice,
    ReadForeignDeviceTable,
    ReadForeignDeviceTableAck,
    DeleteForeignDeviceTableEntry,
    DistributeBroadcastToNetwork,
    OriginalUnicastNpdu,
    OriginalBroadcastNpdu,
    Unknown(u8),
}

impl BvlcFunction {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Result,
            0x01 => Self::WriteBroadcastDistributionTable,
            0x02 => Self::ReadBroadcastDistributionTable,
            0x03 => Self::ReadBroadcastDistributionTableAck,
            0x04 => Self::ForwardedNpdu,
            0x05 => Self::RegisterForeignDevice,
            0x06 => Self::ReadForeignDeviceTable,
            0x07 => Self::ReadForeignDeviceTableAck,
            0x08 => Self::DeleteForeignDeviceTableEntry,
            0x09 => Self::DistributeBroadcastToNetwork,
            0x0A => Self::OriginalUnicastNpdu,
            0x0B => Self::OriginalBroadcastNpdu,
            v => Self::Unknown(v),
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Result => 0x00,
            Self::WriteBroadcastDistributionTable => 0x01,
            Self::ReadBroadcastDistributionTable => 0x02,
            Self::ReadBroadcastDistributionTableAck => 0x03,
            Self::ForwardedNpdu => 0x04,
            Self::RegisterForeignDevice => 0x05,
            Self::ReadForeignDeviceTable => 0x06,
            Self::ReadForeignDeviceTableAck => 0x07,
            Self::DeleteForeignDeviceTableEntry => 0x08,
            Self::DistributeBroadcastToNetwork => 0x09,
            Self::OriginalUnicastNpdu => 0x0A,
            Self::OriginalBroadcastNpdu => 0x0B,
            Self::Unknown(v) => v,
        }
    }

    /// Whether an NPDU follows the header for this function.
    pub const fn carries_npdu(self) -> bool {
        matches!(
            self,
            Self::ForwardedNpdu
                | Self::DistributeBroadcastToNetwork
                | Self::OriginalUnicastNpdu
                | Self::OriginalBroadcastNpdu
        )
    }
}

/// BACnet/IP virtual link header in front of the NPDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BvlcHeader {
    pub function: BvlcFunction,
    /// Total frame length, header included.
    pub length: u16,
    /// B/IP address (IPv4 plus port) of the original sender of a forwarded NPDU.
    pub forwarded_from: Option<[u8; 6]>,
}

impl BvlcHeader {
    pub fn encoded_len(&self) -> usize {
        if self.forwarded_from.is_some() {
            10
        } else {
            4
        }
    }

    pub fn encode(&self, w: &mut Writer) {
        w.write_u8(BVLC_TYPE_BIP);
        w.write_u8(self.function.to_u8());
        w.write_be_u16(self.length);
        if let Some(addr) = &self.forwarded_from {
            w.write_all(addr);
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        if r.read_u8()? != BVLC_TYPE_BIP {
            return Err(DecodeError::UnsupportedEncoding);
        }
        let function = BvlcFunction::from_u8(r.read_u8()?);
        let length = r.read_be_u16()?;
        if !function.carries_npdu() {
            log::debug!("BVLC function {function:?} does not carry an NPDU");
            return Err(DecodeError::UnsupportedEncoding);
        }
        let forwarded_from = match function {
            BvlcFunction::ForwardedNpdu => {
                let mut addr = [0u8; 6];
                addr.copy_from_slice(r.read_exact(6)?);
                Some(addr)
            }
            _ => None,
        };
        let header = Self {
            function,
            length,
            forwarded_from,
        };
        if usize::from(length) < header.encoded_len() {
            return Err(DecodeError::TruncatedData);
        }
        Ok(header)
    }
}
