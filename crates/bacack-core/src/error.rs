use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Field does not fit its wire representation (bit count, length, tag number).
    ValueOutOfRange,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange => f.write_str("value out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Reasons a frame could not be decoded.
///
/// Every variant aborts the whole decode. Value-level problems that leave the
/// tag stream intact (unknown application tags, unhandled character sets) are
/// not errors; they surface as [`PropertyValue::Unsupported`] instead.
///
/// [`PropertyValue::Unsupported`]: crate::types::PropertyValue::Unsupported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Odd number of hex digits or a character outside `[0-9a-fA-F]`.
    InvalidHex,
    /// A field declares more bytes than the input holds.
    TruncatedData,
    /// Self-contradictory tag header.
    InvalidTag,
    /// Payload size does not fit the type it is tagged with.
    InvalidValueLength,
    /// Opening and closing context tags do not pair up.
    UnbalancedTags,
    /// Header names a PDU, network message, or protocol version this decoder does not handle.
    UnsupportedEncoding,
    /// Nesting exceeded the configured depth limit.
    DepthLimitExceeded,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex => f.write_str("invalid hex input"),
            Self::TruncatedData => f.write_str("unexpected end of input"),
            Self::InvalidTag => f.write_str("invalid tag"),
            Self::InvalidValueLength => f.write_str("invalid value length"),
            Self::UnbalancedTags => f.write_str("unbalanced opening/closing tags"),
            Self::UnsupportedEncoding => f.write_str("unsupported encoding"),
            Self::DepthLimitExceeded => f.write_str("nesting depth limit exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

impl From<hex::FromHexError> for DecodeError {
    fn from(_: hex::FromHexError) -> Self {
        Self::InvalidHex
    }
}
