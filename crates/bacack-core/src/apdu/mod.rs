/// Complex-ACK header.
pub mod complex_ack;
/// APDU type discriminant.
pub mod pdu;
/// Context-tag walker that turns an ACK body into property records.
pub mod walker;

pub use complex_ack::ComplexAckHeader;
pub use pdu::ApduType;
pub use walker::{walk_body, WalkOutput, DEFAULT_MAX_DEPTH};
