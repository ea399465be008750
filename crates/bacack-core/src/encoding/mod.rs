/// Encode/decode functions for BACnet integer primitives and context helpers.
pub mod primitives;
/// Zero-copy byte reader for decoding BACnet frames.
pub mod reader;
/// BACnet tag system (application, context, opening/closing).
pub mod tag;
/// Growable byte writer used to build frames and re-encode values.
pub mod writer;
