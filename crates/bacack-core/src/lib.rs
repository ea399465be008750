//! BACnet Complex-ACK decoding in pure Rust.
//!
//! `bacack-core` turns a captured BACnet/IP frame, given as a hex string, into
//! the object properties carried by a ReadProperty or ReadPropertyMultiple
//! acknowledgement. Decoding is a single synchronous pass over the bytes with
//! no I/O, and works without `std` as long as an allocator is available.
//!
//! ```
//! use bacack_core::Response;
//!
//! let ack = Response::decode("0100300c0c0c0200000a19553e4442f600003f").unwrap();
//! assert_eq!(ack.invoke_id(), 0x0c);
//! assert!(ack.property(85).is_some());
//! ```
//!
//! # Feature flags
//!
//! - **`std`** (default) — enables `std::error::Error` implementations.
//! - **`serde`** — derives `Serialize`/`Deserialize` on the decoded types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// APDU type discriminant, Complex-ACK header, and the property walker.
pub mod apdu;
/// BACnet/IP virtual link control header.
pub mod bvlc;
/// Binary encoding primitives, tag system, and zero-copy reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// NPDU (Network Protocol Data Unit) encoding and decoding.
pub mod npdu;
/// Top-level decoder facade.
pub mod response;
/// Per-service ACK layouts and the application value codec.
pub mod services;
/// Decoded data types: values, records, object identifiers, property names.
pub mod types;

pub use error::{DecodeError, EncodeError};
pub use response::{AckDecoder, Response};
