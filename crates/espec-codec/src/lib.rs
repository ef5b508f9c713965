//! Bitstring codec for particle-counting telemetry records.
//!
//! This is the core value-add layer of espec. One record serializes to a
//! fixed 206,820-byte big-endian buffer, exchanged as lowercase hex text:
//! - No padding, no alignment, no separators between fields or elements
//! - Field order and axis nesting come from `espec-schema`, never from
//!   local constants
//! - Encoding and decoding are pure functions; exact round trip is the
//!   contract every downstream consumer relies on
//!
//! Decoding tracks a single monotone cursor and fails loudly: underrun is
//! [`CodecError::TruncatedInput`], leftover bytes are [`CodecError::Integrity`].

pub mod decode;
pub mod encode;
pub mod error;
pub mod time;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{CodecError, Result};
pub use time::{decode_timestamp, encode_timestamp, iso8601};
pub use value::{pack_float, pack_uint, unpack_float, unpack_uint};
