//! Multi-record text container for labeled telemetry bitstrings.
//!
//! A container is plain text: each entry is a `Bitstring {index}:` header
//! line followed by the hex payload and a blank separator line. Splitting
//! is purely textual — decoding payloads back into records is the caller's
//! job, keeping record-boundary logic decoupled from byte-level codec
//! details.

pub mod container;
pub mod error;

pub use container::{decode_many, encode_many, HEADER_TOKEN};
pub use error::{ContainerError, Result};
