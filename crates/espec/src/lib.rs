//! Particle-counting telemetry toolkit.
//!
//! espec encodes and decodes fixed-schema telemetry records for a
//! particle-counting instrument as big-endian hex bitstrings, batches them
//! in a labeled text container, and ships the surrounding tooling:
//! synthetic record generation, level-2 calibration, and JSON export.
//!
//! # Crate Structure
//!
//! - [`schema`] — Dimension constants, field layout table, record model
//! - [`codec`] — Bitstring encoder/decoder, scalar and timestamp packing
//! - [`container`] — Multi-record `Bitstring N:` text format
//! - [`gen`] — Synthetic telemetry generator
//! - [`calib`] — Background subtraction, efficiency correction, moments
//! - [`export`] — Serde-friendly record and level-2 views

/// Re-export schema types.
pub mod schema {
    pub use espec_schema::*;
}

/// Re-export codec types.
pub mod codec {
    pub use espec_codec::*;
}

/// Re-export container types.
pub mod container {
    pub use espec_container::*;
}

pub mod calib;
pub mod export;
pub mod gen;
