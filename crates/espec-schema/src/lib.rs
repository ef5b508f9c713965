//! Schema definition and in-memory data model for particle-counting telemetry.
//!
//! This crate is the single source of truth for the record layout: the
//! dimension constants, the ordered field table (name, axis order, element
//! width, element kind), and the typed containers a decoded record lives in.
//! The encoder and decoder in `espec-codec` both read this table — nothing
//! else in the workspace is allowed to hardcode a dimension.
//!
//! All values are big-endian on the wire, packed contiguously with no
//! padding, in the field order given by [`FIELDS`].

pub mod fields;
pub mod grid;
pub mod record;

pub use fields::{
    field, Axis, ElementKind, FieldSpec, COUNT_AXES, CYCLE_AXES, ENERGY_AXES, FIELDS,
    HV_AXES, NUM_AZIMUTHAL, NUM_CYCLES, NUM_ELECTRODES, NUM_ENERGY, NUM_INCIDENT,
    QUALITY_AXES, RECORD_BYTE_LEN, RECORD_HEX_LEN,
};
pub use grid::Grid;
pub use record::TelemetryRecord;
