//! The in-memory telemetry record.

use crate::fields::{COUNT_AXES, ENERGY_AXES, HV_AXES, NUM_CYCLES, QUALITY_AXES};
use crate::grid::Grid;

/// One complete telemetry record, the unit of exchange with the codec.
///
/// Dimension sizes are the schema constants; field order here matches the
/// wire order in [`crate::FIELDS`]. A record carries no identity of its
/// own — the container format assigns the external index.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    /// Cycle start instants, milliseconds since the Unix epoch (UTC).
    pub epochs: Vec<u64>,
    /// Electron counts over `[incident, azimuthal, energy, cycle]`.
    pub electron_counts: Grid<u16>,
    /// Background counts over `[incident, azimuthal, energy, cycle]`.
    pub bg_counts: Grid<u16>,
    /// Commanded energy per channel over `[energy, cycle]`, eV.
    pub measure_energy: Grid<f32>,
    /// Electrode voltages over `[electrode, energy, incident, cycle]`, volts.
    pub output_hv: Grid<f32>,
    /// Data-taking start instants, milliseconds since the Unix epoch (UTC).
    pub datataking_time_start: Vec<u64>,
    /// Data-taking duration per cycle, seconds.
    pub data_time_duration: Vec<f32>,
    /// Quality flags over `[energy, azimuthal, incident, cycle]`; 0 is good.
    pub data_quality: Grid<u8>,
}

impl TelemetryRecord {
    /// An all-zero record with schema-conformant shapes.
    pub fn zeroed() -> Self {
        Self {
            epochs: vec![0; NUM_CYCLES],
            electron_counts: Grid::zeroed(&COUNT_AXES),
            bg_counts: Grid::zeroed(&COUNT_AXES),
            measure_energy: Grid::zeroed(&ENERGY_AXES),
            output_hv: Grid::zeroed(&HV_AXES),
            datataking_time_start: vec![0; NUM_CYCLES],
            data_time_duration: vec![0.0; NUM_CYCLES],
            data_quality: Grid::zeroed(&QUALITY_AXES),
        }
    }

    /// Element count of each field in wire order, for shape validation.
    pub fn field_lens(&self) -> [(&'static str, usize); 8] {
        [
            ("epochs", self.epochs.len()),
            ("electron_counts", self.electron_counts.len()),
            ("bg_counts", self.bg_counts.len()),
            ("measure_energy", self.measure_energy.len()),
            ("output_hv", self.output_hv.len()),
            ("datataking_time_start", self.datataking_time_start.len()),
            ("data_time_duration", self.data_time_duration.len()),
            ("data_quality", self.data_quality.len()),
        ]
    }
}

impl Default for TelemetryRecord {
    fn default() -> Self {
        Self::zeroed()
    }
}
