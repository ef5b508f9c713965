//! Serde-friendly views of decoded and calibrated records.
//!
//! This is the archival boundary: downstream sinks take the record's named
//! fields by shape and value, so the export types carry explicit axis and
//! shape metadata next to flat wire-order values.

use espec_codec::decode_timestamp;
use espec_schema::Grid;
use espec_schema::TelemetryRecord;
use serde::Serialize;

use crate::calib::{correct_counts, energy_moments, Efficiency};

/// A grid flattened for serialization: axis names, dimension lengths, and
/// wire-order values.
#[derive(Debug, Serialize)]
pub struct GridExport<T> {
    pub axes: Vec<&'static str>,
    pub shape: Vec<usize>,
    pub values: Vec<T>,
}

impl<T: Copy> GridExport<T> {
    fn from_grid(grid: &Grid<T>) -> Self {
        Self {
            axes: grid.axes().iter().map(|a| a.name()).collect(),
            shape: grid.shape(),
            values: grid.values().to_vec(),
        }
    }
}

/// One per-cycle instant with its UTC calendar rendering.
///
/// `iso8601` is `None` when the raw count lies outside the calendar range;
/// the millisecond value is always preserved verbatim.
#[derive(Debug, Serialize)]
pub struct CycleInstant {
    pub cycle: usize,
    pub timestamp_ms: u64,
    pub iso8601: Option<String>,
}

fn cycle_instants(millis: &[u64]) -> Vec<CycleInstant> {
    millis
        .iter()
        .enumerate()
        .map(|(cycle, &timestamp_ms)| CycleInstant {
            cycle,
            timestamp_ms,
            iso8601: decode_timestamp(timestamp_ms).ok().map(|(_, iso)| iso),
        })
        .collect()
}

/// Full level-1 record view, one entry per container bitstring.
#[derive(Debug, Serialize)]
pub struct RecordExport {
    pub index: u64,
    pub epochs: Vec<CycleInstant>,
    pub electron_counts: GridExport<u16>,
    pub bg_counts: GridExport<u16>,
    pub measure_energy: GridExport<f32>,
    pub output_hv: GridExport<f32>,
    pub datataking_time_start: Vec<CycleInstant>,
    pub data_time_duration: Vec<f32>,
    pub data_quality: GridExport<u8>,
}

/// Build the level-1 view of a decoded record.
pub fn record_export(index: u64, record: &TelemetryRecord) -> RecordExport {
    RecordExport {
        index,
        epochs: cycle_instants(&record.epochs),
        electron_counts: GridExport::from_grid(&record.electron_counts),
        bg_counts: GridExport::from_grid(&record.bg_counts),
        measure_energy: GridExport::from_grid(&record.measure_energy),
        output_hv: GridExport::from_grid(&record.output_hv),
        datataking_time_start: cycle_instants(&record.datataking_time_start),
        data_time_duration: record.data_time_duration.clone(),
        data_quality: GridExport::from_grid(&record.data_quality),
    }
}

/// Calibrated level-2 view: angular moments plus the cycle time base.
#[derive(Debug, Serialize)]
pub struct Level2Export {
    pub index: u64,
    pub total_counts_per_energy: GridExport<f32>,
    pub mean_counts_per_energy: GridExport<f32>,
    pub epochs_ms: Vec<u64>,
    pub durations_s: Vec<f32>,
}

/// Calibrate a record and build its level-2 view.
pub fn level2_export(index: u64, record: &TelemetryRecord, efficiency: &Efficiency) -> Level2Export {
    let corrected = correct_counts(record, efficiency);
    let moments = energy_moments(&corrected);
    Level2Export {
        index,
        total_counts_per_energy: GridExport::from_grid(&moments.total),
        mean_counts_per_energy: GridExport::from_grid(&moments.mean),
        epochs_ms: record.datataking_time_start.clone(),
        durations_s: record.data_time_duration.clone(),
    }
}
