//! Level-2 calibration: background subtraction, per-channel efficiency
//! correction, and the energy/cycle moments downstream plots consume.

use espec_schema::{
    Grid, TelemetryRecord, COUNT_AXES, ENERGY_AXES, NUM_AZIMUTHAL, NUM_CYCLES, NUM_ENERGY,
    NUM_INCIDENT,
};

/// Errors raised while building calibration inputs.
#[derive(Debug, thiserror::Error)]
pub enum CalibError {
    /// Efficiency tables need one strictly positive factor per energy channel.
    #[error("efficiency table needs {NUM_ENERGY} factors, got {0}")]
    WrongChannelCount(usize),

    /// A non-positive efficiency would divide counts by zero or flip signs.
    #[error("efficiency for channel {channel} must be positive, got {value}")]
    NonPositive { channel: usize, value: f32 },
}

/// Per-energy-channel detection efficiency, applied as a divisor.
#[derive(Debug, Clone, PartialEq)]
pub struct Efficiency {
    factors: [f32; NUM_ENERGY],
}

impl Efficiency {
    /// Unit efficiency: correction reduces to background subtraction.
    pub fn uniform() -> Self {
        Self {
            factors: [1.0; NUM_ENERGY],
        }
    }

    /// Build from one factor per energy channel.
    pub fn from_slice(factors: &[f32]) -> Result<Self, CalibError> {
        if factors.len() != NUM_ENERGY {
            return Err(CalibError::WrongChannelCount(factors.len()));
        }
        for (channel, &value) in factors.iter().enumerate() {
            if !(value > 0.0) {
                return Err(CalibError::NonPositive { channel, value });
            }
        }
        let mut table = [0.0; NUM_ENERGY];
        table.copy_from_slice(factors);
        Ok(Self { factors: table })
    }

    /// Factor for one energy channel.
    pub fn factor(&self, channel: usize) -> f32 {
        self.factors[channel]
    }
}

impl Default for Efficiency {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Background-subtract and efficiency-correct the electron counts.
///
/// Subtraction saturates at zero (background can statistically exceed
/// signal in a sparse bin); the result keeps the counts' axis order
/// `[incident, azimuthal, energy, cycle]`.
pub fn correct_counts(record: &TelemetryRecord, efficiency: &Efficiency) -> Grid<f32> {
    Grid::from_fn(&COUNT_AXES, |idx| {
        let counts = record.electron_counts.get(idx);
        let bg = record.bg_counts.get(idx);
        let net = counts.saturating_sub(bg);
        f32::from(net) / efficiency.factor(idx[2])
    })
}

/// Per-energy, per-cycle totals and means over the angular axes.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMoments {
    /// Sum over `[incident, azimuthal]`, shaped `[energy, cycle]`.
    pub total: Grid<f32>,
    /// Mean over `[incident, azimuthal]`, shaped `[energy, cycle]`.
    pub mean: Grid<f32>,
}

/// Collapse corrected counts onto the `[energy, cycle]` plane.
pub fn energy_moments(corrected: &Grid<f32>) -> EnergyMoments {
    let mut total: Grid<f32> = Grid::zeroed(&ENERGY_AXES);
    for i in 0..NUM_INCIDENT {
        for a in 0..NUM_AZIMUTHAL {
            for e in 0..NUM_ENERGY {
                for c in 0..NUM_CYCLES {
                    let sum = total.get(&[e, c]) + corrected.get(&[i, a, e, c]);
                    total.set(&[e, c], sum);
                }
            }
        }
    }
    let samples = (NUM_INCIDENT * NUM_AZIMUTHAL) as f32;
    let mean = Grid::from_fn(&ENERGY_AXES, |idx| total.get(idx) / samples);
    EnergyMoments { total, mean }
}
