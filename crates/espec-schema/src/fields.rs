//! Dimension constants and the ordered field layout table.

use serde::Serialize;

/// Number of discrete particle-energy bins.
pub const NUM_ENERGY: usize = 16;

/// Number of azimuthal (horizontal) field-of-view angles.
pub const NUM_AZIMUTHAL: usize = 7;

/// Number of incident (polar) field-of-view angles.
pub const NUM_INCIDENT: usize = 6;

/// Number of repeated data-taking intervals per record.
pub const NUM_CYCLES: usize = 45;

/// Number of voltage-controlling electrodes.
pub const NUM_ELECTRODES: usize = 3;

/// One dimension of the instrument's measurement space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Energy,
    Azimuthal,
    Incident,
    Cycle,
    Electrode,
}

impl Axis {
    /// Dimension length of this axis.
    pub const fn len(self) -> usize {
        match self {
            Axis::Energy => NUM_ENERGY,
            Axis::Azimuthal => NUM_AZIMUTHAL,
            Axis::Incident => NUM_INCIDENT,
            Axis::Cycle => NUM_CYCLES,
            Axis::Electrode => NUM_ELECTRODES,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::Energy => "energy",
            Axis::Azimuthal => "azimuthal",
            Axis::Incident => "incident",
            Axis::Cycle => "cycle",
            Axis::Electrode => "electrode",
        }
    }
}

/// Numeric kind of a packed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Unsigned integer, widths 1/2/4/8.
    Uint,
    /// IEEE-754 float, widths 4/8.
    Float,
}

/// Axis order of the count grids: `[incident, azimuthal, energy, cycle]`.
pub const COUNT_AXES: [Axis; 4] = [Axis::Incident, Axis::Azimuthal, Axis::Energy, Axis::Cycle];

/// Axis order of per-channel energy values: `[energy, cycle]`.
pub const ENERGY_AXES: [Axis; 2] = [Axis::Energy, Axis::Cycle];

/// Axis order of the HV output grid: `[electrode, energy, incident, cycle]`.
pub const HV_AXES: [Axis; 4] = [Axis::Electrode, Axis::Energy, Axis::Incident, Axis::Cycle];

/// Axis order of the quality flags: `[energy, azimuthal, incident, cycle]`.
///
/// Note this differs from [`COUNT_AXES`]. The instrument really does emit
/// the two layouts with opposite outer axes; any transposition between them
/// is the consumer's explicit job.
pub const QUALITY_AXES: [Axis; 4] = [Axis::Energy, Axis::Azimuthal, Axis::Incident, Axis::Cycle];

/// Axis order of per-cycle vectors: `[cycle]`.
pub const CYCLE_AXES: [Axis; 1] = [Axis::Cycle];

/// Layout of one named field in the serialized record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Axes outer-to-inner; elements are packed row-major in this order.
    pub axes: &'static [Axis],
    /// Bytes per element on the wire.
    pub element_width: usize,
    pub kind: ElementKind,
}

impl FieldSpec {
    /// Number of scalar elements in this field.
    pub const fn element_count(&self) -> usize {
        let mut n = 1;
        let mut i = 0;
        while i < self.axes.len() {
            n *= self.axes[i].len();
            i += 1;
        }
        n
    }

    /// Serialized length of this field in bytes.
    pub const fn byte_len(&self) -> usize {
        self.element_count() * self.element_width
    }
}

/// The complete record layout, in wire order.
pub const FIELDS: [FieldSpec; 8] = [
    FieldSpec {
        name: "epochs",
        axes: &CYCLE_AXES,
        element_width: 8,
        kind: ElementKind::Uint,
    },
    FieldSpec {
        name: "electron_counts",
        axes: &COUNT_AXES,
        element_width: 2,
        kind: ElementKind::Uint,
    },
    FieldSpec {
        name: "bg_counts",
        axes: &COUNT_AXES,
        element_width: 2,
        kind: ElementKind::Uint,
    },
    FieldSpec {
        name: "measure_energy",
        axes: &ENERGY_AXES,
        element_width: 4,
        kind: ElementKind::Float,
    },
    FieldSpec {
        name: "output_hv",
        axes: &HV_AXES,
        element_width: 4,
        kind: ElementKind::Float,
    },
    FieldSpec {
        name: "datataking_time_start",
        axes: &CYCLE_AXES,
        element_width: 8,
        kind: ElementKind::Uint,
    },
    FieldSpec {
        name: "data_time_duration",
        axes: &CYCLE_AXES,
        element_width: 4,
        kind: ElementKind::Float,
    },
    FieldSpec {
        name: "data_quality",
        axes: &QUALITY_AXES,
        element_width: 1,
        kind: ElementKind::Uint,
    },
];

const fn total_byte_len() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < FIELDS.len() {
        total += FIELDS[i].byte_len();
        i += 1;
    }
    total
}

/// Fixed serialized length of one record, independent of its values.
pub const RECORD_BYTE_LEN: usize = total_byte_len();

/// Length of one record as lowercase hex text (two chars per byte).
pub const RECORD_HEX_LEN: usize = RECORD_BYTE_LEN * 2;

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_byte_len_matches_hand_sum() {
        // 360 + 60480 + 60480 + 2880 + 51840 + 360 + 180 + 30240
        assert_eq!(RECORD_BYTE_LEN, 206_820);
        assert_eq!(RECORD_HEX_LEN, 413_640);
    }

    #[test]
    fn fields_are_in_wire_order() {
        let names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "epochs",
                "electron_counts",
                "bg_counts",
                "measure_energy",
                "output_hv",
                "datataking_time_start",
                "data_time_duration",
                "data_quality",
            ]
        );
    }

    #[test]
    fn count_and_quality_axis_orders_differ() {
        assert_eq!(COUNT_AXES[0], Axis::Incident);
        assert_eq!(QUALITY_AXES[0], Axis::Energy);
        // Same element count either way.
        let counts = field("electron_counts").unwrap();
        let quality = field("data_quality").unwrap();
        assert_eq!(counts.element_count(), quality.element_count());
        assert_eq!(counts.element_count(), 6 * 7 * 16 * 45);
    }

    #[test]
    fn field_lookup() {
        assert_eq!(field("output_hv").unwrap().element_width, 4);
        assert_eq!(field("output_hv").unwrap().kind, ElementKind::Float);
        assert!(field("no_such_field").is_none());
    }

    #[test]
    fn per_field_byte_lens() {
        assert_eq!(field("epochs").unwrap().byte_len(), 360);
        assert_eq!(field("electron_counts").unwrap().byte_len(), 60_480);
        assert_eq!(field("measure_energy").unwrap().byte_len(), 2_880);
        assert_eq!(field("output_hv").unwrap().byte_len(), 51_840);
        assert_eq!(field("data_time_duration").unwrap().byte_len(), 180);
        assert_eq!(field("data_quality").unwrap().byte_len(), 30_240);
    }
}
