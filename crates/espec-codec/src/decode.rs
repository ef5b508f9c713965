//! Record reconstruction from the hex bitstring form.

use espec_schema::{
    FieldSpec, Grid, TelemetryRecord, COUNT_AXES, ENERGY_AXES, FIELDS, HV_AXES, QUALITY_AXES,
};

use crate::error::{CodecError, Result};
use crate::value::{unpack_float, unpack_uint};

/// Reconstruct a record from its hex bitstring.
///
/// Fields are consumed in the exact encoder order with one monotone byte
/// cursor. Underrun fails with [`CodecError::TruncatedInput`] naming the
/// field and element being read; a partially-populated record is never
/// returned. Unconsumed trailing bytes after the last field fail with
/// [`CodecError::Integrity`].
pub fn decode(hex_str: &str) -> Result<TelemetryRecord> {
    let bytes = hex::decode(hex_str.trim())
        .map_err(|err| CodecError::Integrity(format!("malformed hex payload: {err}")))?;
    let mut cursor = Cursor::new(&bytes);

    let [epochs, electron, bg, energy, hv, start, duration, quality] = &FIELDS;

    let record = TelemetryRecord {
        epochs: read_uint_field(&mut cursor, epochs)?,
        electron_counts: Grid::from_values(
            &COUNT_AXES,
            read_uint_field_as(&mut cursor, electron, |v| v as u16)?,
        ),
        bg_counts: Grid::from_values(
            &COUNT_AXES,
            read_uint_field_as(&mut cursor, bg, |v| v as u16)?,
        ),
        measure_energy: Grid::from_values(&ENERGY_AXES, read_f32_field(&mut cursor, energy)?),
        output_hv: Grid::from_values(&HV_AXES, read_f32_field(&mut cursor, hv)?),
        datataking_time_start: read_uint_field(&mut cursor, start)?,
        data_time_duration: read_f32_field(&mut cursor, duration)?,
        data_quality: Grid::from_values(
            &QUALITY_AXES,
            read_uint_field_as(&mut cursor, quality, |v| v as u8)?,
        ),
    };

    cursor.finish()?;
    tracing::trace!(bytes = bytes.len(), "decoded telemetry record");
    Ok(record)
}

/// Single monotone byte cursor over the decoded payload.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Consume `width` bytes for one element, or report exactly where the
    /// input ran out.
    fn take(&mut self, width: usize, field: &'static str, element: usize) -> Result<&'a [u8]> {
        let end = self.pos + width;
        if end > self.buf.len() {
            return Err(CodecError::TruncatedInput {
                field,
                element,
                offset: self.pos,
            });
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Reject trailing garbage after the last field.
    fn finish(&self) -> Result<()> {
        let remaining = self.buf.len() - self.pos;
        if remaining > 0 {
            return Err(CodecError::Integrity(format!(
                "{remaining} unconsumed byte(s) after the last field (offset {})",
                self.pos
            )));
        }
        Ok(())
    }
}

fn read_uint_field(cursor: &mut Cursor<'_>, spec: &FieldSpec) -> Result<Vec<u64>> {
    read_uint_field_as(cursor, spec, |v| v)
}

fn read_uint_field_as<T>(
    cursor: &mut Cursor<'_>,
    spec: &FieldSpec,
    narrow: impl Fn(u64) -> T,
) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(spec.element_count());
    for element in 0..spec.element_count() {
        let raw = cursor.take(spec.element_width, spec.name, element)?;
        out.push(narrow(unpack_uint(raw, spec.element_width)?));
    }
    Ok(out)
}

fn read_f32_field(cursor: &mut Cursor<'_>, spec: &FieldSpec) -> Result<Vec<f32>> {
    let mut out = Vec::with_capacity(spec.element_count());
    for element in 0..spec.element_count() {
        let raw = cursor.take(spec.element_width, spec.name, element)?;
        out.push(unpack_float(raw, spec.element_width)? as f32);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use espec_schema::RECORD_HEX_LEN;

    fn sample_record() -> TelemetryRecord {
        let mut record = TelemetryRecord::zeroed();
        for cycle in 0..45 {
            record.epochs[cycle] = 1_700_000_000_000 + cycle as u64 * 80_000;
            record.datataking_time_start[cycle] = record.epochs[cycle];
            record.data_time_duration[cycle] = 70.0 + cycle as f32 * 0.1;
        }
        record.electron_counts.set(&[5, 6, 15, 44], 65_535);
        record.bg_counts.set(&[0, 0, 0, 1], 77);
        record.measure_energy.set(&[10, 20], 2_000.0);
        record.output_hv.set(&[2, 15, 5, 44], 1_120.0);
        record.data_quality.set(&[15, 6, 5, 44], 255);
        record
    }

    #[test]
    fn roundtrip_reconstructs_every_field() {
        let record = sample_record();
        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn concrete_scenario_sparse_values_roundtrip() {
        let mut record = TelemetryRecord::zeroed();
        record.electron_counts.set(&[0, 0, 0, 0], 999);
        record.measure_energy.set(&[0, 0], 100.0);

        let decoded = decode(&encode(&record).unwrap()).unwrap();

        assert_eq!(decoded.electron_counts.get(&[0, 0, 0, 0]), 999);
        assert_eq!(decoded.measure_energy.get(&[0, 0]), 100.0);
        // Zero everywhere else.
        assert_eq!(
            decoded
                .electron_counts
                .values()
                .iter()
                .filter(|&&v| v != 0)
                .count(),
            1
        );
        assert_eq!(
            decoded
                .measure_energy
                .values()
                .iter()
                .filter(|&&v| v != 0.0)
                .count(),
            1
        );
        assert_eq!(decoded, record);
    }

    #[test]
    fn one_byte_short_is_truncated_input() {
        let hex_str = encode(&TelemetryRecord::zeroed()).unwrap();
        let short = &hex_str[..hex_str.len() - 2];
        let err = decode(short).unwrap_err();
        // The last byte belongs to the final data_quality element.
        assert!(matches!(
            err,
            CodecError::TruncatedInput {
                field: "data_quality",
                element,
                ..
            } if element == 16 * 7 * 6 * 45 - 1
        ));
    }

    #[test]
    fn empty_input_truncates_in_first_field() {
        let err = decode("").unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedInput {
                field: "epochs",
                element: 0,
                offset: 0,
            }
        ));
    }

    #[test]
    fn one_byte_long_is_an_integrity_error() {
        let mut hex_str = encode(&TelemetryRecord::zeroed()).unwrap();
        hex_str.push_str("ff");
        assert!(matches!(
            decode(&hex_str).unwrap_err(),
            CodecError::Integrity(_)
        ));
    }

    #[test]
    fn non_hex_input_is_an_integrity_error() {
        let mut hex_str = encode(&TelemetryRecord::zeroed()).unwrap();
        hex_str.replace_range(0..2, "zz");
        assert!(matches!(
            decode(&hex_str).unwrap_err(),
            CodecError::Integrity(_)
        ));
    }

    #[test]
    fn odd_length_hex_is_an_integrity_error() {
        let mut hex_str = encode(&TelemetryRecord::zeroed()).unwrap();
        hex_str.pop();
        assert!(matches!(
            decode(&hex_str).unwrap_err(),
            CodecError::Integrity(_)
        ));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let hex_str = encode(&sample_record()).unwrap();
        assert_eq!(hex_str.len(), RECORD_HEX_LEN);
        let padded = format!("  {hex_str}\n");
        assert_eq!(decode(&padded).unwrap(), sample_record());
    }

    #[test]
    fn extreme_u64_epochs_roundtrip_exactly() {
        let mut record = TelemetryRecord::zeroed();
        record.epochs[0] = u64::MAX;
        record.epochs[44] = 1;
        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded.epochs[0], u64::MAX);
        assert_eq!(decoded.epochs[44], 1);
    }
}
