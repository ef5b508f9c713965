//! Record serialization into the hex bitstring form.

use bytes::BytesMut;
use espec_schema::{field, TelemetryRecord, RECORD_BYTE_LEN};

use crate::error::{CodecError, Result};
use crate::value::{pack_float, pack_uint};

/// Serialize a record into its lowercase hex bitstring.
///
/// Fields are appended in schema order, each grid row-major in its declared
/// axis order, every scalar big-endian, with no padding or separators. The
/// result is a pure function of the record: 413,640 hex characters for any
/// conformant input.
///
/// Shapes are validated against the schema up front; a mismatched field
/// fails with [`CodecError::SchemaMismatch`] before any byte is written.
pub fn encode(record: &TelemetryRecord) -> Result<String> {
    validate_shapes(record)?;

    let mut buf = BytesMut::with_capacity(RECORD_BYTE_LEN);

    for &ms in &record.epochs {
        pack_uint(ms, 8, &mut buf)?;
    }
    for &count in record.electron_counts.values() {
        pack_uint(u64::from(count), 2, &mut buf)?;
    }
    for &count in record.bg_counts.values() {
        pack_uint(u64::from(count), 2, &mut buf)?;
    }
    for &ev in record.measure_energy.values() {
        pack_float(f64::from(ev), 4, &mut buf)?;
    }
    for &volts in record.output_hv.values() {
        pack_float(f64::from(volts), 4, &mut buf)?;
    }
    for &ms in &record.datataking_time_start {
        pack_uint(ms, 8, &mut buf)?;
    }
    for &seconds in &record.data_time_duration {
        pack_float(f64::from(seconds), 4, &mut buf)?;
    }
    for &flag in record.data_quality.values() {
        pack_uint(u64::from(flag), 1, &mut buf)?;
    }

    debug_assert_eq!(buf.len(), RECORD_BYTE_LEN);
    tracing::trace!(bytes = buf.len(), "encoded telemetry record");
    Ok(hex::encode(&buf))
}

fn validate_shapes(record: &TelemetryRecord) -> Result<()> {
    for (name, actual) in record.field_lens() {
        // field_lens() names come from the schema table; lookup cannot miss.
        let expected = field(name).map(|f| f.element_count()).unwrap_or(0);
        if actual != expected {
            return Err(CodecError::SchemaMismatch {
                field: name,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
