//! Millisecond timestamp packing, fixed to UTC.
//!
//! The instrument's native time standard is a high-precision epoch format;
//! this codec deliberately substitutes an 8-byte unsigned count of
//! milliseconds since the Unix epoch, used identically by encoder and
//! decoder. Decoding never consults the host time zone — the calendar
//! rendering is UTC by contract, so the same payload reads the same
//! everywhere.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{CodecError, Result};

/// Milliseconds since the Unix epoch, truncated (never rounded).
///
/// Instants before the epoch have no u64 form and fail with
/// [`CodecError::PreEpoch`].
pub fn encode_timestamp(instant: DateTime<Utc>) -> Result<u64> {
    u64::try_from(instant.timestamp_millis())
        .map_err(|_| CodecError::PreEpoch(instant.to_rfc3339()))
}

/// Reconstruct the UTC instant and its ISO-8601 string from encoded
/// milliseconds.
///
/// Fails with [`CodecError::Integrity`] when the count lies outside the
/// representable calendar range.
pub fn decode_timestamp(ms: u64) -> Result<(DateTime<Utc>, String)> {
    let signed = i64::try_from(ms)
        .map_err(|_| CodecError::Integrity(format!("timestamp {ms} ms exceeds calendar range")))?;
    let instant = Utc
        .timestamp_millis_opt(signed)
        .single()
        .ok_or_else(|| CodecError::Integrity(format!("timestamp {ms} ms exceeds calendar range")))?;
    Ok((instant, iso8601(&instant)))
}

/// ISO-8601 rendering at millisecond resolution, UTC designator `Z`.
pub fn iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn millisecond_roundtrip_is_exact() {
        let instant = utc(2025, 3, 14, 9, 26, 53, 589);
        let ms = encode_timestamp(instant).unwrap();
        let (back, _) = decode_timestamp(ms).unwrap();
        assert_eq!(encode_timestamp(back).unwrap(), ms);
        assert_eq!(back, instant);
    }

    #[test]
    fn sub_millisecond_precision_truncates() {
        let instant = utc(2025, 3, 14, 9, 26, 53, 0) + chrono::Duration::microseconds(1999);
        let ms = encode_timestamp(instant).unwrap();
        // 1.999 ms truncates to 1 ms, never rounds to 2.
        assert_eq!(ms % 1000, 1);
    }

    #[test]
    fn iso_rendering_is_utc_with_millis() {
        let (_, iso) = decode_timestamp(1_700_000_000_123).unwrap();
        assert_eq!(iso, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn epoch_zero_decodes() {
        let (instant, iso) = decode_timestamp(0).unwrap();
        assert_eq!(instant.timestamp_millis(), 0);
        assert_eq!(iso, "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn pre_epoch_instants_are_rejected() {
        let instant = utc(1969, 12, 31, 23, 59, 59, 999);
        assert!(matches!(
            encode_timestamp(instant),
            Err(CodecError::PreEpoch(_))
        ));
    }

    #[test]
    fn out_of_calendar_range_is_an_integrity_error() {
        assert!(matches!(
            decode_timestamp(u64::MAX),
            Err(CodecError::Integrity(_))
        ));
    }
}
