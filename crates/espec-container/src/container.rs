//! Textual splitting and assembly of labeled bitstrings.

use std::fmt::Write as _;

use espec_schema::TelemetryRecord;

use crate::error::{ContainerError, Result};

/// Literal token starting every entry header line.
pub const HEADER_TOKEN: &str = "Bitstring";

/// Serialize `(index, record)` pairs into container text.
///
/// Per entry, in order: a `Bitstring {index}:` header line, the encoded
/// hex payload on its own line, then a blank separator line. Indices are
/// caller-assigned and pass through untouched — they need not be
/// contiguous or sorted.
pub fn encode_many(entries: &[(u64, &TelemetryRecord)]) -> Result<String> {
    let mut text = String::new();
    for &(index, record) in entries {
        let payload = espec_codec::encode(record)
            .map_err(|source| ContainerError::Encode { index, source })?;
        // Infallible for String targets.
        let _ = writeln!(text, "{HEADER_TOKEN} {index}:");
        text.push_str(&payload);
        text.push_str("\n\n");
    }
    Ok(text)
}

/// Split container text into `(index, hex payload)` pairs, encounter order
/// preserved.
///
/// A line starting with the `Bitstring` token opens a new entry; its index
/// is the second whitespace-delimited token, minus a trailing colon. All
/// non-empty lines that follow concatenate into that entry's payload until
/// the next header or end of input — payloads may span multiple lines. A
/// header whose index does not parse is reported and skipped without
/// aborting the rest of the container, as is a header with no payload
/// lines at all; the final entry is flushed at end of input.
pub fn decode_many(text: &str) -> Vec<(u64, String)> {
    let mut entries = Vec::new();
    let mut current: Option<(u64, String)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(HEADER_TOKEN) {
            flush(&mut entries, current.take());
            current = match parse_header_index(line) {
                Some(index) => Some((index, String::new())),
                None => {
                    tracing::warn!(header = line, "skipping entry with unparsable index");
                    None
                }
            };
        } else if !line.is_empty() {
            if let Some((_, payload)) = current.as_mut() {
                payload.push_str(line);
            }
        }
    }

    flush(&mut entries, current);
    entries
}

/// Close out an entry; headers that never accumulated a payload are dropped
/// (the writer never emits one).
fn flush(entries: &mut Vec<(u64, String)>, current: Option<(u64, String)>) {
    match current {
        Some((index, payload)) if !payload.is_empty() => entries.push((index, payload)),
        Some((index, _)) => {
            tracing::warn!(index, "skipping entry with no payload lines");
        }
        None => {}
    }
}

fn parse_header_index(line: &str) -> Option<u64> {
    let token = line.split_whitespace().nth(1)?;
    token.trim_end_matches(':').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_many_emits_headers_payloads_and_separators() {
        let r1 = TelemetryRecord::zeroed();
        let mut r2 = TelemetryRecord::zeroed();
        r2.epochs[0] = 42;

        let text = encode_many(&[(1, &r1), (7, &r2)]).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Bitstring 1:");
        assert_eq!(lines[1], espec_codec::encode(&r1).unwrap());
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Bitstring 7:");
        assert_eq!(lines[4], espec_codec::encode(&r2).unwrap());
        assert_eq!(lines[5], "");
    }

    #[test]
    fn container_roundtrip_preserves_order_and_payloads() {
        let mut r1 = TelemetryRecord::zeroed();
        r1.electron_counts.set(&[0, 0, 0, 0], 999);
        let mut r2 = TelemetryRecord::zeroed();
        r2.measure_energy.set(&[0, 0], 100.0);

        let text = encode_many(&[(1, &r1), (2, &r2)]).unwrap();
        let entries = decode_many(&text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, 1);
        assert_eq!(entries[1].0, 2);
        assert_eq!(entries[0].1, espec_codec::encode(&r1).unwrap());
        assert_eq!(entries[1].1, espec_codec::encode(&r2).unwrap());

        assert_eq!(espec_codec::decode(&entries[0].1).unwrap(), r1);
        assert_eq!(espec_codec::decode(&entries[1].1).unwrap(), r2);
    }

    #[test]
    fn multi_line_payloads_concatenate_without_separators() {
        let text = "Bitstring 3:\nabcd\nef01\n\n";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(3, "abcdef01".to_string())]);
    }

    #[test]
    fn indices_need_not_be_contiguous_or_sorted() {
        let text = "Bitstring 9:\naa\n\nBitstring 2:\nbb\n\nBitstring 9:\ncc\n\n";
        let entries = decode_many(text);
        assert_eq!(
            entries,
            vec![
                (9, "aa".to_string()),
                (2, "bb".to_string()),
                (9, "cc".to_string()),
            ]
        );
    }

    #[test]
    fn unparsable_header_is_skipped_without_aborting() {
        let text = "Bitstring one:\ndead\n\nBitstring 4:\nbeef\n\n";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(4, "beef".to_string())]);
    }

    #[test]
    fn payload_lines_before_any_header_are_ignored() {
        let text = "cafe\nBitstring 1:\nbabe\n";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(1, "babe".to_string())]);
    }

    #[test]
    fn final_entry_flushes_without_trailing_header() {
        let text = "Bitstring 5:\nf00d";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(5, "f00d".to_string())]);
    }

    #[test]
    fn header_without_payload_is_dropped() {
        let text = "Bitstring 1:\n\nBitstring 2:\nabcd\n\nBitstring 3:\n";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(2, "abcd".to_string())]);
    }

    #[test]
    fn empty_text_yields_no_entries() {
        assert!(decode_many("").is_empty());
        assert!(decode_many("\n\n\n").is_empty());
    }

    #[test]
    fn header_index_tolerates_missing_colon() {
        let text = "Bitstring 8\nabcd\n";
        let entries = decode_many(text);
        assert_eq!(entries, vec![(8, "abcd".to_string())]);
    }
}
