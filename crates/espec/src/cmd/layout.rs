use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use espec::schema::{ElementKind, FIELDS, RECORD_BYTE_LEN, RECORD_HEX_LEN};
use serde::Serialize;

use crate::cmd::LayoutArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{write_json, OutputFormat};

#[derive(Serialize)]
struct FieldRow {
    name: &'static str,
    axes: Vec<&'static str>,
    shape: Vec<usize>,
    kind: &'static str,
    element_width: usize,
    elements: usize,
    bytes: usize,
    offset: usize,
}

#[derive(Serialize)]
struct LayoutOutput {
    fields: Vec<FieldRow>,
    record_bytes: usize,
    record_hex_chars: usize,
}

fn layout_rows() -> Vec<FieldRow> {
    let mut offset = 0;
    FIELDS
        .iter()
        .map(|spec| {
            let row = FieldRow {
                name: spec.name,
                axes: spec.axes.iter().map(|a| a.name()).collect(),
                shape: spec.axes.iter().map(|a| a.len()).collect(),
                kind: match spec.kind {
                    ElementKind::Uint => "uint",
                    ElementKind::Float => "float",
                },
                element_width: spec.element_width,
                elements: spec.element_count(),
                bytes: spec.byte_len(),
                offset,
            };
            offset += spec.byte_len();
            row
        })
        .collect()
}

pub fn run(_args: LayoutArgs, format: OutputFormat) -> CliResult<i32> {
    let out = LayoutOutput {
        fields: layout_rows(),
        record_bytes: RECORD_BYTE_LEN,
        record_hex_chars: RECORD_HEX_LEN,
    };

    match format {
        OutputFormat::Json => write_json(&out, None)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "FIELD", "AXES", "SHAPE", "KIND", "WIDTH", "ELEMENTS", "BYTES", "OFFSET",
                ]);
            for row in &out.fields {
                table.add_row(vec![
                    row.name.to_string(),
                    row.axes.join(","),
                    row.shape
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("x"),
                    row.kind.to_string(),
                    row.element_width.to_string(),
                    row.elements.to_string(),
                    row.bytes.to_string(),
                    row.offset.to_string(),
                ]);
            }
            println!("{table}");
            println!(
                "record: {} bytes ({} hex chars)",
                out.record_bytes, out.record_hex_chars
            );
        }
        OutputFormat::Pretty => {
            for row in &out.fields {
                println!(
                    "{:<24} [{}] {}{}B x{} = {}B @ {}",
                    row.name,
                    row.axes.join(","),
                    row.kind,
                    row.element_width,
                    row.elements,
                    row.bytes,
                    row.offset
                );
            }
            println!(
                "record: {} bytes ({} hex chars)",
                out.record_bytes, out.record_hex_chars
            );
        }
    }

    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_tile_the_record_exactly() {
        let rows = layout_rows();
        assert_eq!(rows[0].offset, 0);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].offset + pair[0].bytes, pair[1].offset);
        }
        let last = rows.last().unwrap();
        assert_eq!(last.offset + last.bytes, RECORD_BYTE_LEN);
    }

    #[test]
    fn epochs_field_leads_the_layout() {
        let rows = layout_rows();
        assert_eq!(rows[0].name, "epochs");
        assert_eq!(rows[0].kind, "uint");
        assert_eq!(rows[0].element_width, 8);
        assert_eq!(rows[0].shape, vec![45]);
    }
}
