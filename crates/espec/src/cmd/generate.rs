use chrono::{DateTime, Utc};
use espec::container::encode_many;
use espec::gen::{Generator, GeneratorConfig};
use espec::schema::TelemetryRecord;
use serde::Serialize;
use tracing::info;

use crate::cmd::GenerateArgs;
use crate::exit::{codec_error, container_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct GenerateSummary {
    path: String,
    count: usize,
    first_index: u64,
    bytes_written: usize,
    seed: Option<u64>,
}

pub fn run(args: GenerateArgs, format: OutputFormat) -> CliResult<i32> {
    let start = match &args.start {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map_err(|err| CliError::new(USAGE, format!("invalid --start instant: {err}")))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let config = GeneratorConfig {
        start,
        seed: args.seed,
        ..GeneratorConfig::default()
    };
    let mut generator =
        Generator::new(&config).map_err(|err| codec_error("generator start", err))?;

    let records: Vec<TelemetryRecord> = (0..args.count).map(|_| generator.generate()).collect();
    let entries: Vec<(u64, &TelemetryRecord)> = records
        .iter()
        .enumerate()
        .map(|(offset, record)| (args.first_index + offset as u64, record))
        .collect();

    let text = encode_many(&entries).map_err(|err| container_error("encoding container", err))?;
    std::fs::write(&args.out, &text)
        .map_err(|err| io_error(&args.out.display().to_string(), err))?;

    info!(
        path = %args.out.display(),
        count = args.count,
        bytes = text.len(),
        "container written"
    );

    let summary = GenerateSummary {
        path: args.out.display().to_string(),
        count: args.count,
        first_index: args.first_index,
        bytes_written: text.len(),
        seed: args.seed,
    };
    match format {
        OutputFormat::Json => crate::output::write_json(&summary, None)?,
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "wrote {} bitstring(s) ({} bytes) to {}",
                summary.count, summary.bytes_written, summary.path
            );
        }
    }

    Ok(SUCCESS)
}
