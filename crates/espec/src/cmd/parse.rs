use espec::container::decode_many;
use espec::export::{record_export, RecordExport};
use tracing::{info, warn};

use crate::cmd::ParseArgs;
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::output::{write_json, OutputFormat};

pub fn run(args: ParseArgs, _format: OutputFormat) -> CliResult<i32> {
    let text = std::fs::read_to_string(&args.input)
        .map_err(|err| io_error(&args.input.display().to_string(), err))?;

    let entries = decode_many(&text);
    let mut exports: Vec<RecordExport> = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;

    for (index, payload) in &entries {
        match espec::codec::decode(payload) {
            Ok(record) => exports.push(record_export(*index, &record)),
            Err(err) if args.strict => {
                return Err(codec_error(&format!("bitstring {index}"), err));
            }
            Err(err) => {
                warn!(index, error = %err, "skipping undecodable bitstring");
                skipped += 1;
            }
        }
    }

    info!(
        decoded = exports.len(),
        skipped,
        "parsed {}",
        args.input.display()
    );
    write_json(&exports, args.out.as_deref())?;
    Ok(SUCCESS)
}
