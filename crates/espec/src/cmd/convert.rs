use espec::calib::Efficiency;
use espec::container::decode_many;
use espec::export::{level2_export, Level2Export};
use tracing::{info, warn};

use crate::cmd::ConvertArgs;
use crate::exit::{calib_error, codec_error, io_error, CliResult, SUCCESS};
use crate::output::{write_json, OutputFormat};

pub fn run(args: ConvertArgs, _format: OutputFormat) -> CliResult<i32> {
    let efficiency = match &args.efficiency {
        Some(factors) => {
            Efficiency::from_slice(factors).map_err(|err| calib_error("--efficiency", err))?
        }
        None => Efficiency::uniform(),
    };

    let text = std::fs::read_to_string(&args.input)
        .map_err(|err| io_error(&args.input.display().to_string(), err))?;

    let entries = decode_many(&text);
    let mut exports: Vec<Level2Export> = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;

    for (index, payload) in &entries {
        match espec::codec::decode(payload) {
            Ok(record) => exports.push(level2_export(*index, &record, &efficiency)),
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
        converted = exports.len(),
        skipped,
        "calibrated {}",
        args.input.display()
    );
    write_json(&exports, args.out.as_deref())?;
    Ok(SUCCESS)
}
