use espec::schema::{RECORD_BYTE_LEN, RECORD_HEX_LEN};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("espec {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: espec");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("record_bytes: {RECORD_BYTE_LEN}");
    println!("record_hex_chars: {RECORD_HEX_LEN}");

    Ok(SUCCESS)
}
