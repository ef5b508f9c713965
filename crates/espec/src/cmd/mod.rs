use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod convert;
pub mod generate;
pub mod layout;
pub mod parse;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate synthetic telemetry into a container file.
    Generate(GenerateArgs),
    /// Decode a container file into level-1 JSON.
    Parse(ParseArgs),
    /// Decode and calibrate a container file into level-2 JSON.
    Convert(ConvertArgs),
    /// Show the record layout (fields, axes, widths, offsets).
    Layout(LayoutArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Generate(args) => generate::run(args, format),
        Command::Parse(args) => parse::run(args, format),
        Command::Convert(args) => convert::run(args, format),
        Command::Layout(args) => layout::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Container file to write.
    pub out: PathBuf,
    /// Number of bitstrings to generate.
    #[arg(long, default_value_t = 10)]
    pub count: usize,
    /// RNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
    /// First cycle start (RFC 3339, e.g. 2026-08-23T00:00:00Z). Default: now.
    #[arg(long, value_name = "INSTANT")]
    pub start: Option<String>,
    /// Index of the first bitstring header.
    #[arg(long, default_value_t = 1)]
    pub first_index: u64,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Container file to read.
    pub input: PathBuf,
    /// JSON output file (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Fail on the first undecodable bitstring instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Container file to read.
    pub input: PathBuf,
    /// JSON output file (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Per-channel efficiency factors, 16 comma-separated values.
    #[arg(long, value_delimiter = ',', value_name = "F0,..,F15")]
    pub efficiency: Option<Vec<f32>>,
    /// Fail on the first undecodable bitstring instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print extended build information.
    #[arg(long)]
    pub extended: bool,
}
