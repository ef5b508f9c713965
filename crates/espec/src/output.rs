use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Serialize to stdout or a file, pretty-printed for files so archived
/// exports stay diffable.
pub fn write_json<T: Serialize>(
    value: &T,
    out: Option<&Path>,
) -> Result<(), crate::exit::CliError> {
    match out {
        Some(path) => {
            let text = serde_json::to_string_pretty(value)
                .map_err(|err| crate::exit::CliError::new(crate::exit::INTERNAL, err.to_string()))?;
            std::fs::write(path, text)
                .map_err(|err| crate::exit::io_error(&path.display().to_string(), err))?;
        }
        None => {
            let text = serde_json::to_string(value)
                .map_err(|err| crate::exit::CliError::new(crate::exit::INTERNAL, err.to_string()))?;
            println!("{text}");
        }
    }
    Ok(())
}
