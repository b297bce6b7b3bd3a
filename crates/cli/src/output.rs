//! Output formatting: errors on stderr, frames on stdout

use std::io::Write;

use anyhow::Error;
use colored::*;
use gyrodrive_engine::FrameSnapshot;
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::Startup(_)) => "startup",
        Some(CliError::InvalidConfiguration(_)) => "configuration",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "unknown",
    }
}

#[derive(Serialize)]
struct FrameLine<'a> {
    tick: u64,
    #[serde(flatten)]
    frame: &'a FrameSnapshot,
}

/// Write one frame as a single JSON line.
pub fn write_frame<W: Write>(out: &mut W, tick: u64, frame: &FrameSnapshot) -> Result<(), CliError> {
    serde_json::to_writer(&mut *out, &FrameLine { tick, frame })?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
