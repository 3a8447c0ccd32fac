//! DOT graph output writer.

use super::{prepare_output_path, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write DOT content to a file
///
/// **Public** - main entry point for graph output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_dot(dot_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing DOT graph to: {}", output_path.display());

    validate_path(output_path)?;
    if let Some(ext) = output_path.extension() {
        if ext != "dot" && ext != "gv" {
            debug!("File does not have a .dot extension: {}", output_path.display());
        }
    }
    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(dot_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("DOT graph written successfully ({} bytes)", dot_content.len());

    Ok(())
}

/// Write DOT content to standard output
pub fn print_dot(dot_content: &str) -> Result<(), OutputError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(dot_content.as_bytes())?;
    handle.flush()?;
    Ok(())
}
