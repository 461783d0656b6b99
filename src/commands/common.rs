//! Output helpers shared across commands.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// True for paths that mean standard output.
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdout"
}

/// Open a buffered writer on `path`, or on standard output for `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn create_output<P: AsRef<Path>>(path: P, description: &str) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    if is_stdout_path(path) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create {description}: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
