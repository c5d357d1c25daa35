//! # Statement Storage
//!
//! Writes finished provenance to disk. Output is pretty printed JSON with a
//! fixed key order, written to a temporary file next to the target and
//! renamed into place, so readers never observe a half-written statement.
//! An existing file at the target path is replaced.

use crate::error::Result;
use crate::in_toto::{Envelope, Statement};
use crate::provenance::config::OutputFormat;
use crate::utils::atomic_write;

use log::info;
use serde::Serialize;
use std::path::Path;

/// Writes `statement` to `output_path`.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] naming the path if the parent directory does
/// not exist or is not writable.
pub fn persist_statement<P: Serialize>(
    statement: &Statement<P>,
    output_path: &Path,
) -> Result<()> {
    let json = statement.to_json_pretty()?;
    atomic_write(output_path, &json)?;
    info!("wrote in-toto statement to {}", output_path.display());
    Ok(())
}

/// Writes `statement` wrapped in an unsigned DSSE envelope to `output_path`.
pub fn persist_envelope<P: Serialize>(statement: &Statement<P>, output_path: &Path) -> Result<()> {
    let envelope = Envelope::wrap(statement)?;
    let json = envelope.to_json_pretty()?;
    atomic_write(output_path, &json)?;
    info!("wrote DSSE envelope to {}", output_path.display());
    Ok(())
}

pub fn persist<P: Serialize>(
    statement: &Statement<P>,
    output_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Statement => persist_statement(statement, output_path),
        OutputFormat::Envelope => persist_envelope(statement, output_path),
    }
}
