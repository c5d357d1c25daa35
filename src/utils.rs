use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Opens `path` for reading.
///
/// A missing path, a directory, or a path we are not allowed to read are all
/// reported as [`Error::NotFound`] carrying the path exactly as provided.
pub fn safe_open_file(path: &Path) -> Result<File> {
    let provided = path.to_string_lossy().to_string();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::NotFound(provided.clone()),
        _ => Error::Io(e),
    })?;

    if !metadata.is_file() {
        return Err(Error::NotFound(provided));
    }

    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::NotFound(provided),
        _ => Error::Io(e),
    })
}

/// Writes `contents` to `path` via a uniquely named temp file in the same
/// directory, persisted over the target once synced.
///
/// An existing file at `path` is replaced. Nothing else in the directory is
/// touched.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let temp = NamedTempFile::new_in(parent_dir(path)).map_err(|e| io_context(e, path))?;

    let mut file = temp.as_file();
    file.write_all(contents).map_err(|e| io_context(e, path))?;
    file.sync_all().map_err(|e| io_context(e, path))?;

    temp.persist(path).map_err(|e| io_context(e.error, path))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn io_context(err: io::Error, path: &Path) -> Error {
    Error::Io(io::Error::new(
        err.kind(),
        format!("failed writing {}: {err}", path.display()),
    ))
}
