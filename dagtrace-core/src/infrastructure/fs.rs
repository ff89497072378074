use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write content to a file atomically using a temporary file.
///
/// This function:
/// 1. Creates the parent directory if needed.
/// 2. Writes the content to a temporary file in that directory.
/// 3. Persists (renames) the temporary file to the target path.
///
/// A report is therefore either fully written or not written at all.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Fails with `MissingInput` unless `path` is an existing regular file.
pub fn ensure_input_file(kind: &'static str, path: &Path) -> Result<(), InfrastructureError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InfrastructureError::missing_input(kind, path))
    }
}

/// Fails with `MissingInput` unless `path` is an existing directory.
pub fn ensure_input_dir(kind: &'static str, path: &Path) -> Result<(), InfrastructureError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(InfrastructureError::missing_input(kind, path))
    }
}
