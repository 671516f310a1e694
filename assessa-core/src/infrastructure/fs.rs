use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serialize `document` as pretty JSON and write it atomically.
///
/// The bytes go to a temporary file created next to `path`, which is then renamed
/// over the target. Readers see either the previous document or the new one, never
/// a truncated file. Missing parent directories are created.
pub fn write_json_atomic<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    document: &T,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(&bytes)?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
