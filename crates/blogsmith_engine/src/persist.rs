use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically write `contents` to `target` by writing a temp file in the
/// same directory and renaming it over the target. The target keeps its
/// old contents if any step fails.
pub(crate) fn write_atomic(target: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = target.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "target path has no parent")
    })?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // persist's rename does not overwrite on every platform
    if target.exists() {
        fs::remove_file(target)?;
    }
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
