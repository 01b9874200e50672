//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;
use std::time::SystemTime;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Read `path` as UTF-8 together with its modification time.
///
/// A missing file reads as `("", None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or stat'ed.
pub fn read_with_mtime(path: &Path) -> Result<(String, Option<SystemTime>)> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((String::new(), None)),
        Err(e) => return Err(e).with_context(|| format!("stat: {}", path.display())),
    };
    let modified = metadata
        .modified()
        .with_context(|| format!("read mtime: {}", path.display()))?;
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read: {}", path.display()))?;
    Ok((content, Some(modified)))
}

/// Write `content` to `path`, creating parent directories, then stamp the
/// file's modification time with `mtime`.
///
/// # Errors
///
/// Returns an error if the directory, the write, or the timestamp update
/// fails.
pub fn write_stamped(path: &Path, content: &str, mtime: SystemTime) -> Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content).with_context(|| format!("write: {}", path.display()))?;
    set_mtime(path, mtime)
}

/// Set the modification time of an existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its time cannot be set.
pub fn set_mtime(path: &Path, mtime: SystemTime) -> Result<()> {
    std::fs::File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(mtime))
        .with_context(|| format!("set mtime: {}", path.display()))
}
