//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file is created in the same directory as the target file so the
/// rename stays on one filesystem.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write {}", path.display()));
    }

    Ok(())
}

/// Replaces path separators so a topic can be used inside a file name.
pub fn file_stem_for(topic: &str) -> String {
    topic.replace(['/', '\\'], "_")
}

/// A file path that is removed when the guard is dropped.
///
/// The file does not have to exist; removal failures are ignored.
#[derive(Debug)]
pub struct ScopedFile {
    path: PathBuf,
}

impl ScopedFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
