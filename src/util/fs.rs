//! File helpers shared by the table store and the settings file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of the temporary sibling used while writing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` atomically (temp file + rename).
///
/// Parent directories are created as needed. On failure the temp file is
/// removed and whatever was at `path` before is left untouched.
///
/// # Errors
/// Returns the underlying I/O error with the failed step in its message.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| step_error("create directory", e))?;
    }

    let temp_path = temp_path_for(path);

    let written = (|| {
        let mut file = File::create(&temp_path).map_err(|e| step_error("create temp file", e))?;
        file.write_all(contents).map_err(|e| step_error("write", e))?;
        file.sync_all().map_err(|e| step_error("sync", e))
    })();

    let result = written.and_then(|()| fs::rename(&temp_path, path).map_err(|e| step_error("rename", e)));

    if result.is_err() {
        // Clean up temp file on error
        if let Err(e) = fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                crate::warn!("Failed to remove temp file {:?}: {}", temp_path, e);
            }
        }
    }
    result
}

fn step_error(step: &str, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format!("Failed to {}: {}", step, err))
}

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
