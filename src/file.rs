// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

/// Write `contents` to `path`, creating parent directories as needed.
/// Returns the path written to.
pub fn write_output(path: &Path, contents: &str) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Create `dir` (and parents) if missing. Errors if `dir` exists but is a file.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        if dir.is_dir() {
            return Ok(());
        }
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", dir.display()),
        ));
    }
    fs::create_dir_all(dir)
}
