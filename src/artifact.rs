//! Output artifact replacement.
//!
//! The gallery page is replaced whole on every regeneration: any stale copy
//! is removed first, then the new content lands via write-to-temp-then-rename
//! in the same directory, so a concurrent reader never observes a half-written
//! page. The artifact legitimately may not exist before the first run.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to replace {0}: {1}")]
    Persist(String, std::io::Error),
}

/// Replace the file at `path` with `content`.
///
/// Deletes any existing artifact (no-op if absent), writes the new content to
/// a temporary file beside it, and renames it into place.
pub fn replace(path: &Path, content: &str) -> Result<(), ArtifactError> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    // Temp file must live in the target directory: rename is only atomic
    // within one filesystem.
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path)
        .map_err(|e| ArtifactError::Persist(path.display().to_string(), e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_artifact_when_absent() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("index.html");

        replace(&target, "<html>fresh</html>").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "<html>fresh</html>");
    }

    #[test]
    fn overwrites_existing_artifact() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("index.html");
        fs::write(&target, "stale").unwrap();

        replace(&target, "fresh").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("index.html");

        replace(&target, "content").unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("index.html")]);
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("missing-subdir").join("index.html");
        assert!(replace(&target, "content").is_err());
    }
}
