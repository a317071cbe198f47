//! Source file I/O on `tokio::fs`.
//!
//! Reads refuse binary, oversized and non-UTF-8 files so nothing that is not
//! plain text ever gets rewritten. Writes go through a sibling temp file and
//! a rename, so a failed write leaves the original in place.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use memchr::memchr;
use tokio::fs as tokio_fs;
use tokio::io::AsyncReadExt;

use crate::error::IoError;

/// Bytes inspected for NULs when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 8192;

/// Quick binary detection - NULL byte within the first 8KB.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_SNIFF_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Read a source file as UTF-8 text, enforcing `max_bytes`.
///
/// # Errors
/// `NotFound` when metadata is unavailable, `TooLarge`, `BinaryFile`,
/// `Encoding` for invalid UTF-8, `System` for read errors.
pub async fn read_source(path: &Path, max_bytes: u64) -> Result<String, IoError> {
    let metadata = tokio_fs::metadata(path)
        .await
        .map_err(|_| IoError::NotFound(path.display().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = tokio_fs::File::open(path).await?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer).await?;

    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }
    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}

/// Overwrite a source file with `content`.
///
/// With `atomic` set, symlinks are resolved and the content is written to a
/// hidden sibling of the real file that takes over its permissions and is
/// then renamed over it.
///
/// # Errors
/// Any I/O failure; the temp file is removed on a best-effort basis.
pub async fn write_source(path: &Path, content: &str, atomic: bool) -> Result<(), IoError> {
    if !atomic {
        tokio_fs::write(path, content).await?;
        return Ok(());
    }

    // Rename replaces a symlink rather than its target, so resolve it first.
    let target = tokio_fs::canonicalize(path).await?;
    let temp = temp_path_for(&target);
    if let Err(error) = write_then_rename(&target, &temp, content).await {
        if let Err(cleanup) = tokio_fs::remove_file(&temp).await
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                temp = %temp.display(),
                error = %cleanup,
                "failed to remove temp file after write error"
            );
        }
        return Err(error);
    }
    Ok(())
}

async fn write_then_rename(path: &Path, temp: &Path, content: &str) -> Result<(), IoError> {
    let permissions = tokio_fs::metadata(path).await?.permissions();
    tokio_fs::write(temp, content).await?;
    tokio_fs::set_permissions(temp, permissions).await?;
    tokio_fs::rename(temp, path).await?;
    Ok(())
}

/// `dir/name.js` -> `dir/.name.js.omni-strip.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".omni-strip.tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_text() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("a.js");
        tokio_fs::write(&p, "let x = 1;").await.expect("Write");
        assert_eq!(read_source(&p, 1024).await.expect("Read"), "let x = 1;");
    }

    #[tokio::test]
    async fn test_read_binary() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("blob.js");
        tokio_fs::write(&p, b"\x00\x01\x02").await.expect("Write");
        assert!(matches!(
            read_source(&p, 1024).await,
            Err(IoError::BinaryFile)
        ));
    }

    #[tokio::test]
    async fn test_read_invalid_utf8() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("latin1.js");
        tokio_fs::write(&p, b"caf\xe9").await.expect("Write");
        assert!(matches!(read_source(&p, 1024).await, Err(IoError::Encoding)));
    }

    #[tokio::test]
    async fn test_read_too_large() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("big.js");
        tokio_fs::write(&p, "12345678901234567890").await.expect("Write");
        assert!(matches!(
            read_source(&p, 10).await,
            Err(IoError::TooLarge(20, 10))
        ));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let result = read_source(Path::new("/nonexistent/file.js"), 1024).await;
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("a.js");
        tokio_fs::write(&p, "old").await.expect("Write");

        write_source(&p, "new", true).await.expect("Atomic write");

        assert_eq!(tokio_fs::read_to_string(&p).await.expect("Read"), "new");
        assert!(!temp_path_for(&p).exists());
    }

    #[tokio::test]
    async fn test_atomic_write_missing_target_fails() {
        let dir = TempDir::new().expect("Create temp dir");
        let p = dir.path().join("gone.js");
        assert!(write_source(&p, "x", true).await.is_err());
        assert!(!temp_path_for(&p).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_atomic_write_through_symlink() {
        let dir = TempDir::new().expect("Create temp dir");
        let real = dir.path().join("real.js");
        let link = dir.path().join("link.js");
        tokio_fs::write(&real, "old").await.expect("Write");
        std::os::unix::fs::symlink(&real, &link).expect("Symlink");

        write_source(&link, "new", true).await.expect("Atomic write");

        assert_eq!(tokio_fs::read_to_string(&real).await.expect("Read"), "new");
        let meta = tokio_fs::symlink_metadata(&link).await.expect("Link metadata");
        assert!(meta.file_type().is_symlink());
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path_for(Path::new("/src/app.js")),
            PathBuf::from("/src/.app.js.omni-strip.tmp")
        );
    }
}
