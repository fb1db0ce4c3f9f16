use std::io::ErrorKind;
use std::path::Path;
use todo_core::{TodoError, TodoResult};
use tokio::fs;

/// Write-to-temp-then-rename file access for the JSON store
pub struct AtomicWriter;

impl AtomicWriter {
    /// Replace the contents of `path` in one rename. The temp file lives in
    /// the destination directory so the rename stays on one filesystem.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TodoResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file
            .persist(path)
            .map_err(|e| TodoError::Io(e.error))?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Contents of `path`, or `None` when it does not exist yet
    pub async fn read_optional(path: &Path) -> TodoResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested/dir/store.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();

        let data = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"{}"[..]));
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("store.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let data = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"Second"[..]));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let data = AtomicWriter::read_optional(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(data.is_none());
    }
}
