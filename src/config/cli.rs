use crate::core::Storage;
use crate::utils::error::{PdfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn ensure_dir(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if full_path.is_file() {
            return Err(PdfError::TargetIsFileError { path: full_path });
        }

        if !full_path.is_dir() {
            tracing::debug!("Creating output directory {}", full_path.display());
            fs::create_dir(&full_path)?;
        }

        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> LocalStorage {
        LocalStorage::new(dir.path().to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        storage.ensure_dir("target").await.unwrap();

        assert!(dir.path().join("target").is_dir());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        storage.ensure_dir("target").await.unwrap();
        std::fs::write(dir.path().join("target/keep.txt"), b"keep").unwrap();
        storage.ensure_dir("target").await.unwrap();

        assert!(dir.path().join("target/keep.txt").exists());
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_plain_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        std::fs::write(dir.path().join("target"), b"occupied").unwrap();

        let err = storage.ensure_dir("target").await.unwrap_err();

        assert!(matches!(err, PdfError::TargetIsFileError { .. }));
        assert!(err.to_string().ends_with("target: File exists"));
        assert_eq!(std::fs::read(dir.path().join("target")).unwrap(), b"occupied");
    }

    #[tokio::test]
    async fn test_ensure_dir_does_not_create_parents() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        assert!(storage.ensure_dir("missing/target").await.is_err());
    }

    #[tokio::test]
    async fn test_read_and_write_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        storage.write_file("nested/page.html", b"<p>hi</p>").await.unwrap();

        assert!(storage.exists("nested/page.html").await);
        assert_eq!(
            storage.read_file("nested/page.html").await.unwrap(),
            b"<p>hi</p>"
        );
        assert!(storage.read_file("absent.md").await.is_err());
    }
}
