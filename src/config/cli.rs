use crate::core::Storage;
use crate::utils::error::{DrdError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DrdError::MissingFile {
                path: path.to_path_buf(),
            },
            _ => DrdError::Io(e),
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let write_error = |source| DrdError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        // 先寫暫存檔再改名，失敗時不留下半份頁面
        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = full_path.with_file_name(format!(".{}.tmp", file_name));

        if let Err(e) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(e));
        }
        fs::rename(&temp_path, &full_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let path = Path::new("page.txt");

        storage.write_file(path, b"first run, longer content").unwrap();
        storage.write_file(path, b"second").unwrap();

        assert_eq!(storage.read_file(path).unwrap(), b"second");
        assert!(!temp_dir.path().join(".page.txt.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file(Path::new("out/fr/page.txt"), b"x").unwrap();
        assert!(temp_dir.path().join("out/fr/page.txt").is_file());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(!storage.exists(Path::new("missing.csv")));
        let err = storage.read_file(Path::new("missing.csv")).unwrap_err();
        assert!(matches!(err, DrdError::MissingFile { .. }));
    }

    #[test]
    fn test_absolute_paths_ignore_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new("does-not-matter");
        let path = temp_dir.path().join("abs.txt");

        storage.write_file(&path, b"abs").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abs");
    }
}
