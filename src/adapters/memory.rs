use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 記憶體內的儲存實作，複製後共用同一份內容
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.with_bytes(path, content.as_bytes().to_vec())
    }

    pub fn with_bytes(self, path: &str, data: Vec<u8>) -> Self {
        self.lock().insert(path.to_string(), data);
        self
    }

    pub fn get_file(&self, path: &str) -> Option<String> {
        self.lock()
            .get(path)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // 鎖只在單一呼叫內持有，中毒時沿用內部資料
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.lock().get(path).cloned().ok_or_else(|| {
            ReservationError::from_io(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ),
            )
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.lock().insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.lock()
            .entry(path.to_string())
            .or_default()
            .extend_from_slice(data);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        PathBuf::from(path)
    }
}
