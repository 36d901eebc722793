//! Input manager for loading query and candidate files from disk
//!
//! The scoring pipeline works on in-memory uploads; this is the thin disk
//! boundary used by the CLI.

use crate::error::{MatcherError, Result};
use crate::processing::matcher::DocumentUpload;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read the query document (job description) as UTF-8 text.
    pub async fn load_query(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        info!("Reading job description: {}", path.display());
        Ok(fs::read_to_string(path).await?)
    }

    /// Read a candidate file into an upload; the filename carries the
    /// declared format.
    pub async fn load_document(&self, path: &Path) -> Result<DocumentUpload> {
        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                MatcherError::InvalidInput(format!("Invalid file name: {}", path.display()))
            })?
            .to_string();

        info!("Loading candidate document: {}", path.display());
        let bytes = fs::read(path).await?;
        Ok(DocumentUpload { filename, bytes })
    }

    pub async fn load_documents(&self, paths: &[PathBuf]) -> Result<Vec<DocumentUpload>> {
        let mut uploads = Vec::with_capacity(paths.len());
        for path in paths {
            uploads.push(self.load_document(path).await?);
        }
        Ok(uploads)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_document_with_filename_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidate.txt");
        std::fs::write(&path, "experienced rust developer").unwrap();

        let upload = InputManager::new().load_document(&path).await.unwrap();
        assert_eq!(upload.filename, "candidate.txt");
        assert_eq!(upload.bytes, b"experienced rust developer");
    }

    #[tokio::test]
    async fn missing_file_is_invalid_input() {
        let result = InputManager::new()
            .load_document(Path::new("does/not/exist.txt"))
            .await;
        assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
    }
}
