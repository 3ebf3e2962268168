//! Local file source: uploaded documents read from disk.

use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

use super::ContentSource;
use crate::error::AppError;
use crate::text_extract::extract_text_from_file;

/// Reads local files (plain path or `file://` URL)
#[derive(Debug, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    fn resolve(source: &str) -> Option<PathBuf> {
        if let Ok(url) = Url::parse(source) {
            if url.scheme() == "file" {
                return url.to_file_path().ok();
            }
            // drive letters such as `C:\notes.txt` parse as a URL scheme
            if url.scheme().len() > 1 {
                return None;
            }
        }
        Some(PathBuf::from(source))
    }
}

#[async_trait]
impl ContentSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn accepts(&self, source: &str) -> bool {
        Self::resolve(source).map(|p| p.is_file()).unwrap_or(false)
    }

    async fn fetch_content(&self, source: &str) -> Result<String, AppError> {
        let path = Self::resolve(source)
            .ok_or_else(|| AppError::UnsupportedSource(source.to_string()))?;
        let data = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        extract_text_from_file(file_name, &data)
    }
}
