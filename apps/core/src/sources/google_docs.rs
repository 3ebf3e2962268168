//! Google Docs source: reads a shared document through its plain-text export.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

use super::ContentSource;
use crate::error::AppError;

static DOCUMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/document/d/([A-Za-z0-9_-]+)").expect("Invalid regex: document id")
});

/// Pull the document id out of a `docs.google.com/document/d/<id>/...` URL.
pub fn document_id(source: &str) -> Option<String> {
    let url = Url::parse(source).ok()?;
    if url.host_str() != Some("docs.google.com") {
        return None;
    }
    DOCUMENT_ID
        .captures(url.path())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reads Google Docs shared with "anyone with the link"
pub struct GoogleDocsSource {
    client: Client,
    base_url: String,
}

impl GoogleDocsSource {
    /// `base_url` is normally `https://docs.google.com`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Plain-text export URL for a document id.
    pub fn export_url(&self, id: &str) -> String {
        format!("{}/document/d/{}/export?format=txt", self.base_url, id)
    }
}

#[async_trait]
impl ContentSource for GoogleDocsSource {
    fn name(&self) -> &'static str {
        "google_docs"
    }

    fn accepts(&self, source: &str) -> bool {
        document_id(source).is_some()
    }

    async fn fetch_content(&self, source: &str) -> Result<String, AppError> {
        let id = document_id(source)
            .ok_or_else(|| AppError::UnsupportedSource(format!("Not a Google Docs URL: {}", source)))?;

        let response = self.client.get(self.export_url(&id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Google Docs export of {} failed with status {}", id, status);
            return Err(AppError::Fetch(format!(
                "Google Docs export failed with status {} (is the document shared publicly?)",
                status
            )));
        }

        // exports start with a byte-order mark
        let text = response.text().await?;
        let text = text.trim_start_matches('\u{feff}').trim().to_string();
        if text.is_empty() {
            return Err(AppError::Fetch(format!("Google Doc {} is empty", id)));
        }
        Ok(text)
    }
}
