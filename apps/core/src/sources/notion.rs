//! Notion source: reads the text blocks of a page through the Notion API.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

use super::ContentSource;
use crate::error::AppError;

const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;
/// Guards against a server that keeps returning `has_more`
const MAX_PAGES: usize = 50;

static PAGE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9a-fA-F]{8})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{12})$")
        .expect("Invalid regex: notion page id")
});

#[derive(Debug, Deserialize)]
struct BlockList {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Extract the 32-hex page id from a notion.so / notion.site URL.
pub fn page_id(source: &str) -> Option<String> {
    let url = Url::parse(source).ok()?;
    let host = url.host_str()?;
    let is_notion = ["notion.so", "notion.site"]
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)));
    if !is_notion {
        return None;
    }
    let path = url.path().trim_end_matches('/');
    let caps = PAGE_ID.captures(path)?;
    let id: String = (1..=5)
        .filter_map(|i| caps.get(i).map(|m| m.as_str()))
        .collect();
    Some(id.to_lowercase())
}

/// Concatenated `plain_text` of a block's rich text, if it has any.
fn block_text(block: &Value) -> Option<String> {
    let kind = block.get("type")?.as_str()?;
    let rich_text = block.get(kind)?.get("rich_text")?.as_array()?;
    let text: String = rich_text
        .iter()
        .filter_map(|span| span.get("plain_text").and_then(Value::as_str))
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Reads Notion pages shared with the configured integration
pub struct NotionSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NotionSource {
    /// `base_url` is normally `https://api.notion.com`.
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn fetch_blocks(&self, id: &str, token: &str, cursor: Option<&str>) -> Result<BlockList, AppError> {
        let mut request = self
            .client
            .get(format!("{}/v1/blocks/{}/children", self.base_url, id))
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Notion request for {} failed with status {}", id, status);
            return Err(AppError::Fetch(format!(
                "Notion request failed with status {}: {}",
                status, body
            )));
        }
        Ok(response.json::<BlockList>().await?)
    }
}

#[async_trait]
impl ContentSource for NotionSource {
    fn name(&self) -> &'static str {
        "notion"
    }

    fn accepts(&self, source: &str) -> bool {
        page_id(source).is_some()
    }

    async fn fetch_content(&self, source: &str) -> Result<String, AppError> {
        let id = page_id(source)
            .ok_or_else(|| AppError::UnsupportedSource(format!("Not a Notion page URL: {}", source)))?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Config("Notion token is not configured".to_string()))?;

        let mut paragraphs = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_PAGES {
            let page = self.fetch_blocks(&id, token, cursor.as_deref()).await?;
            paragraphs.extend(page.results.iter().filter_map(block_text));
            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Read {} text blocks from Notion page {}", paragraphs.len(), id);
        if paragraphs.is_empty() {
            return Err(AppError::Fetch(format!("Notion page {} has no text", id)));
        }
        Ok(paragraphs.join("\n\n"))
    }
}
