//! Web page source: downloads a page and reduces its HTML to readable text.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node};
use tracing::{debug, warn};
use url::Url;

use super::ContentSource;
use crate::error::AppError;

/// Elements whose text is never shown to a reader
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template", "svg"];

/// Elements that start a new paragraph
const BLOCK_ELEMENTS: &[&str] = &[
    "html", "body", "main", "article", "section", "header", "footer", "nav", "aside", "div", "p",
    "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl", "dt", "dd", "blockquote", "pre",
    "table", "tr", "td", "th", "figure", "figcaption",
];

fn is_element_in(node: &Node, names: &[&str]) -> bool {
    node.as_element().is_some_and(|e| names.contains(&e.name()))
}

/// Push the collapsed `current` text as a paragraph, if it has any.
fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    let paragraph = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
    current.clear();
}

/// Reduce an HTML document to plain text, one paragraph per block element.
///
/// Entities are decoded by the parser. Paragraphs are separated by a blank
/// line so flashcard segmentation can split on them.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_block = None;

    for node in document.root_element().descendants() {
        match node.value() {
            Node::Element(element) if element.name() == "br" => {
                flush(&mut current, &mut paragraphs);
            }
            Node::Text(text) => {
                if node.ancestors().any(|a| is_element_in(a.value(), SKIPPED_ELEMENTS)) {
                    continue;
                }
                let block = node
                    .ancestors()
                    .find(|a| is_element_in(a.value(), BLOCK_ELEMENTS))
                    .map(|a| a.id());
                if block != current_block {
                    flush(&mut current, &mut paragraphs);
                    current_block = block;
                }
                current.push_str(text);
            }
            _ => {}
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs.join("\n\n")
}

/// Reads http(s) URLs
pub struct WebPageSource {
    client: Client,
}

impl WebPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentSource for WebPageSource {
    fn name(&self) -> &'static str {
        "web"
    }

    fn accepts(&self, source: &str) -> bool {
        Url::parse(source)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    async fn fetch_content(&self, source: &str) -> Result<String, AppError> {
        let url = Url::parse(source)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} failed with status {}", source, status);
            return Err(AppError::Fetch(format!(
                "Request to {} failed with status {}",
                source, status
            )));
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("html"))
            .unwrap_or(true);
        let body = response.text().await?;

        let text = if is_html { html_to_text(&body) } else { body.trim().to_string() };
        if text.is_empty() {
            return Err(AppError::Fetch(format!("No readable text at {}", source)));
        }

        debug!("Fetched {} characters from {}", text.len(), source);
        Ok(text)
    }
}
