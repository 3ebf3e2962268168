//! Text extraction for uploaded documents
//! Supports: TXT, MD, CSV, JSON, PDF, DOCX

use tracing::{info, warn};

use crate::error::AppError;

/// Document formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

/// Work out the document kind from the file extension, sniffing the content
/// with `infer` when the extension is missing or unknown.
pub fn detect_kind(file_name: &str, file_data: &[u8]) -> Option<DocumentKind> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "md" | "csv" | "json" => return Some(DocumentKind::PlainText),
        "pdf" => return Some(DocumentKind::Pdf),
        "docx" => return Some(DocumentKind::Docx),
        _ => {}
    }

    match infer::get(file_data).map(|t| t.mime_type()) {
        Some("application/pdf") => Some(DocumentKind::Pdf),
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
            Some(DocumentKind::Docx)
        }
        Some(_) => None,
        // no magic bytes: accept it if it decodes as text without NULs
        None => std::str::from_utf8(file_data)
            .ok()
            .filter(|s| !s.contains('\0'))
            .map(|_| DocumentKind::PlainText),
    }
}

/// Extract text content from file data based on its detected kind
pub fn extract_text_from_file(file_name: &str, file_data: &[u8]) -> Result<String, AppError> {
    let kind = detect_kind(file_name, file_data)
        .ok_or_else(|| AppError::UnsupportedSource(format!("Unsupported file type: {}", file_name)))?;

    info!("Extracting text from file: {} ({:?})", file_name, kind);

    match kind {
        DocumentKind::PlainText => String::from_utf8(file_data.to_vec())
            .map_err(|e| AppError::Validation(format!("Invalid UTF-8 content: {}", e))),
        DocumentKind::Pdf => extract_pdf_text(file_data),
        DocumentKind::Docx => extract_docx_text(file_data),
    }
}

/// Extract text from PDF file
fn extract_pdf_text(file_data: &[u8]) -> Result<String, AppError> {
    match pdf_extract::extract_text_from_mem(file_data) {
        Ok(text) => {
            let cleaned = clean_extracted_text(&text);
            info!("PDF extraction successful: {} characters", cleaned.len());
            Ok(cleaned)
        }
        Err(e) => {
            warn!("PDF extraction failed: {}", e);
            Err(AppError::Validation(format!("Failed to extract PDF text: {}", e)))
        }
    }
}

/// Extract text from DOCX file, one paragraph per block
fn extract_docx_text(file_data: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(file_data).map_err(|e| {
        warn!("DOCX extraction failed: {}", e);
        AppError::Validation(format!("Failed to extract DOCX text: {}", e))
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .into_iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(&para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    // keep blank lines between paragraphs so flashcards can segment on them
    let text = paragraphs.join("\n\n");
    info!("DOCX extraction successful: {} characters", text.len());
    Ok(text)
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|pc| match pc {
            docx_rs::ParagraphChild::Run(run) => Some(
                run.children
                    .iter()
                    .filter_map(|rc| match rc {
                        docx_rs::RunChild::Text(t) => Some(t.text.as_str()),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect()
}

/// Trim every line and collapse runs of blank lines into one paragraph break
pub fn clean_extracted_text(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs.join("\n\n")
}
