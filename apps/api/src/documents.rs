//! Résumé / job-description file decoding. PDF via pdf-extract, Word (.docx) via
//! docx-rs, plain text as UTF-8. Legacy binary `.doc` is not readable.
//! Parsing is CPU-bound: async callers go through `extract_text_blocking`.

use std::path::Path;

use thiserror::Error;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Unsupported file format '{0}'. Please upload PDF, DOCX or TXT files.")]
    Unsupported(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read Word document: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8")]
    Encoding,

    #[error("No text could be extracted from {0}")]
    Empty(String),
}

fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

pub fn is_supported(filename: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension(filename).as_str())
}

/// Decodes an uploaded file to text. The result is trimmed and never empty.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, DocumentError> {
    let text = match extension(filename).as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?,
        "docx" => docx_text(data)?,
        "txt" => String::from_utf8(data.to_vec()).map_err(|_| DocumentError::Encoding)?,
        other => return Err(DocumentError::Unsupported(other.to_string())),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(DocumentError::Empty(filename.to_string()));
    }
    Ok(text.to_string())
}

/// Concatenates run text paragraph by paragraph, one line per paragraph.
fn docx_text(data: &[u8]) -> Result<String, DocumentError> {
    let docx = docx_rs::read_docx(data).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. A panic inside a parser is
/// reported as a `DocumentError::Pdf`.
pub async fn extract_text_blocking(filename: String, data: Vec<u8>) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_text(&filename, &data))
        .await
        .map_err(|e| DocumentError::Pdf(format!("parser aborted: {e}")))?
}
