//! Document folder text source.
//!
//! Reads every supported document at the top level of a folder, in
//! directory-listing order, and concatenates the extracted text into one
//! [`Corpus`]. The corpus is built once per process and read-only afterwards.

use crate::parser::{self, DocumentKind};
use docqa_core::{AppError, AppResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document whose text made it into the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Characters contributed to the corpus
    pub chars: usize,
}

/// A supported document that could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Extracted text of a document folder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    #[serde(skip)]
    text: String,
    documents: Vec<DocumentRecord>,
    skipped: Vec<SkippedDocument>,
}

impl Corpus {
    /// Build a corpus directly from text (no backing documents).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// The full concatenated text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Documents that contributed text, in reading order.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    /// Supported documents that failed to extract.
    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    /// Number of characters in the corpus.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Extract and concatenate the text of all supported documents in `folder`.
///
/// Only the top level is read; sub-directories and unsupported files are
/// ignored. Documents that fail to extract are skipped and recorded. Texts
/// are joined with no separator.
pub fn extract_folder(folder: &Path) -> AppResult<Corpus> {
    if !folder.is_dir() {
        return Err(AppError::Source(format!(
            "Documents folder does not exist: {:?}",
            folder
        )));
    }

    tracing::info!("Extracting text from {:?}", folder);

    let mut corpus = Corpus::default();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            AppError::Source(format!("Failed to list {:?}: {}", folder, e))
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        let kind = DocumentKind::from_path(path);
        if !kind.is_supported() {
            tracing::debug!("Ignoring unsupported file: {:?}", path);
            continue;
        }

        match parser::parse_file(path) {
            Ok(text) => {
                let chars = text.chars().count();
                tracing::debug!("Extracted {} characters from {:?}", chars, path);
                corpus.text.push_str(&text);
                corpus.documents.push(DocumentRecord {
                    path: path.to_path_buf(),
                    kind,
                    chars,
                });
            }
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                corpus.skipped.push(SkippedDocument {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Extracted {} characters from {} documents ({} skipped)",
        corpus.char_count(),
        corpus.documents.len(),
        corpus.skipped.len()
    );

    Ok(corpus)
}
