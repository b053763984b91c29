//! Document text extraction.

use docqa_core::{AppError, AppResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Document kind, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Markdown,
    Html,
    PlainText,
    Unsupported,
}

impl DocumentKind {
    /// Detect document kind from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("html") | Some("htm") => Self::Html,
            Some("txt") => Self::PlainText,
            _ => Self::Unsupported,
        }
    }

    /// Whether text can be extracted from this kind.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::PlainText => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Extract the text of one document.
pub fn parse_file(path: &Path) -> AppResult<String> {
    match DocumentKind::from_path(path) {
        DocumentKind::Pdf => extract_pdf(path),
        DocumentKind::Markdown => read_text(path).map(|raw| clean_markdown(&raw)),
        DocumentKind::Html => read_text(path).map(|raw| clean_html(&raw)),
        DocumentKind::PlainText => read_text(path),
        DocumentKind::Unsupported => Err(AppError::Source(format!(
            "Unsupported document type: {:?}",
            path
        ))),
    }
}

/// Extract the text layer of a PDF. Scanned pages without text yield nothing.
fn extract_pdf(path: &Path) -> AppResult<String> {
    pdf_extract::extract_text(path)
        .map_err(|e| AppError::Source(format!("Failed to extract PDF {:?}: {}", path, e)))
}

fn read_text(path: &Path) -> AppResult<String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Source(format!("Failed to read {:?}: {}", path, e)))?;

    if !is_likely_text(&raw) {
        return Err(AppError::Source(format!(
            "Binary content in text document: {:?}",
            path
        )));
    }

    Ok(raw)
}

/// Reduce markdown to its prose.
///
/// Block markers (headings, quotes, list bullets, rules) and inline markup
/// (emphasis, code ticks, link targets) are dropped. Fenced code keeps its
/// content verbatim. Blank lines are removed.
fn clean_markdown(text: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in text.lines().map(str::trim) {
        if line.starts_with("```") || line.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }

        let prose = if in_fence {
            line.to_string()
        } else if is_markdown_rule(line) {
            continue;
        } else {
            let body = line.trim_start_matches(|c: char| c == '#' || c == '>').trim_start();
            strip_inline_markup(strip_list_marker(body))
        };

        let prose = prose.trim();
        if !prose.is_empty() {
            lines.push(prose.to_string());
        }
    }

    lines.join("\n")
}

/// `---`, `***`, `___` and spaced variants like `* * *`.
fn is_markdown_rule(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !c.is_whitespace());
    match marks.next() {
        Some(first @ ('-' | '*' | '_')) => {
            let rest: Vec<char> = marks.collect();
            rest.len() >= 2 && rest.iter().all(|&c| c == first)
        }
        _ => false,
    }
}

fn strip_list_marker(line: &str) -> &str {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest;
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return rest;
        }
    }

    line
}

/// Drop emphasis and code ticks; `[text](url)` and `![alt](src)` keep only
/// the bracketed text.
fn strip_inline_markup(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' | '`' | '[' => {}
            '!' if chars.peek() == Some(&'[') => {}
            ']' => {
                if chars.peek() == Some(&'(') {
                    for skipped in chars.by_ref() {
                        if skipped == ')' {
                            break;
                        }
                    }
                }
            }
            _ => result.push(ch),
        }
    }

    result
}

/// Clean HTML by stripping tags, scripts and styles.
fn clean_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;

    for (i, ch) in text.char_indices() {
        if ch == '<' {
            in_tag = true;
            let rest = &text[i..];

            if starts_with_ignore_case(rest, "<script") {
                in_script = true;
            } else if starts_with_ignore_case(rest, "</script") {
                in_script = false;
            } else if starts_with_ignore_case(rest, "<style") {
                in_style = true;
            } else if starts_with_ignore_case(rest, "</style") {
                in_style = false;
            }
        } else if ch == '>' {
            in_tag = false;
        } else if !in_tag && !in_script && !in_style {
            result.push(ch);
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// Check if text is likely text (not binary).
fn is_likely_text(data: &str) -> bool {
    !data.contains('\0')
}
