//! Fixed-size character chunking.

use std::num::NonZeroUsize;

/// Split text into consecutive, non-overlapping windows of `chunk_size`
/// characters.
///
/// Windows start at offset 0 and step by `chunk_size`; the last one holds
/// whatever remains. Concatenating the windows gives back `text`, and every
/// boundary falls on a character boundary. Empty text yields no chunks.
pub fn chunk_text(text: &str, chunk_size: NonZeroUsize) -> Vec<&str> {
    let size = chunk_size.get();
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Number of chunks [`chunk_text`] would produce.
pub fn chunk_count(text: &str, chunk_size: NonZeroUsize) -> usize {
    text.chars().count().div_ceil(chunk_size.get())
}
