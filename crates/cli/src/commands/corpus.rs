//! Corpus command handler.
//!
//! Reports what the text source extracted from the documents folder.

use clap::Args;
use docqa_answer::{chunker::chunk_count, extract_folder, Corpus};
use docqa_core::{config::AppConfig, AppResult};
use std::num::NonZeroUsize;

/// Show what was extracted from the documents folder
#[derive(Args, Debug)]
pub struct CorpusCommand {
    /// Print the extracted text instead of the summary
    #[arg(long, conflicts_with = "json")]
    pub dump: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CorpusCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing corpus command");

        let chunk_size = config.chunk_size()?;
        let corpus = extract_folder(&config.docs_path())?;

        if self.dump {
            println!("{}", corpus.text());
        } else if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary_json(&corpus, chunk_size))?
            );
        } else {
            print_summary(&corpus, chunk_size);
        }

        Ok(())
    }
}

fn summary_json(corpus: &Corpus, chunk_size: NonZeroUsize) -> serde_json::Value {
    serde_json::json!({
        "documents": corpus.documents(),
        "skipped": corpus.skipped(),
        "characters": corpus.char_count(),
        "chunkSize": chunk_size.get(),
        "chunks": chunk_count(corpus.text(), chunk_size),
    })
}

fn print_summary(corpus: &Corpus, chunk_size: NonZeroUsize) {
    for doc in corpus.documents() {
        println!(
            "  {:<10} {:>10}  {}",
            doc.kind.as_str(),
            doc.chars,
            doc.path.display()
        );
    }

    for skipped in corpus.skipped() {
        println!("  {:<10} {:>10}  {} ({})", "skipped", "-", skipped.path.display(), skipped.reason);
    }

    println!();
    println!("Documents:  {}", corpus.documents().len());
    println!("Skipped:    {}", corpus.skipped().len());
    println!("Characters: {}", corpus.char_count());
    println!(
        "Chunks:     {} (size: {})",
        chunk_count(corpus.text(), chunk_size),
        chunk_size
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_counts_chunks() {
        let corpus = Corpus::from_text("a".repeat(9));
        let json = summary_json(&corpus, NonZeroUsize::new(4).unwrap());

        assert_eq!(json["characters"], 9);
        assert_eq!(json["chunks"], 3);
        assert_eq!(json["chunkSize"], 4);
        assert_eq!(json["documents"], serde_json::json!([]));
    }
}
