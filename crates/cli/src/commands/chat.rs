//! Chat command handler.
//!
//! Interactive loop: the corpus and engine are prepared once, then every line
//! read from stdin is answered until EOF or `exit`.

use super::render::{render_answer, EMPTY_QUESTION_WARNING};
use clap::Args;
use docqa_answer::{AskOutcome, QaSession};
use docqa_core::{config::AppConfig, AppResult};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Answer questions interactively
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Prompt shown before each question
    #[arg(long, default_value = "Ask your question: ")]
    pub prompt: String,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        eprintln!("Extracting text from {:?}...", config.docs_path());
        let session = QaSession::initialize(config)?;
        eprintln!(
            "Ready: {} documents, {} characters, engine '{}'. Type 'exit' to quit.",
            session.corpus().documents().len(),
            session.corpus().char_count(),
            session.engine_name()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}", self.prompt);
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            if is_exit_command(&line) {
                break;
            }

            match session.ask(&line).await {
                Ok(AskOutcome::EmptyQuestion) => println!("{}", EMPTY_QUESTION_WARNING),
                Ok(AskOutcome::Answered(report)) => println!("{}", render_answer(&report.answer)),
                // One failed question does not end the session
                Err(e) => {
                    tracing::error!("Question failed: {}", e);
                    println!("Error: {}", e);
                }
            }
        }

        Ok(())
    }
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}
