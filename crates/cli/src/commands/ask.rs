//! Ask command handler.
//!
//! Answers one question against the documents folder.

use super::render::{answer_json, render_answer, EMPTY_QUESTION_WARNING};
use clap::Args;
use docqa_answer::{AskOutcome, QaSession};
use docqa_core::{config::AppConfig, AppResult};

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        // Empty questions are rejected before any extraction or engine work
        if self.question.trim().is_empty() {
            eprintln!("{}", EMPTY_QUESTION_WARNING);
            return Ok(());
        }

        let session = QaSession::initialize(config)?;

        match session.ask(&self.question).await? {
            AskOutcome::EmptyQuestion => eprintln!("{}", EMPTY_QUESTION_WARNING),
            AskOutcome::Answered(report) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&answer_json(&report))?);
                } else {
                    println!("{}", render_answer(&report.answer));
                }
            }
        }

        Ok(())
    }
}
