//! Split command handler.

use clap::Args;
use docqa_answer::split_compound;
use docqa_core::AppResult;

/// Show how a question is split into sub-questions
#[derive(Args, Debug)]
pub struct SplitCommand {
    /// The question to split
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SplitCommand {
    pub fn execute(&self) -> AppResult<()> {
        let parts = split_compound(&self.question);
        tracing::debug!("Split {:?} into {} part(s)", self.question, parts.len());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&parts)?);
        } else {
            for part in parts {
                println!("{}", part);
            }
        }

        Ok(())
    }
}
