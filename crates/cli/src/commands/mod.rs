//! Command handlers for the docqa CLI.

pub mod ask;
pub mod chat;
pub mod corpus;
pub mod render;
pub mod split;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use corpus::CorpusCommand;
pub use split::SplitCommand;
