//! Answer engine provider implementations.

pub mod http;
pub mod lexical;

pub use http::HttpAnswerEngine;
pub use lexical::LexicalEngine;
