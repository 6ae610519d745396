//! Condition extractor adapters.

mod keyword;
mod scripted;

pub use keyword::KeywordExtractor;
pub use scripted::{ScriptedExtractor, ScriptedFailure};
