//! Synchronous hierarchical rule extraction from word-aligned sentences with
//! one source and any number of target streams.

pub mod align;
pub mod config;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod hiero;
pub mod parse;
pub mod phrase;
pub mod render;
pub mod span;

pub use config::{ExtractorConfig, NontermStyle};
pub use driver::{process_lines, DriverStats};
pub use error::ExtractError;
pub use extractor::RuleExtractor;
pub use hiero::{Rule, WeightedRule};
pub use parse::SentenceTuple;
pub use span::{Phrase, Span};
