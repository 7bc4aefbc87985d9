//! Text analysis: tokenizers, token filters and analyzers.
//!
//! The same analyzer normalizes document text at index time and query text at
//! search time, so both sides agree on what a [`Term`] is.

pub mod analyzer;
pub mod term;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, AnalyzerConfig, PipelineAnalyzer, StandardAnalyzer, TokenizerKind};
pub use term::{Term, tokenize};
pub use token::{Token, TokenStream};
