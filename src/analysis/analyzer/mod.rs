//! Analyzer implementations that combine tokenizers and filters.

#[allow(clippy::module_inception)]
mod analyzer;
mod config;
mod pipeline;
mod standard;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, TokenizerKind};
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
