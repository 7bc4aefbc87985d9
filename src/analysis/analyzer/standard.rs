//! Standard analyzer used for both indexing and query parsing.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (or WhitespaceTokenizer)
//! 2. LowercaseFilter
//! 3. StripFilter (splits on punctuation, drops apostrophes)
//! 4. StopFilter (only when enabled)
//! 5. StemFilter (only when enabled)
//! 6. RemoveEmptyFilter
//!
//! # Examples
//!
//! ```
//! use sift::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Hello, don't PANIC").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "dont");
//! assert_eq!(tokens[2].text, "panic");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::config::{AnalyzerConfig, TokenizerKind};
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{
    LowercaseFilter, RemoveEmptyFilter, StemFilter, StopFilter, StripFilter,
};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// The analyzer every index uses unless configured otherwise.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
    config: AnalyzerConfig,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings (no stop words).
    pub fn new() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    /// Create a standard analyzer that also removes English stop words.
    pub fn with_stop_words() -> Self {
        Self::from_config(&AnalyzerConfig::default().with_stop_words(true))
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        };

        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StripFilter::new()));
        if config.stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }
        if config.stemming {
            analyzer = analyzer.add_filter(Arc::new(StemFilter::new()));
        }
        let analyzer = analyzer
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("standard");

        StandardAnalyzer {
            inner: analyzer,
            config: config.clone(),
        }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
