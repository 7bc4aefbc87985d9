//! Pipeline analyzer: one tokenizer followed by a chain of filters.

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer that runs a tokenizer and then each filter in order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use sift::analysis::analyzer::{Analyzer, PipelineAnalyzer};
/// use sift::analysis::token_filter::LowercaseFilter;
/// use sift::analysis::tokenizer::WhitespaceTokenizer;
///
/// let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
///     .add_filter(Arc::new(LowercaseFilter::new()));
///
/// let tokens: Vec<_> = analyzer.analyze("Hello World").unwrap().collect();
/// assert_eq!(tokens[1].text, "world");
/// ```
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// The descriptive name given at construction.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::{LowercaseFilter, RemoveEmptyFilter, StripFilter};
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    #[test]
    fn test_pipeline_applies_filters_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StripFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("test_pipeline");

        let tokens: Vec<Token> = analyzer.analyze("Yo, -- What's UP?").unwrap().collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["yo", "whats", "up"]);
        assert_eq!(analyzer.pipeline_name(), "test_pipeline");
        assert_eq!(analyzer.filters().len(), 3);
    }

    #[test]
    fn test_terms_have_dense_positions() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(StripFilter::new()));

        let terms = analyzer.terms("a -- b").unwrap();
        let positions: Vec<u32> = terms.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![0, 1]);
    }
}
