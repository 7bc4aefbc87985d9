use serde::{Deserialize, Serialize};

/// Which tokenizer the standard analyzer starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Unicode word boundaries (UAX #29).
    #[default]
    UnicodeWord,
    /// Whitespace only; punctuation is removed by the strip filter.
    Whitespace,
}

/// Options for building a [`StandardAnalyzer`](super::StandardAnalyzer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tokenizer at the head of the pipeline.
    pub tokenizer: TokenizerKind,

    /// Drop English stop words after lowercasing.
    pub stop_words: bool,

    /// Reduce words to their Porter stem, so `walked` matches `walking`.
    pub stemming: bool,
}

impl AnalyzerConfig {
    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.stop_words = enabled;
        self
    }

    pub fn with_stemming(mut self, enabled: bool) -> Self {
        self.stemming = enabled;
        self
    }
}
