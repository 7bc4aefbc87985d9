//! Core analyzer trait definition.
//!
//! Analyzers are the complete text processing pipeline used for both
//! documents and queries:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Terms
//! ```
//!
//! Indexing and query parsing must go through the same analyzer, otherwise a
//! query term can never equal an indexed term.

use crate::analysis::term::Term;
use crate::analysis::token::TokenStream;
use crate::error::Result;

pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;

    /// Analyze `text` into terms with dense positions.
    ///
    /// Positions count surviving tokens only, so a removed stop word does
    /// not leave a hole between its neighbours.
    fn terms(&self, text: &str) -> Result<Vec<(Term, u32)>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .enumerate()
            .map(|(position, token)| (Term::from(token.text), position as u32))
            .collect())
    }
}
