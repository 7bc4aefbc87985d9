//! Normalized search terms.

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::Result;

/// A normalized token: lowercased, non-alphanumerics stripped.
///
/// Terms are produced by an [`Analyzer`]; constructing one by hand does not
/// normalize it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Term(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term(text)
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term(text.to_string())
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static DEFAULT_ANALYZER: LazyLock<StandardAnalyzer> = LazyLock::new(StandardAnalyzer::new);

/// Split `text` into `(term, position)` pairs with the default analyzer.
///
/// Empty input yields an empty vector.
///
/// ```
/// use sift::analysis::tokenize;
///
/// let terms = tokenize("The quick, quick FOX!").unwrap();
/// let texts: Vec<&str> = terms.iter().map(|(t, _)| t.as_str()).collect();
/// assert_eq!(texts, vec!["the", "quick", "quick", "fox"]);
/// assert_eq!(terms[3].1, 3);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<(Term, u32)>> {
    DEFAULT_ANALYZER.terms(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_deterministic() {
        let first = tokenize("Hello, World").unwrap();
        let second = tokenize("Hello, World").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![(Term::from("hello"), 0), (Term::from("world"), 1)]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let texts = |text: &str| -> Vec<String> {
            tokenize(text)
                .unwrap()
                .into_iter()
                .map(|(t, _)| t.into_string())
                .collect()
        };

        assert_eq!(texts("quick.fox"), vec!["quick", "fox"]);
        assert_eq!(texts("mail:support"), vec!["mail", "support"]);
        assert_eq!(texts("see www.example.com"), vec!["see", "www", "example", "com"]);
        assert_eq!(texts("Don't"), vec!["dont"]);
        assert_eq!(tokenize("quick.fox").unwrap()[1].1, 1);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_term_borrow_as_str() {
        let mut set = std::collections::HashSet::new();
        set.insert(Term::from("fox"));
        assert!(set.contains("fox"));
    }
}
