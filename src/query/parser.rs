//! Query parser for converting search strings to [`Query`] values.
//!
//! Supported syntax is deliberately small:
//!
//! - Bare words: `quick fox`
//! - Phrases: `"quick brown fox"`
//!
//! An unterminated quote runs to the end of the input. Nothing is ever a
//! syntax error.

use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::Arc;

use log::trace;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::{Result, SiftError};
use crate::query::query::{Clause, Query};

/// Parses search strings using the same analyzer as the index.
#[derive(Clone)]
pub struct QueryParser {
    analyzer: Arc<dyn Analyzer>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(Arc::new(StandardAnalyzer::new()))
    }
}

impl QueryParser {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        QueryParser { analyzer }
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Parse a query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::query::{Clause, QueryParser};
    ///
    /// let parser = QueryParser::default();
    /// let query = parser.parse(r#"Fox "quick  brown" fox"#).unwrap();
    ///
    /// assert_eq!(query.len(), 2);
    /// assert!(matches!(&query.clauses()[1], Clause::Phrase(terms) if terms.len() == 2));
    /// ```
    pub fn parse(&self, query_str: &str) -> Result<Query> {
        let mut query = Query::new();

        for group in QueryStringParser::new(query_str) {
            let terms = self.analyzer.terms(group.text())?;
            match group {
                Group::Word(_) => {
                    for (term, _) in terms {
                        query.push(Clause::Term(term));
                    }
                }
                Group::Quoted(_) => {
                    query.push(Clause::Phrase(
                        terms.into_iter().map(|(term, _)| term).collect(),
                    ));
                }
            }
        }

        trace!("parsed {query_str:?} into [{query}]");
        Ok(query)
    }

    /// Parse raw query bytes, which must be valid UTF-8.
    pub fn parse_bytes(&self, query_bytes: &[u8]) -> Result<Query> {
        let query_str = std::str::from_utf8(query_bytes)
            .map_err(|e| SiftError::invalid_query(format!("query is not valid UTF-8: {e}")))?;
        self.parse(query_str)
    }
}

impl std::fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParser")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

/// A raw, not yet analyzed piece of the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group<'a> {
    Word(&'a str),
    Quoted(&'a str),
}

impl<'a> Group<'a> {
    fn text(&self) -> &'a str {
        match self {
            Group::Word(text) | Group::Quoted(text) => text,
        }
    }
}

/// Splits on whitespace while keeping double-quoted groups together.
struct QueryStringParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> QueryStringParser<'a> {
    fn new(input: &'a str) -> Self {
        QueryStringParser {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
    }

    fn parse_quoted(&mut self, open: usize) -> Group<'a> {
        let start = open + '"'.len_utf8();
        for (pos, ch) in self.chars.by_ref() {
            if ch == '"' {
                return Group::Quoted(&self.input[start..pos]);
            }
        }
        Group::Quoted(&self.input[start..])
    }

    fn parse_word(&mut self, start: usize) -> Group<'a> {
        let mut end = self.input.len();
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '"' {
                end = pos;
                break;
            }
            self.chars.next();
        }
        Group::Word(&self.input[start..end])
    }
}

impl<'a> Iterator for QueryStringParser<'a> {
    type Item = Group<'a>;

    fn next(&mut self) -> Option<Group<'a>> {
        self.skip_whitespace();
        let (start, ch) = self.chars.next()?;
        if ch == '"' {
            Some(self.parse_quoted(start))
        } else {
            Some(self.parse_word(start))
        }
    }
}
