//! Query system: parsing, phrase matching, scoring and result collection.

pub mod collector;
pub mod parser;
pub mod phrase;
#[allow(clippy::module_inception)]
pub mod query;
pub mod scorer;

pub use self::collector::{Collector, CountCollector, TopDocsCollector};
pub use self::parser::QueryParser;
pub use self::phrase::PhraseMatcher;
pub use self::query::{Clause, Query};
pub use self::scorer::{QueryScorer, ScoringConfig, idf};

use serde::{Deserialize, Serialize};

use crate::document::DocId;

/// A ranked document and its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The document ID.
    pub doc_id: DocId,
    /// The relevance score.
    pub score: f32,
}

/// How much one query clause contributed to a document's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseScore {
    /// The term, or the phrase in double quotes.
    pub clause: String,
    /// Contribution including the per-clause bonus.
    pub score: f32,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The hits on the requested page, best first.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents across all pages.
    pub total_hits: usize,
    /// Highest score among all matches, 0 when nothing matched.
    pub max_score: f32,
}

impl SearchResults {
    /// Document ids on this page, in rank order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.hits.iter().map(|hit| hit.doc_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
