//! # Sift
//!
//! A small in-memory full-text search core.
//!
//! ## Features
//!
//! - Unicode-aware text analysis pipeline
//! - Inverted index with positional postings and incremental add/remove
//! - Quoted phrase and bare word queries
//! - tf-idf ranking with a phrase bonus and a per-clause coverage bonus
//! - Concurrent reads with `parking_lot` locks
//! - Checksummed binary snapshots over pluggable storage
//!
//! ## Example
//!
//! ```
//! use sift::prelude::*;
//!
//! # fn main() -> sift::error::Result<()> {
//! let index = SearchIndex::new(IndexConfig::default())?;
//! index.add(1, [("title", "The quick brown fox")])?;
//! index.add(2, [("title", "A fox, quick and brown")])?;
//!
//! let searcher = Searcher::new(index);
//! let results = searcher.search("\"quick brown fox\"", 1, 10)?;
//! assert_eq!(results.doc_ids(), vec![1]);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::{Analyzer, StandardAnalyzer, Term, tokenize};
    pub use crate::document::{DocId, Document};
    pub use crate::error::{Result, SiftError};
    pub use crate::index::{IndexConfig, SearchIndex};
    pub use crate::query::{
        Clause, ClauseScore, Query, QueryParser, ScoringConfig, SearchHit, SearchResults,
    };
    pub use crate::search::{SearchConfig, Searcher};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
