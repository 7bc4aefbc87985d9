//! Thread-safe index handle.

use std::sync::Arc;

use log::debug;
use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::document::{DocId, Document};
use crate::error::Result;
use crate::index::config::IndexConfig;
use crate::index::inverted::{DocumentPostings, IndexStats, InvertedIndex};
use crate::index::posting::Posting;
use crate::index::snapshot;
use crate::storage::Storage;

/// A shareable, concurrently readable full-text index.
///
/// Writers (`add`, `remove`, `clear`) hold the write lock for the whole
/// mutation, so readers always see a document either entirely or not at all.
/// Text analysis runs before the lock is taken. Clones share the same index.
///
/// # Examples
///
/// ```
/// use sift::index::{IndexConfig, SearchIndex};
///
/// # fn main() -> sift::error::Result<()> {
/// let index = SearchIndex::new(IndexConfig::default())?;
/// index.add(1, [("body", "the quick fox")])?;
/// index.add(2, [("body", "the lazy dog")])?;
///
/// assert_eq!(index.total_documents(), 2);
/// assert_eq!(index.document_frequency("the"), 2);
/// assert!(index.remove(1));
/// assert!(!index.remove(1));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SearchIndex {
    inner: Arc<RwLock<InvertedIndex>>,
    config: Arc<IndexConfig>,
    analyzer: Arc<dyn Analyzer>,
}

impl SearchIndex {
    /// Create an empty index using the standard analyzer described by `config`.
    pub fn new(config: IndexConfig) -> Result<Self> {
        let analyzer = Arc::new(StandardAnalyzer::from_config(&config.analyzer));
        Self::with_analyzer(config, analyzer)
    }

    /// Create an empty index with a custom analyzer.
    pub fn with_analyzer(config: IndexConfig, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        Self::from_parts(config, analyzer, InvertedIndex::new())
    }

    fn from_parts(
        config: IndexConfig,
        analyzer: Arc<dyn Analyzer>,
        index: InvertedIndex,
    ) -> Result<Self> {
        config.validate()?;
        Ok(SearchIndex {
            inner: Arc::new(RwLock::new(index)),
            config: Arc::new(config),
            analyzer,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Index `fields` under `doc_id`, replacing any earlier version.
    ///
    /// Returns `true` if an earlier version was replaced. On error the index
    /// is left untouched.
    pub fn add<I, N, V>(&self, doc_id: DocId, fields: I) -> Result<bool>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let postings =
            DocumentPostings::build(doc_id, fields, &self.config, self.analyzer.as_ref())?;
        let terms = postings.term_count();

        let replaced = self.inner.write().apply(postings);
        debug!("indexed document {doc_id}: {terms} terms, replaced={replaced}");
        Ok(replaced)
    }

    pub fn add_document(&self, document: &Document) -> Result<bool> {
        self.add(
            document.id(),
            document
                .fields()
                .iter()
                .map(|f| (f.name.as_str(), f.value.as_str())),
        )
    }

    /// Index a batch of documents.
    ///
    /// Documents are analyzed in parallel and applied under a single write
    /// lock; if any document fails to analyze, none are applied.
    pub fn add_documents(&self, documents: &[Document]) -> Result<usize> {
        let built = documents
            .par_iter()
            .map(|document| {
                DocumentPostings::build(
                    document.id(),
                    document
                        .fields()
                        .iter()
                        .map(|f| (f.name.as_str(), f.value.as_str())),
                    &self.config,
                    self.analyzer.as_ref(),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let count = built.len();
        let mut index = self.inner.write();
        for postings in built {
            index.apply(postings);
        }
        debug!("indexed batch of {count} documents");
        Ok(count)
    }

    /// Remove every posting of `doc_id`.
    ///
    /// Removing an id that was never added is a no-op returning `false`.
    pub fn remove(&self, doc_id: DocId) -> bool {
        let removed = self.inner.write().remove(doc_id);
        if removed {
            debug!("removed document {doc_id}");
        } else {
            debug!("remove of unknown document {doc_id} ignored");
        }
        removed
    }

    /// Postings of an already normalized term; empty if unknown.
    pub fn postings_for(&self, term: &str) -> Vec<Posting> {
        self.inner.read().postings_for(term)
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.inner.read().document_frequency(term)
    }

    pub fn total_documents(&self) -> usize {
        self.inner.read().total_documents()
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.inner.read().contains(doc_id)
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Hold a consistent read view for the duration of a search.
    pub fn read(&self) -> RwLockReadGuard<'_, InvertedIndex> {
        self.inner.read()
    }

    /// Persist a snapshot under `name`, returning its size in bytes.
    pub fn save(&self, storage: &dyn Storage, name: &str) -> Result<u64> {
        let index = self.inner.read();
        let size = snapshot::write(storage, name, &self.config, &index)?;
        debug!("saved snapshot {name:?} ({size} bytes, {} documents)", index.total_documents());
        Ok(size)
    }

    /// Restore an index from the snapshot stored under `name`.
    ///
    /// The analyzer is rebuilt from the stored configuration.
    pub fn load(storage: &dyn Storage, name: &str) -> Result<Self> {
        let (config, index) = snapshot::read(storage, name)?;
        debug!("loaded snapshot {name:?} ({} documents)", index.total_documents());
        let analyzer = Arc::new(StandardAnalyzer::from_config(&config.analyzer));
        Self::from_parts(config, analyzer, index)
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .field("stats", &self.stats())
            .finish()
    }
}
