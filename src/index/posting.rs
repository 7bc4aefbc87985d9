//! Postings: per-document occurrences of a term.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::DocId;

/// A single posting: where one term occurs inside one document.
///
/// `frequency()` is always `positions.len()`; positions are strictly
/// increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocId,
    /// Positions of the term in the document (for phrase queries).
    pub positions: Vec<u32>,
    /// Sum of the field weights of every occurrence.
    pub weighted_frequency: f32,
}

impl Posting {
    /// Create a posting with no occurrences yet.
    pub fn new(doc_id: DocId) -> Self {
        Posting {
            doc_id,
            positions: Vec::new(),
            weighted_frequency: 0.0,
        }
    }

    /// Record one occurrence at `position` in a field weighted `weight`.
    ///
    /// Positions must be added in increasing order.
    pub fn add_position(&mut self, position: u32, weight: f32) {
        debug_assert!(self.positions.last().is_none_or(|&last| last < position));
        self.positions.push(position);
        self.weighted_frequency += weight;
    }

    /// Get the term frequency.
    pub fn frequency(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    pub fn has_position(&self, position: u32) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// All postings of one term, keyed and ordered by document id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    postings: BTreeMap<DocId, Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList::default()
    }

    /// Insert or replace the posting for its document.
    pub fn insert(&mut self, posting: Posting) -> Option<Posting> {
        self.postings.insert(posting.doc_id, posting)
    }

    pub fn remove(&mut self, doc_id: DocId) -> Option<Posting> {
        self.postings.remove(&doc_id)
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings.get(&doc_id)
    }

    /// Number of documents containing the term.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Postings in ascending document id order.
    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.values()
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.postings.keys().copied()
    }

    /// Postings together with the document id they are filed under.
    pub fn entries(&self) -> impl Iterator<Item = (DocId, &Posting)> {
        self.postings.iter().map(|(doc_id, posting)| (*doc_id, posting))
    }
}
