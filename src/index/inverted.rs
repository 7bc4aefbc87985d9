//! The in-memory inverted index.
//!
//! [`InvertedIndex`] is the single-threaded core: a term map plus the
//! per-document bookkeeping needed to undo an insertion. Thread safety and
//! analysis live one level up in [`SearchIndex`](super::SearchIndex).

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::term::Term;
use crate::document::DocId;
use crate::error::{Result, SiftError};
use crate::index::config::IndexConfig;
use crate::index::posting::{Posting, PostingList};

/// Postings derived from one document, ready to be applied to the index.
///
/// Building this is the fallible part of an insertion (analysis, position
/// overflow); applying it cannot fail.
#[derive(Debug, Clone)]
pub struct DocumentPostings {
    doc_id: DocId,
    postings: AHashMap<Term, Posting>,
    length: u32,
}

impl DocumentPostings {
    /// Analyze `fields` in order into postings for `doc_id`.
    ///
    /// Positions continue across field values with `config.position_gap`
    /// empty slots in between. Fields the configuration does not list are
    /// skipped.
    pub fn build<I, N, V>(
        doc_id: DocId,
        fields: I,
        config: &IndexConfig,
        analyzer: &dyn Analyzer,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut postings: AHashMap<Term, Posting> = AHashMap::new();
        let mut base: u32 = 0;
        let mut length: u32 = 0;

        for (name, value) in fields {
            let name = name.as_ref();
            let Some(weight) = config.field_weight(name) else {
                continue;
            };

            let terms = analyzer.terms(value.as_ref())?;
            let Some(&(_, last)) = terms.last() else {
                continue;
            };

            for (term, offset) in terms.iter().cloned() {
                let position = base
                    .checked_add(offset)
                    .ok_or_else(|| position_overflow(doc_id))?;
                postings
                    .entry(term)
                    .or_insert_with(|| Posting::new(doc_id))
                    .add_position(position, weight);
            }

            length = length.saturating_add(terms.len() as u32);
            base = base
                .checked_add(last)
                .and_then(|p| p.checked_add(1))
                .and_then(|p| p.checked_add(config.position_gap))
                .ok_or_else(|| position_overflow(doc_id))?;
        }

        Ok(DocumentPostings {
            doc_id,
            postings,
            length,
        })
    }

    pub fn doc_id(&self) -> DocId {
        self.doc_id
    }

    /// Number of indexed tokens.
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn get(&self, term: &str) -> Option<&Posting> {
        self.postings.get(term)
    }
}

fn position_overflow(doc_id: DocId) -> SiftError {
    SiftError::index(format!("document {doc_id} is too long to index"))
}

/// What the index remembers about a document so it can be removed later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct DocEntry {
    terms: Vec<Term>,
    length: u32,
}

/// Counters describing an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub doc_count: usize,
    /// Number of unique terms in the index.
    pub term_count: usize,
    /// Number of (term, document) postings.
    pub posting_count: usize,
    /// Number of indexed token occurrences.
    pub token_count: u64,
}

/// Term -> postings map with consistent document frequencies.
///
/// Invariants kept by every mutation:
/// - one posting per document per term;
/// - a term is present only while at least one document contains it;
/// - `document_frequency(t)` equals the number of postings under `t`;
/// - every document listed in a posting is registered, and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    terms: AHashMap<Term, PostingList>,
    documents: AHashMap<DocId, DocEntry>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Insert a document, replacing any previous version with the same id.
    ///
    /// Returns `true` when an older version was replaced.
    pub fn apply(&mut self, document: DocumentPostings) -> bool {
        let DocumentPostings {
            doc_id,
            postings,
            length,
        } = document;

        let replaced = self.remove(doc_id);

        let mut terms = Vec::with_capacity(postings.len());
        for (term, posting) in postings {
            self.terms.entry(term.clone()).or_default().insert(posting);
            terms.push(term);
        }
        terms.sort_unstable();

        self.documents.insert(doc_id, DocEntry { terms, length });
        replaced
    }

    /// Delete every posting of `doc_id`.
    ///
    /// Returns `false` (and changes nothing) if the id was never added.
    pub fn remove(&mut self, doc_id: DocId) -> bool {
        let Some(entry) = self.documents.remove(&doc_id) else {
            return false;
        };

        for term in entry.terms {
            if let Some(list) = self.terms.get_mut(&term) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.terms.remove(&term);
                }
            }
        }
        true
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.documents.contains_key(&doc_id)
    }

    pub fn posting_list(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    pub fn posting(&self, term: &str, doc_id: DocId) -> Option<&Posting> {
        self.terms.get(term).and_then(|list| list.get(doc_id))
    }

    /// Postings of `term` sorted by document id; empty for an unknown term.
    pub fn postings_for(&self, term: &str) -> Vec<Posting> {
        self.terms
            .get(term)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, PostingList::len)
    }

    pub fn total_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Registered document ids in ascending order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = self.documents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.documents.len(),
            term_count: self.terms.len(),
            posting_count: self.terms.values().map(PostingList::len).sum(),
            token_count: self.documents.values().map(|e| e.length as u64).sum(),
        }
    }

    pub fn clear(&mut self) {
        self.terms.clear();
        self.documents.clear();
    }

    /// Verify the structural invariants, e.g. after decoding a snapshot.
    pub fn check_consistency(&self) -> Result<()> {
        let mut seen: AHashMap<DocId, (AHashSet<&Term>, u64)> = AHashMap::new();

        for (term, list) in &self.terms {
            if list.is_empty() {
                return Err(SiftError::index(format!("term {term:?} has no postings")));
            }
            for (doc_id, posting) in list.entries() {
                if posting.doc_id != doc_id {
                    return Err(SiftError::index(format!(
                        "posting of {term:?} for document {} is filed under {doc_id}",
                        posting.doc_id
                    )));
                }
                if posting.positions.is_empty()
                    || posting.positions.windows(2).any(|w| w[0] >= w[1])
                {
                    return Err(SiftError::index(format!(
                        "posting of {term:?} in document {doc_id} has invalid positions"
                    )));
                }
                if !posting.weighted_frequency.is_finite() || posting.weighted_frequency <= 0.0 {
                    return Err(SiftError::index(format!(
                        "posting of {term:?} in document {doc_id} has weighted frequency {}",
                        posting.weighted_frequency
                    )));
                }
                let (terms, tokens) = seen.entry(doc_id).or_default();
                terms.insert(term);
                *tokens += posting.frequency() as u64;
            }
        }

        for (doc_id, (terms, tokens)) in &seen {
            let entry = self.documents.get(doc_id).ok_or_else(|| {
                SiftError::index(format!("document {doc_id} has postings but is not registered"))
            })?;
            if entry.terms.len() != terms.len() || !entry.terms.iter().all(|t| terms.contains(t)) {
                return Err(SiftError::index(format!(
                    "term list of document {doc_id} disagrees with its postings"
                )));
            }
            if entry.length as u64 != *tokens {
                return Err(SiftError::index(format!(
                    "document {doc_id} has length {} but {tokens} indexed occurrences",
                    entry.length
                )));
            }
        }

        for (doc_id, entry) in &self.documents {
            if !seen.contains_key(doc_id) && (!entry.terms.is_empty() || entry.length != 0) {
                return Err(SiftError::index(format!(
                    "document {doc_id} lists terms but has no postings"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;

    fn build(doc_id: DocId, fields: &[(&str, &str)], config: &IndexConfig) -> DocumentPostings {
        let analyzer = StandardAnalyzer::new();
        DocumentPostings::build(doc_id, fields.iter().copied(), config, &analyzer).unwrap()
    }

    #[test]
    fn test_positions_continue_across_fields_with_gap() {
        let config = IndexConfig::default().with_position_gap(10);
        let doc = build(1, &[("title", "quick fox"), ("body", "fox jumps")], &config);

        assert_eq!(doc.get("quick").unwrap().positions(), &[0]);
        // title ends at 1, body starts at 1 + 1 + 10
        assert_eq!(doc.get("fox").unwrap().positions(), &[1, 12]);
        assert_eq!(doc.get("jumps").unwrap().positions(), &[13]);
        assert_eq!(doc.length(), 4);
        assert_eq!(doc.term_count(), 3);
    }

    #[test]
    fn test_unlisted_fields_are_skipped_and_weights_applied() {
        let config = IndexConfig::default().with_field("title", 3.0);
        let doc = build(1, &[("title", "fox fox"), ("footer", "fox copyright")], &config);

        let fox = doc.get("fox").unwrap();
        assert_eq!(fox.frequency(), 2);
        assert_eq!(fox.weighted_frequency, 6.0);
        assert!(doc.get("copyright").is_none());
    }

    #[test]
    fn test_apply_and_remove_keep_counters_consistent() {
        let config = IndexConfig::default();
        let mut index = InvertedIndex::new();

        index.apply(build(1, &[("body", "the quick fox")], &config));
        index.apply(build(2, &[("body", "the lazy dog")], &config));

        assert_eq!(index.total_documents(), 2);
        assert_eq!(index.document_frequency("the"), 2);
        assert_eq!(index.document_frequency("fox"), 1);
        index.check_consistency().unwrap();

        assert!(index.remove(1));
        assert_eq!(index.total_documents(), 1);
        assert_eq!(index.document_frequency("the"), 1);
        assert_eq!(index.document_frequency("fox"), 0);
        assert!(index.posting_list("fox").is_none());
        assert!(index.postings_for("quick").is_empty());
        index.check_consistency().unwrap();

        assert!(!index.remove(1));
    }

    #[test]
    fn test_apply_replaces_previous_version() {
        let config = IndexConfig::default();
        let mut index = InvertedIndex::new();

        assert!(!index.apply(build(1, &[("body", "old words")], &config)));
        assert!(index.apply(build(1, &[("body", "new words")], &config)));

        assert_eq!(index.total_documents(), 1);
        assert_eq!(index.document_frequency("old"), 0);
        assert_eq!(index.document_frequency("new"), 1);
        assert_eq!(index.postings_for("words").len(), 1);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_document_without_terms_still_counts() {
        let mut index = InvertedIndex::new();
        index.apply(build(9, &[("body", "!!!")], &IndexConfig::default()));

        assert!(index.contains(9));
        assert_eq!(index.total_documents(), 1);
        assert_eq!(index.term_count(), 0);
        assert_eq!(index.stats().token_count, 0);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_stats() {
        let config = IndexConfig::default();
        let mut index = InvertedIndex::new();
        index.apply(build(1, &[("body", "a b b")], &config));
        index.apply(build(2, &[("body", "b c")], &config));

        let stats = index.stats();
        assert_eq!(stats.doc_count, 2);
        assert_eq!(stats.term_count, 3);
        assert_eq!(stats.posting_count, 4);
        assert_eq!(stats.token_count, 5);
        assert_eq!(index.doc_ids(), vec![1, 2]);

        index.clear();
        assert_eq!(index.stats(), IndexStats::default());
    }

    fn corrupted(edit: impl FnOnce(&mut serde_json::Value)) -> InvertedIndex {
        let config = IndexConfig::default();
        let mut index = InvertedIndex::new();
        index.apply(build(1, &[("body", "quick fox")], &config));
        index.apply(build(2, &[("body", "lazy fox")], &config));
        index.check_consistency().unwrap();

        let mut value = serde_json::to_value(&index).unwrap();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_consistency_rejects_misfiled_posting() {
        let index = corrupted(|value| {
            value["terms"]["fox"]["postings"]["2"]["doc_id"] = serde_json::json!(7);
        });
        let err = index.check_consistency().unwrap_err();
        assert!(err.to_string().contains("filed under 2"), "{err}");
    }

    #[test]
    fn test_consistency_rejects_bad_weighted_frequency() {
        for bad in [0.0, -1.5] {
            let index = corrupted(|value| {
                value["terms"]["quick"]["postings"]["1"]["weighted_frequency"] =
                    serde_json::json!(bad);
            });
            assert!(index.check_consistency().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_consistency_rejects_wrong_document_length() {
        let index = corrupted(|value| {
            value["documents"]["1"]["length"] = serde_json::json!(5);
        });
        assert!(index.check_consistency().is_err());

        let index = corrupted(|value| {
            value["documents"]["3"] = serde_json::json!({"terms": [], "length": 4});
        });
        assert!(index.check_consistency().is_err());
    }
}
