//! Collector implementations for gathering search results.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::document::DocId;
use crate::query::SearchHit;

/// Trait for collecting scored documents.
pub trait Collector: Send + Debug {
    /// Collect a document hit.
    fn collect(&mut self, doc_id: DocId, score: f32);

    /// Get the total number of hits collected.
    fn total_hits(&self) -> usize;

    /// Reset the collector for a new search.
    fn reset(&mut self);
}

/// A scored document, ordered so that the heap top is the worst hit kept.
#[derive(Debug, Clone, Copy)]
struct ScoredDoc {
    doc_id: DocId,
    score: f32,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower score is greater; on equal scores the higher id is greater.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Keeps the best `max_docs` hits: highest score first, ties broken by
/// ascending document id.
#[derive(Debug)]
pub struct TopDocsCollector {
    max_docs: usize,
    hits: BinaryHeap<ScoredDoc>,
    total_hits: usize,
    max_score: Option<f32>,
}

impl TopDocsCollector {
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.min(1024)),
            total_hits: 0,
            max_score: None,
        }
    }

    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Highest score seen, kept or not.
    pub fn max_score(&self) -> Option<f32> {
        self.max_score
    }

    /// The kept hits, best first.
    pub fn into_hits(self) -> Vec<SearchHit> {
        self.hits
            .into_sorted_vec()
            .into_iter()
            .map(|doc| SearchHit {
                doc_id: doc.doc_id,
                score: doc.score,
            })
            .collect()
    }
}

impl Collector for TopDocsCollector {
    fn collect(&mut self, doc_id: DocId, score: f32) {
        self.total_hits += 1;
        self.max_score = Some(self.max_score.map_or(score, |max| max.max(score)));

        if self.max_docs == 0 {
            return;
        }

        let scored_doc = ScoredDoc { doc_id, score };
        if self.hits.len() < self.max_docs {
            self.hits.push(scored_doc);
        } else if let Some(worst) = self.hits.peek() {
            if scored_doc < *worst {
                self.hits.pop();
                self.hits.push(scored_doc);
            }
        }
    }

    fn total_hits(&self) -> usize {
        self.total_hits
    }

    fn reset(&mut self) {
        self.hits.clear();
        self.total_hits = 0;
        self.max_score = None;
    }
}

/// A collector that just counts matching documents.
#[derive(Debug, Default)]
pub struct CountCollector {
    count: usize,
}

impl CountCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for CountCollector {
    fn collect(&mut self, _doc_id: DocId, _score: f32) {
        self.count += 1;
    }

    fn total_hits(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(hits: &[SearchHit]) -> Vec<DocId> {
        hits.iter().map(|hit| hit.doc_id).collect()
    }

    #[test]
    fn test_top_docs_collector() {
        let mut collector = TopDocsCollector::new(3);

        collector.collect(1, 0.5);
        collector.collect(2, 0.8);
        collector.collect(3, 0.3);
        collector.collect(4, 0.9);
        collector.collect(5, 0.1);

        assert_eq!(collector.total_hits(), 5);
        assert_eq!(collector.max_score(), Some(0.9));

        let hits = collector.into_hits();
        assert_eq!(ids(&hits), vec![4, 2, 1]);
        assert_eq!(hits[0].score, 0.9);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let mut collector = TopDocsCollector::new(2);
        for doc_id in [7, 3, 9, 5] {
            collector.collect(doc_id, 1.0);
        }
        assert_eq!(ids(&collector.into_hits()), vec![3, 5]);
    }

    #[test]
    fn test_zero_capacity_still_counts() {
        let mut collector = TopDocsCollector::new(0);
        collector.collect(1, 1.0);
        assert_eq!(collector.total_hits(), 1);
        assert!(collector.into_hits().is_empty());
    }

    #[test]
    fn test_count_collector() {
        let mut collector = CountCollector::new();
        collector.collect(1, 0.5);
        collector.collect(2, 0.0);
        assert_eq!(collector.total_hits(), 2);

        collector.reset();
        assert_eq!(collector.total_hits(), 0);
    }
}
