//! Scoring for ranking search results.
//!
//! A document's score is the sum of three parts:
//!
//! - every bare term it contains adds `weighted_tf * idf(term)`
//! - every phrase it contains adds the per-query phrase bonus
//! - every matched clause adds `clause_bonus`
//!
//! The phrase bonus is `phrase_boost * max(largest bare-term contribution,
//! ln(1 + N))`, so an exact phrase always outweighs any single word.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::term::Term;
use crate::document::DocId;
use crate::error::{Result, SiftError};
use crate::index::{InvertedIndex, PostingList};
use crate::query::phrase::PhraseMatcher;
use crate::query::ClauseScore;
use crate::query::query::Query;

/// Tunable scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplier applied to the strongest single-term contribution to
    /// obtain the phrase bonus. Must be greater than 1.
    pub phrase_boost: f32,

    /// Added once per matched clause. Must be non-negative.
    pub clause_bonus: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            phrase_boost: 2.0,
            clause_bonus: 1.0,
        }
    }
}

impl ScoringConfig {
    pub fn with_phrase_boost(mut self, phrase_boost: f32) -> Self {
        self.phrase_boost = phrase_boost;
        self
    }

    pub fn with_clause_bonus(mut self, clause_bonus: f32) -> Self {
        self.clause_bonus = clause_bonus;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.phrase_boost.is_finite() || self.phrase_boost <= 1.0 {
            return Err(SiftError::invalid_config(format!(
                "phrase_boost must be a finite number greater than 1, got {}",
                self.phrase_boost
            )));
        }
        if !self.clause_bonus.is_finite() || self.clause_bonus < 0.0 {
            return Err(SiftError::invalid_config(format!(
                "clause_bonus must be a finite non-negative number, got {}",
                self.clause_bonus
            )));
        }
        Ok(())
    }
}

/// Inverse document frequency: `ln(1 + N / df)`.
///
/// Strictly decreasing in `doc_freq` and always positive for a term that
/// occurs at all. Returns 0 for an unknown term.
pub fn idf(total_docs: usize, doc_freq: usize) -> f32 {
    if doc_freq == 0 || total_docs == 0 {
        return 0.0;
    }
    (1.0 + total_docs as f32 / doc_freq as f32).ln()
}

#[derive(Debug)]
struct TermWeight<'a> {
    term: &'a Term,
    idf: f32,
    postings: Option<&'a PostingList>,
}

/// Scores documents against one query over one read view of the index.
#[derive(Debug)]
pub struct QueryScorer<'a> {
    terms: Vec<TermWeight<'a>>,
    phrases: Vec<(&'a [Term], Option<PhraseMatcher<'a>>)>,
    phrase_bonus: f32,
    clause_bonus: f32,
}

impl<'a> QueryScorer<'a> {
    pub fn new(query: &'a Query, index: &'a InvertedIndex, config: &ScoringConfig) -> Self {
        let total_docs = index.total_documents();

        let terms: Vec<TermWeight<'a>> = query
            .term_clauses()
            .map(|term| TermWeight {
                term,
                idf: idf(total_docs, index.document_frequency(term.as_str())),
                postings: index.posting_list(term.as_str()),
            })
            .collect();

        let phrases = query
            .phrase_clauses()
            .map(|terms| (terms, PhraseMatcher::new(index, terms)))
            .collect();

        let strongest_term = terms
            .iter()
            .filter_map(|weight| {
                let max_tf = weight
                    .postings?
                    .iter()
                    .map(|posting| posting.weighted_frequency)
                    .fold(0.0f32, f32::max);
                Some(max_tf * weight.idf)
            })
            .fold(0.0f32, f32::max);
        let floor = (1.0 + total_docs as f32).ln();

        QueryScorer {
            terms,
            phrases,
            phrase_bonus: config.phrase_boost * strongest_term.max(floor),
            clause_bonus: config.clause_bonus,
        }
    }

    /// The bonus a satisfied phrase clause adds for this query.
    pub fn phrase_bonus(&self) -> f32 {
        self.phrase_bonus
    }

    /// Documents matching at least one clause, ascending.
    pub fn candidates(&self) -> Vec<DocId> {
        let mut candidates = BTreeSet::new();
        for weight in &self.terms {
            if let Some(postings) = weight.postings {
                candidates.extend(postings.doc_ids());
            }
        }
        for matcher in self.phrases.iter().filter_map(|(_, m)| m.as_ref()) {
            candidates.extend(matcher.doc_ids());
        }
        candidates.into_iter().collect()
    }

    /// Score `doc_id`, or `None` if it matches no clause.
    pub fn score(&self, doc_id: DocId) -> Option<f32> {
        let mut score = 0.0f32;
        let mut matched = 0u32;

        for weight in &self.terms {
            if let Some(posting) = weight.postings.and_then(|list| list.get(doc_id)) {
                score += posting.weighted_frequency * weight.idf;
                matched += 1;
            }
        }

        for (_, matcher) in &self.phrases {
            if matcher.as_ref().is_some_and(|m| m.matches(doc_id)) {
                score += self.phrase_bonus;
                matched += 1;
            }
        }

        if matched == 0 {
            return None;
        }
        Some(score + self.clause_bonus * matched as f32)
    }

    /// What each matched clause adds to the score of `doc_id`, clause bonus
    /// included. The parts sum to [`score`](Self::score).
    pub fn explain(&self, doc_id: DocId) -> Vec<ClauseScore> {
        let mut parts = Vec::new();
        for weight in &self.terms {
            if let Some(posting) = weight.postings.and_then(|list| list.get(doc_id)) {
                parts.push(ClauseScore {
                    clause: weight.term.to_string(),
                    score: posting.weighted_frequency * weight.idf + self.clause_bonus,
                });
            }
        }
        for (terms, matcher) in &self.phrases {
            if matcher.as_ref().is_some_and(|m| m.matches(doc_id)) {
                let words: Vec<&str> = terms.iter().map(Term::as_str).collect();
                parts.push(ClauseScore {
                    clause: format!("\"{}\"", words.join(" ")),
                    score: self.phrase_bonus + self.clause_bonus,
                });
            }
        }
        parts
    }
}
