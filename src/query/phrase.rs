//! Exact phrase matching over positional postings.

use crate::analysis::term::Term;
use crate::document::DocId;
use crate::index::{InvertedIndex, Posting, PostingList};

/// Finds documents containing a sequence of terms at consecutive positions.
///
/// Built once per phrase clause; holds borrowed posting lists from the
/// index, so it lives no longer than the read view it was built from.
#[derive(Debug, Clone)]
pub struct PhraseMatcher<'a> {
    lists: Vec<&'a PostingList>,
}

impl<'a> PhraseMatcher<'a> {
    /// Returns `None` when any term is absent from the index, in which case
    /// no document can match.
    pub fn new(index: &'a InvertedIndex, terms: &[Term]) -> Option<Self> {
        if terms.is_empty() {
            return None;
        }
        let lists = terms
            .iter()
            .map(|term| index.posting_list(term.as_str()))
            .collect::<Option<Vec<_>>>()?;
        Some(PhraseMatcher { lists })
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Whether `doc_id` contains the phrase.
    pub fn matches(&self, doc_id: DocId) -> bool {
        let postings = self
            .lists
            .iter()
            .map(|list| list.get(doc_id))
            .collect::<Option<Vec<_>>>();
        match postings {
            Some(postings) => positions_line_up(&postings),
            None => false,
        }
    }

    /// All documents containing the phrase, ascending.
    pub fn doc_ids(&self) -> Vec<DocId> {
        let Some(driver) = self.lists.iter().min_by_key(|list| list.len()) else {
            return Vec::new();
        };
        driver.doc_ids().filter(|&doc_id| self.matches(doc_id)).collect()
    }
}

/// Whether some position `p` of the first posting has `p + i` in the i-th.
pub fn positions_line_up(postings: &[&Posting]) -> bool {
    let Some((first, rest)) = postings.split_first() else {
        return false;
    };

    first.positions().iter().any(|&start| {
        rest.iter().enumerate().all(|(i, posting)| {
            u32::try_from(i + 1)
                .ok()
                .and_then(|offset| start.checked_add(offset))
                .is_some_and(|position| posting.has_position(position))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;
    use crate::index::{DocumentPostings, IndexConfig};

    fn index(docs: &[(DocId, &[&str])]) -> InvertedIndex {
        let config = IndexConfig::default();
        let analyzer = StandardAnalyzer::new();
        let mut index = InvertedIndex::new();
        for (id, values) in docs {
            let fields = values.iter().map(|v| ("body", *v));
            index.apply(DocumentPostings::build(*id, fields, &config, &analyzer).unwrap());
        }
        index
    }

    fn terms(words: &[&str]) -> Vec<Term> {
        words.iter().map(|w| Term::from(*w)).collect()
    }

    #[test]
    fn test_phrase_order_matters() {
        let index = index(&[(1, &["the quick fox jumps"]), (2, &["fox quick"])]);
        let matcher = PhraseMatcher::new(&index, &terms(&["quick", "fox"])).unwrap();

        assert!(matcher.matches(1));
        assert!(!matcher.matches(2));
        assert_eq!(matcher.doc_ids(), vec![1]);
    }

    #[test]
    fn test_unknown_term_matches_nothing() {
        let index = index(&[(1, &["quick fox"])]);
        assert!(PhraseMatcher::new(&index, &terms(&["quick", "wolf"])).is_none());
        assert!(PhraseMatcher::new(&index, &[]).is_none());
    }

    #[test]
    fn test_repeated_term_phrase() {
        let index = index(&[(1, &["fox fox"]), (2, &["fox dog fox"])]);
        let matcher = PhraseMatcher::new(&index, &terms(&["fox", "fox"])).unwrap();
        assert_eq!(matcher.doc_ids(), vec![1]);
    }

    #[test]
    fn test_no_match_across_values() {
        let index = index(&[(1, &["big quick", "fox runs"]), (2, &["a quick fox"])]);
        let matcher = PhraseMatcher::new(&index, &terms(&["quick", "fox"])).unwrap();
        assert_eq!(matcher.doc_ids(), vec![2]);
    }

    #[test]
    fn test_positions_line_up() {
        let mut a = Posting::new(1);
        a.add_position(3, 1.0);
        a.add_position(10, 1.0);
        let mut b = Posting::new(1);
        b.add_position(11, 1.0);

        assert!(positions_line_up(&[&a, &b]));
        assert!(!positions_line_up(&[&b, &a]));
        assert!(positions_line_up(&[&a]));
        assert!(!positions_line_up(&[]));
    }
}
