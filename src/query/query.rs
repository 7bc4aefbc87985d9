//! Parsed query representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::term::Term;

/// One unit of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clause {
    /// A bare word, scored by tf-idf.
    Term(Term),
    /// An exact word sequence of at least two terms.
    Phrase(Vec<Term>),
}

impl Clause {
    /// Terms referenced by this clause, in order.
    pub fn terms(&self) -> &[Term] {
        match self {
            Clause::Term(term) => std::slice::from_ref(term),
            Clause::Phrase(terms) => terms,
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, Clause::Phrase(_))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Term(term) => write!(f, "{term}"),
            Clause::Phrase(terms) => {
                write!(f, "\"")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, "\"")
            }
        }
    }
}

/// An ordered, duplicate-free list of clauses.
///
/// An empty query matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause unless an equal clause is already present.
    ///
    /// A phrase with fewer than two terms is degraded to a term clause, or
    /// ignored when empty.
    pub fn push(&mut self, clause: Clause) -> bool {
        let clause = match clause {
            Clause::Phrase(mut terms) if terms.len() < 2 => match terms.pop() {
                Some(term) => Clause::Term(term),
                None => return false,
            },
            clause => clause,
        };

        if self.clauses.contains(&clause) {
            return false;
        }
        self.clauses.push(clause);
        true
    }

    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn term_clauses(&self) -> impl Iterator<Item = &Term> {
        self.clauses.iter().filter_map(|clause| match clause {
            Clause::Term(term) => Some(term),
            Clause::Phrase(_) => None,
        })
    }

    pub fn phrase_clauses(&self) -> impl Iterator<Item = &[Term]> {
        self.clauses.iter().filter_map(|clause| match clause {
            Clause::Phrase(terms) => Some(terms.as_slice()),
            Clause::Term(_) => None,
        })
    }
}

impl FromIterator<Clause> for Query {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut query = Query::new();
        for clause in iter {
            query.push(clause);
        }
        query
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(words: &[&str]) -> Clause {
        Clause::Phrase(words.iter().map(|w| Term::from(*w)).collect())
    }

    #[test]
    fn test_push_collapses_duplicates() {
        let mut query = Query::new();
        assert!(query.push(Clause::Term(Term::from("fox"))));
        assert!(!query.push(Clause::Term(Term::from("fox"))));
        assert!(query.push(phrase(&["quick", "fox"])));
        assert!(!query.push(phrase(&["quick", "fox"])));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_short_phrases_degrade() {
        let query: Query = [phrase(&["fox"]), phrase(&[]), Clause::Term(Term::from("fox"))]
            .into_iter()
            .collect();
        assert_eq!(query.clauses(), &[Clause::Term(Term::from("fox"))]);
    }

    #[test]
    fn test_display() {
        let query = Query::new()
            .with_clause(Clause::Term(Term::from("dog")))
            .with_clause(phrase(&["quick", "fox"]));
        assert_eq!(query.to_string(), "dog \"quick fox\"");
        assert_eq!(query.term_clauses().count(), 1);
        assert_eq!(query.phrase_clauses().count(), 1);
    }
}
