//! Executes queries against a [`SearchIndex`].

use log::debug;
use rayon::prelude::*;

use crate::document::DocId;
use crate::error::{Result, SiftError};
use crate::index::SearchIndex;
use crate::query::{
    ClauseScore, Collector, CountCollector, Query, QueryParser, QueryScorer, SearchResults,
    TopDocsCollector,
};
use crate::search::SearchConfig;

/// Runs searches over a shared index.
///
/// Every search holds one read view of the index from candidate gathering to
/// pagination, so concurrent writers never produce a torn ranking.
///
/// # Examples
///
/// ```
/// use sift::index::{IndexConfig, SearchIndex};
/// use sift::search::Searcher;
///
/// # fn main() -> sift::error::Result<()> {
/// let index = SearchIndex::new(IndexConfig::default())?;
/// index.add(1, [("body", "the quick brown dog")])?;
/// index.add(2, [("body", "a quick red fox")])?;
/// index.add(3, [("body", "lazy cat")])?;
///
/// let searcher = Searcher::new(index);
/// let results = searcher.search("quick fox", 1, 10)?;
///
/// assert_eq!(results.doc_ids(), vec![2, 1]);
/// assert_eq!(results.total_hits, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Searcher {
    index: SearchIndex,
    parser: QueryParser,
    config: SearchConfig,
}

impl Searcher {
    pub fn new(index: SearchIndex) -> Self {
        let parser = QueryParser::new(index.analyzer().clone());
        Searcher {
            index,
            parser,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(index: SearchIndex, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Searcher {
            config,
            ..Self::new(index)
        })
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn parser(&self) -> &QueryParser {
        &self.parser
    }

    /// Rank every document matching `query_str` and return one page.
    ///
    /// `page` and `page_size` are 1-based; zero is an `InvalidArgument`
    /// error even when the query is empty, so an empty query yields an empty
    /// page only for valid page arguments. A page past the end is empty.
    pub fn search(&self, query_str: &str, page: usize, page_size: usize) -> Result<SearchResults> {
        self.search_filtered(query_str, page, page_size, |_| true)
    }

    /// Like [`search`](Self::search) for raw input, which must be UTF-8.
    pub fn search_bytes(
        &self,
        query_bytes: &[u8],
        page: usize,
        page_size: usize,
    ) -> Result<SearchResults> {
        validate_page(page, page_size)?;
        let query = self.parser.parse_bytes(query_bytes)?;
        self.search_query(&query, page, page_size, |_| true)
    }

    /// Like [`search`](Self::search), keeping only documents accepted by
    /// `filter`. Filtering happens before ranking, so `total_hits` and page
    /// boundaries reflect the filtered set.
    pub fn search_filtered<F>(
        &self,
        query_str: &str,
        page: usize,
        page_size: usize,
        filter: F,
    ) -> Result<SearchResults>
    where
        F: Fn(DocId) -> bool + Sync,
    {
        validate_page(page, page_size)?;
        let query = self.parser.parse(query_str)?;
        self.search_query(&query, page, page_size, filter)
    }

    /// Execute an already parsed query.
    ///
    /// Page arguments are checked before the query, as in [`search`](Self::search).
    pub fn search_query<F>(
        &self,
        query: &Query,
        page: usize,
        page_size: usize,
        filter: F,
    ) -> Result<SearchResults>
    where
        F: Fn(DocId) -> bool + Sync,
    {
        validate_page(page, page_size)?;
        if query.is_empty() {
            debug!("empty query, nothing to search");
            return Ok(SearchResults::default());
        }

        let offset = (page - 1).saturating_mul(page_size);
        let mut wanted = offset.saturating_add(page_size);
        if let Some(max_results) = self.config.max_results {
            wanted = wanted.min(max_results);
        }

        let mut collector = TopDocsCollector::new(wanted);
        self.collect(query, &filter, &mut collector);

        let mut total_hits = collector.total_hits();
        if let Some(max_results) = self.config.max_results {
            total_hits = total_hits.min(max_results);
        }
        let max_score = collector.max_score().unwrap_or(0.0);
        let hits = collector.into_hits().into_iter().skip(offset).collect();

        debug!("search [{query}] page {page}x{page_size}: {total_hits} hits");
        Ok(SearchResults {
            hits,
            total_hits,
            max_score,
        })
    }

    /// Number of documents matching `query_str`, subject to `max_results`.
    pub fn count(&self, query_str: &str) -> Result<usize> {
        let query = self.parser.parse(query_str)?;
        let mut collector = CountCollector::new();
        self.collect(&query, &|_: DocId| true, &mut collector);

        let count = collector.total_hits();
        Ok(self.config.max_results.map_or(count, |max| count.min(max)))
    }

    /// Per-clause score breakdown of `doc_id` for `query_str`.
    ///
    /// Empty when the document matches no clause or is not indexed.
    pub fn explain(&self, query_str: &str, doc_id: DocId) -> Result<Vec<ClauseScore>> {
        let query = self.parser.parse(query_str)?;
        let index = self.index.read();
        Ok(QueryScorer::new(&query, &index, &self.config.scoring).explain(doc_id))
    }

    fn collect<F>(&self, query: &Query, filter: &F, collector: &mut dyn Collector)
    where
        F: Fn(DocId) -> bool + Sync,
    {
        let index = self.index.read();
        let scorer = QueryScorer::new(query, &index, &self.config.scoring);
        let candidates = scorer.candidates();

        if candidates.len() >= self.config.parallel_threshold {
            let scored: Vec<(DocId, f32)> = candidates
                .par_iter()
                .filter(|&&doc_id| filter(doc_id))
                .filter_map(|&doc_id| scorer.score(doc_id).map(|score| (doc_id, score)))
                .collect();
            for (doc_id, score) in scored {
                collector.collect(doc_id, score);
            }
        } else {
            for doc_id in candidates {
                if !filter(doc_id) {
                    continue;
                }
                if let Some(score) = scorer.score(doc_id) {
                    collector.collect(doc_id, score);
                }
            }
        }
    }
}

fn validate_page(page: usize, page_size: usize) -> Result<()> {
    if page == 0 {
        return Err(SiftError::invalid_argument("page must be at least 1"));
    }
    if page_size == 0 {
        return Err(SiftError::invalid_argument("page_size must be at least 1"));
    }
    Ok(())
}
