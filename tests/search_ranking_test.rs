#[cfg(test)]
mod tests {
    use sift::analysis::AnalyzerConfig;
    use sift::document::DocId;
    use sift::index::{IndexConfig, SearchIndex};
    use sift::query::ScoringConfig;
    use sift::search::{SearchConfig, Searcher};

    fn searcher_with(config: IndexConfig, docs: &[(DocId, &str)]) -> Searcher {
        let index = SearchIndex::new(config).unwrap();
        for (id, text) in docs {
            index.add(*id, [("body", *text)]).unwrap();
        }
        Searcher::new(index)
    }

    fn searcher(docs: &[(DocId, &str)]) -> Searcher {
        searcher_with(IndexConfig::default(), docs)
    }

    #[test]
    fn test_empty_query_returns_nothing_for_any_page() {
        let searcher = searcher(&[(1, "the quick fox"), (2, "lazy dog")]);

        for (page, page_size) in [(1, 1), (1, 10), (3, 2), (100, 100)] {
            let results = searcher.search("", page, page_size).unwrap();
            assert!(results.doc_ids().is_empty());
            assert_eq!(results.total_hits, 0);
        }
    }

    #[test]
    fn test_punctuation_joined_words_are_searchable() {
        let searcher = searcher(&[
            (1, "see www.example.com or mail:support"),
            (2, "quick.fox"),
            (3, "nothing here"),
        ]);

        assert_eq!(searcher.search("example", 1, 10).unwrap().doc_ids(), vec![1]);
        assert_eq!(searcher.search("support", 1, 10).unwrap().doc_ids(), vec![1]);
        assert_eq!(searcher.search("fox", 1, 10).unwrap().doc_ids(), vec![2]);
        assert_eq!(
            searcher.search("\"example com\"", 1, 10).unwrap().doc_ids(),
            vec![1]
        );
    }

    #[test]
    fn test_term_frequency_raises_rank() {
        let searcher = searcher(&[
            (1, "the quick fox"),
            (2, "the quick quick fox fox"),
            (3, "the lazy dog"),
        ]);

        let results = searcher.search("quick fox", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![2, 1]);
        assert_eq!(results.total_hits, 2);
        assert!(results.hits[0].score > results.hits[1].score);
        assert_eq!(results.max_score, results.hits[0].score);
    }

    #[test]
    fn test_phrase_requires_adjacency() {
        let searcher = searcher(&[(1, "the quick fox"), (2, "a quick red fox"), (3, "fox quick")]);

        let results = searcher.search("\"quick fox\"", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![1]);
        assert_eq!(results.total_hits, 1);
    }

    #[test]
    fn test_phrase_bonus_is_soft() {
        let searcher = searcher(&[(1, "fox quick"), (2, "the quick fox"), (3, "dog")]);

        let results = searcher.search("quick fox \"quick fox\"", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![2, 1]);

        let phrase_doc = results.hits[0].score;
        let bare_doc = results.hits[1].score;
        assert!(phrase_doc > bare_doc);
    }

    #[test]
    fn test_rare_match_beats_common_match() {
        let searcher = searcher(&[
            (1, "eat fish"),
            (2, "eat meat"),
            (3, "eat bread"),
            (4, "eat rice"),
        ]);

        let results = searcher.search("eat fish", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![1, 2, 3, 4]);
        assert!(results.hits[0].score > results.hits[1].score);
        assert_eq!(results.hits[1].score, results.hits[3].score);
    }

    #[test]
    fn test_more_clauses_beat_fewer() {
        let searcher = searcher(&[
            (1, "salmon"),
            (2, "salmon dinner"),
            (3, "grilled salmon dinner"),
        ]);

        let results = searcher.search("grilled salmon dinner", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_scores_order_by_id() {
        let searcher = searcher(&[(30, "fox"), (10, "fox"), (20, "fox")]);
        let results = searcher.search("fox", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![10, 20, 30]);
    }

    #[test]
    fn test_pagination() {
        let searcher = searcher(&[
            (1, "fox"),
            (2, "fox fox"),
            (3, "fox"),
            (4, "fox fox fox"),
            (5, "fox"),
            (6, "dog"),
        ]);

        let all = searcher.search("fox", 1, 100).unwrap();
        assert_eq!(all.doc_ids(), vec![4, 2, 1, 3, 5]);

        let page1 = searcher.search("fox", 1, 2).unwrap();
        let page2 = searcher.search("fox", 2, 2).unwrap();
        let page3 = searcher.search("fox", 3, 2).unwrap();
        let page4 = searcher.search("fox", 4, 2).unwrap();

        assert_eq!(page1.doc_ids(), vec![4, 2]);
        assert_eq!(page2.doc_ids(), vec![1, 3]);
        assert_eq!(page3.doc_ids(), vec![5]);
        assert!(page4.doc_ids().is_empty());

        for page in [&page1, &page2, &page3, &page4] {
            assert_eq!(page.total_hits, 5);
        }
    }

    #[test]
    fn test_query_normalization_matches_index() {
        let searcher = searcher(&[(1, "Don't PANIC, it's fine.")]);

        for query in ["dont", "DON'T", "panic!", "\"Don't panic\""] {
            assert_eq!(searcher.search(query, 1, 10).unwrap().doc_ids(), vec![1], "{query}");
        }
    }

    #[test]
    fn test_stop_words_are_not_searchable() {
        let config = IndexConfig::default()
            .with_analyzer(sift::analysis::AnalyzerConfig::default().with_stop_words(true));
        let searcher = searcher_with(config, &[(1, "the quick fox"), (2, "quick the fox")]);

        assert!(searcher.search("the", 1, 10).unwrap().is_empty());

        // Dense positions: removed stop words do not break phrases.
        let results = searcher.search("\"quick fox\"", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![1, 2]);
    }

    #[test]
    fn test_stemming_matches_inflections() {
        let docs = [(1, "she was walking home"), (2, "a long walk"), (3, "talking heads")];

        let plain = searcher(&docs);
        assert!(plain.search("walked", 1, 10).unwrap().is_empty());

        let config = IndexConfig::default().with_analyzer(AnalyzerConfig::default().with_stemming(true));
        let stemmed = searcher_with(config, &docs);

        let results = stemmed.search("walked", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![1, 2]);
        assert_eq!(stemmed.search("\"walks home\"", 1, 10).unwrap().doc_ids(), vec![1]);
    }

    #[test]
    fn test_custom_scoring() {
        let index = SearchIndex::new(IndexConfig::default()).unwrap();
        index.add(1, [("body", "alpha alpha alpha alpha")]).unwrap();
        index.add(2, [("body", "alpha beta")]).unwrap();
        index.add(3, [("body", "gamma")]).unwrap();

        let flat = Searcher::with_config(
            index.clone(),
            SearchConfig::default().with_scoring(ScoringConfig::default().with_clause_bonus(0.0)),
        )
        .unwrap();
        assert_eq!(flat.search("alpha beta", 1, 10).unwrap().doc_ids(), vec![1, 2]);

        let coverage = Searcher::with_config(
            index,
            SearchConfig::default().with_scoring(ScoringConfig::default().with_clause_bonus(10.0)),
        )
        .unwrap();
        assert_eq!(coverage.search("alpha beta", 1, 10).unwrap().doc_ids(), vec![2, 1]);
    }
}
