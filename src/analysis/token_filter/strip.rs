//! Strip filter implementation.
//!
//! Splits a token at every character that is neither alphanumeric nor an
//! apostrophe, then drops the apostrophes. `quick.fox` becomes `quick` and
//! `fox`, `don't` becomes `dont`, and `c++` becomes `c`. Tokens with no
//! alphanumeric character left are stopped.

use super::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A filter that strips non-alphanumeric characters from token text.
#[derive(Clone, Debug, Default)]
pub struct StripFilter;

impl StripFilter {
    /// Create a new strip filter.
    pub fn new() -> Self {
        StripFilter
    }

    fn is_apostrophe(c: char) -> bool {
        matches!(c, '\'' | '\u{2019}')
    }

    fn is_separator(c: char) -> bool {
        !c.is_alphanumeric() && !Self::is_apostrophe(c)
    }

    fn split(token: Token, out: &mut Vec<Token>) {
        // Offsets only map back into the source when no filter changed the byte length.
        let exact = token.end_offset.checked_sub(token.start_offset) == Some(token.text.len());
        let mut kept = false;

        let mut pieces = Vec::new();
        let mut start: Option<usize> = None;
        for (idx, c) in token.text.char_indices() {
            match (Self::is_separator(c), start) {
                (true, Some(s)) => {
                    pieces.push((s, idx));
                    start = None;
                }
                (false, None) => start = Some(idx),
                _ => {}
            }
        }
        if let Some(s) = start {
            pieces.push((s, token.text.len()));
        }

        for (start, end) in pieces {
            let stripped: String = token.text[start..end]
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect();
            if stripped.is_empty() {
                continue;
            }
            let (start_offset, end_offset) = if exact {
                (token.start_offset + start, token.start_offset + end)
            } else {
                (token.start_offset, token.end_offset)
            };
            out.push(Token::with_offsets(
                stripped,
                token.position,
                start_offset,
                end_offset,
            ));
            kept = true;
        }

        if !kept {
            out.push(token.stop());
        }
    }
}

impl Filter for StripFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut filtered_tokens = Vec::new();
        for token in tokens {
            if token.is_stopped() || token.text.chars().all(char::is_alphanumeric) {
                filtered_tokens.push(token);
            } else {
                Self::split(token, &mut filtered_tokens);
            }
        }

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "strip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: Vec<Token>) -> Vec<String> {
        StripFilter::new()
            .filter(Box::new(input.into_iter()))
            .unwrap()
            .filter(|t| !t.is_stopped())
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_strip_filter() {
        let filter = StripFilter::new();
        let tokens = vec![
            Token::new("don't", 0),
            Token::new("world", 1),
            Token::new("--", 2),
            Token::new("up?", 3),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].text, "dont");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "--");
        assert!(result[2].is_stopped());
        assert_eq!(result[3].text, "up");
    }

    #[test]
    fn test_punctuation_inside_a_token_splits_it() {
        assert_eq!(texts(vec![Token::new("quick.fox", 0)]), vec!["quick", "fox"]);
        assert_eq!(texts(vec![Token::new("key:value", 0)]), vec!["key", "value"]);
        assert_eq!(
            texts(vec![Token::new("www.example.com", 0)]),
            vec!["www", "example", "com"]
        );
        assert_eq!(texts(vec![Token::new("3.14", 0)]), vec!["3", "14"]);
        assert_eq!(texts(vec![Token::new("a/b|c", 0)]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_apostrophes_join_the_word() {
        assert_eq!(texts(vec![Token::new("it's", 0)]), vec!["its"]);
        assert_eq!(texts(vec![Token::new("don\u{2019}t", 0)]), vec!["dont"]);
        assert_eq!(texts(vec![Token::new("'quoted'", 0)]), vec!["quoted"]);
    }

    #[test]
    fn test_split_pieces_keep_source_offsets() {
        let tokens = vec![Token::with_offsets("mail:support", 0, 4, 16)];
        let result: Vec<Token> = StripFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!((result[0].start_offset, result[0].end_offset), (4, 8));
        assert_eq!((result[1].start_offset, result[1].end_offset), (9, 16));
    }

    #[test]
    fn test_multibyte_separator() {
        assert_eq!(texts(vec![Token::new("east\u{2014}west", 0)]), vec!["east", "west"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StripFilter::new().name(), "strip");
    }
}
