//! Porter stemming algorithm.
//!
//! The rewrite rules run in five steps:
//! 1. Plurals and -ed/-ing suffixes, then a terminal y to i
//! 2. Double suffixes such as -ational → -ate and -ization → -ize
//! 3. -icate → -ic, -ful → "", -ness → ""
//! 4. Remove -al, -ance, -ment, -ion and similar when the stem is long enough
//! 5. Remove a final -e and reduce -ll to -l
//!
//! Each step only considers the longest listed suffix that the word ends
//! with; if that suffix fails its measure condition the word is left alone.
//!
//! # Examples
//!
//! ```
//! use sift::analysis::token_filter::stem::Stemmer;
//! use sift::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("walked"), "walk");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Longer suffixes precede the shorter ones they end with.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemmer for lowercase ASCII English words.
///
/// Words that contain anything other than `a-z`, and words of two letters
/// or fewer, are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        PorterStemmer
    }

    fn is_consonant(word: &[u8], i: usize) -> bool {
        match word[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !Self::is_consonant(word, i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences, the `m` in `[C](VC)^m[V]`.
    fn measure(word: &str) -> usize {
        let bytes = word.as_bytes();
        let n = bytes.len();
        let mut i = 0;
        let mut m = 0;

        while i < n && Self::is_consonant(bytes, i) {
            i += 1;
        }
        loop {
            while i < n && !Self::is_consonant(bytes, i) {
                i += 1;
            }
            if i >= n {
                return m;
            }
            while i < n && Self::is_consonant(bytes, i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn has_vowel(word: &str) -> bool {
        let bytes = word.as_bytes();
        (0..bytes.len()).any(|i| !Self::is_consonant(bytes, i))
    }

    fn ends_with_double_consonant(word: &str) -> bool {
        let bytes = word.as_bytes();
        let n = bytes.len();
        n >= 2 && bytes[n - 1] == bytes[n - 2] && Self::is_consonant(bytes, n - 1)
    }

    /// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
    fn ends_cvc(word: &str) -> bool {
        let bytes = word.as_bytes();
        let n = bytes.len();
        n >= 3
            && Self::is_consonant(bytes, n - 3)
            && !Self::is_consonant(bytes, n - 2)
            && Self::is_consonant(bytes, n - 1)
            && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
    }

    fn stem_of<'a>(word: &'a str, suffix: &str) -> &'a str {
        &word[..word.len() - suffix.len()]
    }

    fn step1a(word: &mut String) {
        if word.ends_with("sses") || word.ends_with("ies") {
            word.truncate(word.len() - 2);
        } else if !word.ends_with("ss") && word.ends_with('s') {
            word.pop();
        }
    }

    fn step1b(word: &mut String) {
        if word.ends_with("eed") {
            if Self::measure(Self::stem_of(word, "eed")) > 0 {
                word.pop();
            }
            return;
        }

        let suffix = if word.ends_with("ed") {
            "ed"
        } else if word.ends_with("ing") {
            "ing"
        } else {
            return;
        };
        if !Self::has_vowel(Self::stem_of(word, suffix)) {
            return;
        }
        word.truncate(word.len() - suffix.len());

        if word.ends_with("at") || word.ends_with("bl") || word.ends_with("iz") {
            word.push('e');
        } else if Self::ends_with_double_consonant(word)
            && !(word.ends_with('l') || word.ends_with('s') || word.ends_with('z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push('e');
        }
    }

    fn step1c(word: &mut String) {
        if word.ends_with('y') && Self::has_vowel(Self::stem_of(word, "y")) {
            word.pop();
            word.push('i');
        }
    }

    fn replace_first(word: &mut String, rules: &[(&str, &str)]) {
        if let Some((suffix, replacement)) = rules.iter().find(|(s, _)| word.ends_with(s)) {
            if Self::measure(Self::stem_of(word, suffix)) > 0 {
                word.truncate(word.len() - suffix.len());
                word.push_str(replacement);
            }
        }
    }

    fn step4(word: &mut String) {
        let Some(suffix) = STEP4_SUFFIXES.iter().find(|s| word.ends_with(*s)) else {
            return;
        };
        let stem = Self::stem_of(word, suffix);
        if Self::measure(stem) <= 1 {
            return;
        }
        if *suffix == "ion" && !(stem.ends_with('s') || stem.ends_with('t')) {
            return;
        }
        word.truncate(word.len() - suffix.len());
    }

    fn step5(word: &mut String) {
        if word.ends_with('e') {
            let stem = Self::stem_of(word, "e");
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }
        if word.ends_with("ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let mut word = word.to_string();
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word;
        }

        Self::step1a(&mut word);
        Self::step1b(&mut word);
        Self::step1c(&mut word);
        Self::replace_first(&mut word, STEP2_SUFFIXES);
        Self::replace_first(&mut word, STEP3_SUFFIXES);
        Self::step4(&mut word);
        Self::step5(&mut word);
        word
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("ponies"), "poni");
        assert_eq!(stemmer.stem("motoring"), "motor");
        assert_eq!(stemmer.stem("hopeful"), "hope");
        assert_eq!(stemmer.stem("relational"), "relat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
    }

    #[test]
    fn test_inflections_share_a_stem() {
        let stemmer = PorterStemmer::new();

        for word in ["walk", "walks", "walked", "walking"] {
            assert_eq!(stemmer.stem(word), "walk", "{word}");
        }
    }

    #[test]
    fn test_terminal_y() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("happy"), "happi");
        assert_eq!(stemmer.stem("sky"), "sky");
    }

    #[test]
    fn test_words_left_alone() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("café"), "café");
        assert_eq!(stemmer.stem("mp3s"), "mp3s");
        assert_eq!(stemmer.stem(""), "");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(PorterStemmer::measure("tree"), 0);
        assert_eq!(PorterStemmer::measure("trees"), 1);
        assert_eq!(PorterStemmer::measure("trouble"), 1);
        assert_eq!(PorterStemmer::measure("troubles"), 2);
        assert_eq!(PorterStemmer::measure("oaten"), 2);
    }

    #[test]
    fn test_porter_vowel_detection() {
        let word = b"toy";

        assert!(PorterStemmer::is_consonant(word, 0));
        assert!(!PorterStemmer::is_consonant(word, 1));
        assert!(PorterStemmer::is_consonant(word, 2));
        assert!(PorterStemmer::is_consonant(b"yes", 0));
    }
}
