//! Word-frequency report for plain text artifacts.
//!
//! Tokens are whitespace-separated, trimmed of a small fixed set of punctuation characters
//! and lower-cased.  Anything else (apostrophes, colons, ...) stays part of the word.  A token
//! made only of punctuation becomes the empty word and is counted like any other.
//!

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use tracing::{debug, trace};

use crate::{DataFormatError, Summarizer};

/// Characters trimmed from both ends of each token.
const PUNCTUATION: &[char] = &[',', '(', ')', '?', '.', '"', ';', '!', '-'];

/// Normalise one raw token.
///
#[inline]
pub fn normalize(token: &str) -> String {
    token.trim_matches(PUNCTUATION).to_lowercase()
}

/// Distinct words in order of first appearance, with their counts.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordCount {
    words: Vec<(String, usize)>,
    total: usize,
}

impl WordCount {
    /// Count every normalised token of `text`.
    ///
    #[tracing::instrument(skip(text))]
    pub fn from_text(text: &str) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut words: Vec<(String, usize)> = vec![];
        let mut total = 0;

        for token in text.split_whitespace().map(normalize) {
            total += 1;
            match index.get(&token) {
                Some(&i) => words[i].1 += 1,
                None => {
                    index.insert(token.clone(), words.len());
                    words.push((token, 1));
                }
            }
        }
        debug!("{} tokens, {} distinct", total, words.len());
        WordCount { words, total }
    }

    /// Number of distinct words
    ///
    #[inline]
    pub fn unique(&self) -> usize {
        self.words.len()
    }

    /// Number of tokens
    ///
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.words.iter().find(|(w, _)| w == word).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.words.iter()
    }
}

impl Display for WordCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Unique words: {}", self.unique())?;
        for (word, count) in &self.words {
            writeln!(f, "The word {} appears {} times.", word, count)?;
        }
        Ok(())
    }
}

/// Summarizer for `Kind::Text`.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct TextSummary;

impl Summarizer for TextSummary {
    fn name(&self) -> &'static str {
        "text"
    }

    fn summarize(&self, data: &[u8]) -> Result<String, DataFormatError> {
        trace!("text::summarize({} bytes)", data.len());

        let text = String::from_utf8_lossy(data);
        Ok(WordCount::from_text(&text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Cat,", "cat")]
    #[case("(Dog)", "dog")]
    #[case("\"Why?\"", "why")]
    #[case("end.", "end")]
    #[case("--well-known;", "well-known")]
    #[case("don't", "don't")]
    #[case("note:", "note:")]
    #[case("!?.", "")]
    #[case("ÉCOLE!", "école")]
    fn test_normalize(#[case] token: &str, #[case] word: &str) {
        assert_eq!(word, normalize(token));
    }

    #[test]
    fn test_wordcount_scenario() {
        let wc = WordCount::from_text("Cat, cat. Dog!");

        assert_eq!(2, wc.unique());
        assert_eq!(3, wc.total());
        assert_eq!(Some(2), wc.get("cat"));
        assert_eq!(Some(1), wc.get("dog"));
    }

    #[test]
    fn test_wordcount_report() {
        let report = TextSummary.summarize(b"Cat, cat. Dog!").unwrap();

        let mut lines = report.lines();
        assert_eq!(Some("Unique words: 2"), lines.next());

        let rest: HashSet<&str> = lines.collect();
        let want: HashSet<&str> = [
            "The word cat appears 2 times.",
            "The word dog appears 1 times.",
        ]
        .into_iter()
        .collect();
        assert_eq!(want, rest);
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t  ")]
    fn test_wordcount_empty(#[case] text: &str) {
        let report = TextSummary.summarize(text.as_bytes()).unwrap();
        assert_eq!("Unique words: 0\n", report);
    }

    #[test]
    fn test_wordcount_empty_word() {
        let wc = WordCount::from_text("a -- b ... a");

        assert_eq!(Some(2), wc.get(""));
        assert_eq!(Some(2), wc.get("a"));
        assert_eq!(3, wc.unique());
    }

    #[test]
    fn test_wordcount_invariants() {
        let text = "The quick (brown) fox; the LAZY dog! The end? \"Quick\" - said the fox.";
        let wc = WordCount::from_text(text);

        let normalised: Vec<String> = text.split_whitespace().map(normalize).collect();
        let distinct: HashSet<&String> = normalised.iter().collect();

        assert_eq!(distinct.len(), wc.unique());
        assert_eq!(normalised.len(), wc.iter().map(|(_, c)| c).sum::<usize>());
        assert_eq!(normalised.len(), wc.total());
    }

    #[test]
    fn test_wordcount_deterministic() {
        let text = "b a c a b a";

        let one = TextSummary.summarize(text.as_bytes()).unwrap();
        let two = TextSummary.summarize(text.as_bytes()).unwrap();
        assert_eq!(one, two);
        assert_eq!(
            "Unique words: 3\nThe word b appears 2 times.\nThe word a appears 3 times.\nThe word c appears 1 times.\n",
            one
        );
    }
}
