//! Hyphenation resolution for line-joined paragraphs.
//!
//! When a paragraph's lines are joined, every `word-` at a line seam
//! has to be resolved: was the word split by the typesetter (drop the
//! hyphen) or is it a genuine compound (keep it)? The decision uses a
//! document-wide token frequency bag: whichever of the fused or
//! hyphenated form occurs more often elsewhere in the document wins.
//! On a tie — commonly both zero — the hyphen survives when the second
//! fragment is capitalized (proper-noun compounds) or when the
//! fragments are themselves frequent words; otherwise the seam is
//! fused.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Lower-cased token frequency table over the document's line text.
#[derive(Debug, Clone, Default)]
pub struct WordBag {
    counts: HashMap<String, usize>,
}

impl WordBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token of a line of text.
    pub fn add_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            let cleaned = clean_token(token);
            if !cleaned.is_empty() {
                *self.counts.entry(cleaned.to_lowercase()).or_insert(0) += 1;
            }
        }
    }

    /// Record a token a given number of times (case-insensitive).
    pub fn add_word(&mut self, word: &str, count: usize) {
        *self.counts.entry(word.to_lowercase()).or_insert(0) += count;
    }

    /// Occurrences of a token (case-insensitive).
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Trim punctuation off a token's edges, keeping inner hyphens.
fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn seam_pattern() -> &'static Regex {
    static SEAM: OnceLock<Regex> = OnceLock::new();
    SEAM.get_or_init(|| Regex::new(r"(\S+)-\n(\S+)").expect("valid seam pattern"))
}

/// Join a paragraph's lines into flowing text, resolving hyphen seams.
///
/// Lines are joined with newlines first; each `word-\nword` seam is
/// resolved against the bag; remaining newlines become single spaces.
pub fn join_lines(lines: &[String], bag: &WordBag) -> String {
    let mut text = lines.join("\n");

    // Chains like "a-\nb-\nc" need another pass after the first seam
    // is resolved.
    loop {
        let replaced = seam_pattern()
            .replace_all(&text, |caps: &Captures| {
                resolve_seam(&caps[1], &caps[2], bag)
            })
            .into_owned();
        if replaced == text {
            break;
        }
        text = replaced;
    }

    text.replace('\n', " ")
}

fn resolve_seam(first: &str, second: &str, bag: &WordBag) -> String {
    let w1 = clean_token(first);
    let w2 = clean_token(second);
    let fused = bag.count(&format!("{w1}{w2}"));
    let hyphenated = bag.count(&format!("{w1}-{w2}"));

    if fused > hyphenated {
        return format!("{first}{second}");
    }
    if hyphenated > fused {
        return format!("{first}-{second}");
    }

    // Tie (commonly 0–0): keep the hyphen for likely proper-noun
    // compounds and for fragments that are frequent words on their own.
    let capitalized = w2.chars().next().is_some_and(char::is_uppercase);
    let frequent_parts = bag.count(w1) + bag.count(w2) >= 3;
    if capitalized || frequent_parts {
        format!("{first}-{second}")
    } else {
        format!("{first}{second}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bag_counts_case_insensitively() {
        let mut bag = WordBag::new();
        bag.add_text("The reinvestment plan: reinvestment works.");
        assert_eq!(bag.count("reinvestment"), 2);
        assert_eq!(bag.count("The"), 1);
        assert_eq!(bag.count("plan"), 1);
        assert_eq!(bag.count("missing"), 0);
    }

    #[test]
    fn bag_keeps_inner_hyphens() {
        let mut bag = WordBag::new();
        bag.add_text("a well-known fact (well-known).");
        assert_eq!(bag.count("well-known"), 2);
    }

    #[test]
    fn corpus_frequency_dehyphenates() {
        let mut bag = WordBag::new();
        bag.add_word("reinvest", 5);
        let joined = join_lines(&lines(&["rein-", "vest"]), &bag);
        assert_eq!(joined, "reinvest");
    }

    #[test]
    fn corpus_frequency_keeps_compound() {
        let mut bag = WordBag::new();
        bag.add_word("re-invest", 3);
        let joined = join_lines(&lines(&["re-", "invest"]), &bag);
        assert_eq!(joined, "re-invest");
    }

    #[test]
    fn tie_with_capitalized_second_fragment_keeps_hyphen() {
        let bag = WordBag::new();
        let joined = join_lines(&lines(&["Levi-", "Strauss"]), &bag);
        assert_eq!(joined, "Levi-Strauss");
    }

    #[test]
    fn tie_with_frequent_fragments_keeps_hyphen() {
        let mut bag = WordBag::new();
        bag.add_word("content", 2);
        bag.add_word("coding", 1);
        let joined = join_lines(&lines(&["content-", "coding"]), &bag);
        assert_eq!(joined, "content-coding");
    }

    #[test]
    fn tie_with_unknown_fragments_fuses() {
        let bag = WordBag::new();
        let joined = join_lines(&lines(&["govern-", "ment"]), &bag);
        assert_eq!(joined, "government");
    }

    #[test]
    fn plain_newlines_become_spaces() {
        let bag = WordBag::new();
        let joined = join_lines(&lines(&["first line", "second line"]), &bag);
        assert_eq!(joined, "first line second line");
    }

    #[test]
    fn seam_in_mid_paragraph_resolves() {
        let mut bag = WordBag::new();
        bag.add_word("pipeline", 4);
        let joined = join_lines(
            &lines(&["the whole pipe-", "line runs here"]),
            &bag,
        );
        assert_eq!(joined, "the whole pipeline runs here");
    }

    #[test]
    fn trailing_punctuation_survives() {
        let mut bag = WordBag::new();
        bag.add_word("reinvest", 5);
        let joined = join_lines(&lines(&["rein-", "vest."]), &bag);
        assert_eq!(joined, "reinvest.");
    }

    #[test]
    fn determinism() {
        let mut bag = WordBag::new();
        bag.add_word("reinvest", 5);
        let a = join_lines(&lines(&["rein-", "vest"]), &bag);
        let b = join_lines(&lines(&["rein-", "vest"]), &bag);
        assert_eq!(a, b);
    }
}
