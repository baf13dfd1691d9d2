//! Sentence segmentation

use lazy_static::lazy_static;
use regex::Regex;

/// Splits a message into ordered, trimmed, non-empty sentences
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

lazy_static! {
    // =========================================================================
    // Sentence boundary: terminal punctuation run followed by whitespace
    // =========================================================================
    static ref RE_BOUNDARY: Regex = Regex::new(r"[.!?]+\s+").unwrap();

    // =========================================================================
    // Abbreviations that end in a period but not a sentence
    // =========================================================================
    static ref RE_ABBREVIATION: Regex = Regex::new(r"(?i)\b(dr|mr|mrs|ms|prof)$").unwrap();

    // =========================================================================
    // Clause boundary: comma-introduced contrast coordinator, or semicolon.
    // The coordinator itself is dropped.
    // =========================================================================
    static ref RE_CONTRAST_CLAUSE: Regex = Regex::new(
        r"(?i),\s*(?:but|yet|however|whereas)\b,?\s*|;\s*"
    ).unwrap();
}

/// Punctuation- and contrast-driven segmenter
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    split_contrast_clauses: bool,
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RuleSegmenter {
    pub fn new(split_contrast_clauses: bool) -> Self {
        Self { split_contrast_clauses }
    }

    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut start = 0;
        for m in RE_BOUNDARY.find_iter(text) {
            let punct = m.as_str().trim_end();
            if punct == "." && RE_ABBREVIATION.is_match(&text[start..m.start()]) {
                continue;
            }
            out.push(&text[start..m.start() + punct.len()]);
            start = m.end();
        }
        out.push(&text[start..]);
        out
    }
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for sentence in self.sentences(text) {
            if self.split_contrast_clauses {
                out.extend(RE_CONTRAST_CLAUSE.split(sentence).map(str::to_string));
            } else {
                out.push(sentence.to_string());
            }
        }
        out.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
