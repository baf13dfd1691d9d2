//! Linguistic annotation of a single sentence
//!
//! Labels follow the spaCy / ClearNLP conventions: universal coarse POS,
//! Penn fine tags, ClearNLP dependency labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse (universal) part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Pos {
    ADJ,
    ADP,
    ADV,
    AUX,
    CCONJ,
    DET,
    INTJ,
    NOUN,
    NUM,
    PART,
    PRON,
    PROPN,
    PUNCT,
    SCONJ,
    VERB,
    X,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ADJ => "ADJ",
            Self::ADP => "ADP",
            Self::ADV => "ADV",
            Self::AUX => "AUX",
            Self::CCONJ => "CCONJ",
            Self::DET => "DET",
            Self::INTJ => "INTJ",
            Self::NOUN => "NOUN",
            Self::NUM => "NUM",
            Self::PART => "PART",
            Self::PRON => "PRON",
            Self::PROPN => "PROPN",
            Self::PUNCT => "PUNCT",
            Self::SCONJ => "SCONJ",
            Self::VERB => "VERB",
            Self::X => "X",
        }
    }

    /// VERB or AUX
    pub fn is_verbal(&self) -> bool {
        matches!(self, Self::VERB | Self::AUX)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One annotated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Lowercase lemma
    pub lemma: String,
    /// Coarse POS
    pub pos: Pos,
    /// Fine-grained tag (VBD, VBN, VBG, ...)
    pub tag: String,
    /// Dependency label
    pub dep: String,
    /// Index of the syntactic head; the root points at itself
    pub head: usize,
    /// Morphological features ("Tense" => "Past", ...)
    pub morph: BTreeMap<String, String>,
    /// Char offset of the token in the sentence
    pub idx: usize,
}

impl Token {
    /// "Tense" morph value, if any
    pub fn tense(&self) -> Option<&str> {
        self.morph.get("Tense").map(String::as_str)
    }
}

/// Annotated sentence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
}

impl Annotation {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Indices of the direct children of `head`, in sentence order
    pub fn children(&self, head: usize) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, t)| *i != head && t.head == head)
            .map(|(i, _)| i)
    }

    /// First token whose head index points past the last token
    pub fn dangling_head(&self) -> Option<(usize, usize)> {
        self.tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.head >= self.tokens.len())
            .map(|(i, t)| (i, t.head))
    }

    /// First token labelled ROOT whose POS is VERB or AUX
    pub fn verbal_root(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.dep == "ROOT" && t.pos.is_verbal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, pos: Pos, dep: &str, head: usize) -> Token {
        Token {
            text: text.to_string(),
            lemma: text.to_lowercase(),
            pos,
            tag: String::new(),
            dep: dep.to_string(),
            head,
            morph: BTreeMap::new(),
            idx: 0,
        }
    }

    #[test]
    fn test_children_excludes_self_loop() {
        let ann = Annotation::new(vec![
            tok("I", Pos::PRON, "nsubj", 1),
            tok("run", Pos::VERB, "ROOT", 1),
            tok(".", Pos::PUNCT, "punct", 1),
        ]);
        let kids: Vec<usize> = ann.children(1).collect();
        assert_eq!(kids, vec![0, 2]);
        assert_eq!(ann.verbal_root().map(|t| t.text.as_str()), Some("run"));
    }

    #[test]
    fn test_nominal_root_is_not_verbal() {
        let ann = Annotation::new(vec![tok("Pizza", Pos::NOUN, "ROOT", 0)]);
        assert!(ann.verbal_root().is_none());
    }

    #[test]
    fn test_dangling_head() {
        let mut ann = Annotation::new(vec![
            tok("I", Pos::PRON, "nsubj", 1),
            tok("run", Pos::VERB, "ROOT", 1),
        ]);
        assert_eq!(ann.dangling_head(), None);
        ann.tokens[0].head = 7;
        assert_eq!(ann.dangling_head(), Some((0, 7)));
    }
}
