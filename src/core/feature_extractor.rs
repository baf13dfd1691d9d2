//! Feature extractor: annotation + sentence → FeatureRecord
//!
//! Modal, aspect, root and first-person features come from the annotation.
//! Lexical patterns are lowercase substring matches over the raw sentence.

use crate::error::{TasError, TasResult};
use crate::types::{Annotation, FeatureRecord, Pos, UNKNOWN_TENSE};
use crate::LOCAL_HEDGE_CUE_STEP;

// =============================================================================
// LEXICAL PATTERNS
// =============================================================================

const COUNTERFACTUAL_PATTERNS: &[&str] = &[
    "should have", "could have", "would have", "if only", "wish i had", "had only", "i wish",
];

const HABITUAL_ADVERBS: &[&str] = &[
    "always", "usually", "often", "never", "rarely", "sometimes", "generally", "typically",
    "regularly", "every", "once",
];

const FATALISTIC_PHRASES: &[&str] = &[
    "nothing ever changes", "it doesn't matter", "no point", "never works", "always fails",
    "can't change",
];

const EMOTION_WORDS: &[&str] = &[
    "scared", "anxious", "worried", "afraid", "frightened", "nervous", "concerned", "stressed",
    "fearful", "terrified",
];

const NARRATIVE_MARKERS: &[&str] = &[
    "so", "then", "suddenly", "next", "after", "later", "finally", "meanwhile", "before", "while",
];

const BELIEF_VERBS: &[&str] = &["believe", "think", "know", "suppose", "assume", "consider"];

/// Cues behind the coarse certainty seed
const LOCAL_HEDGE_CUES: &[&str] = &[
    "might", "could", "maybe", "perhaps", "seem", "appear", "may", "possibly", "probably",
];

const SUBORDINATE_DEPS: &[&str] = &["acl", "advcl", "relcl"];

/// Extracts the grammatical feature record of one sentence
#[derive(Debug, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Build the feature record. Zero tokens is an `EmptyAnnotation` error.
    pub fn extract(&self, sentence: &str, annotation: &Annotation) -> TasResult<FeatureRecord> {
        if annotation.is_empty() {
            return Err(TasError::EmptyAnnotation {
                sentence: sentence.to_string(),
            });
        }

        let lower = sentence.to_lowercase();
        let root = annotation.verbal_root();
        let root_lemma = root.map(|t| t.lemma.clone());

        Ok(FeatureRecord {
            text: sentence.to_string(),
            has_will: has_modal(annotation, "will"),
            has_would: has_modal(annotation, "would"),
            has_should: has_modal(annotation, "should"),
            has_could: has_modal(annotation, "could"),
            has_might: has_modal(annotation, "might"),
            has_if_clause: lower.contains("if"),
            has_subordinate_clause: annotation
                .tokens
                .iter()
                .any(|t| SUBORDINATE_DEPS.contains(&t.dep.as_str())),
            has_counterfactual_aux: matches_any(&lower, COUNTERFACTUAL_PATTERNS),
            has_habitual_adverb: matches_any(&lower, HABITUAL_ADVERBS),
            has_fatalistic_phrase: matches_any(&lower, FATALISTIC_PHRASES),
            is_perfective: has_child_tagged(annotation, "have", &[Pos::AUX, Pos::VERB], "VBN"),
            is_progressive: has_child_tagged(annotation, "be", &[Pos::AUX], "VBG"),
            morph_tense: root
                .and_then(|t| t.tense())
                .unwrap_or(UNKNOWN_TENSE)
                .to_string(),
            has_belief_verb: root_lemma
                .as_deref()
                .map(|l| BELIEF_VERBS.contains(&l))
                .unwrap_or(false),
            root_lemma,
            emotion_word_count: count_matches(&lower, EMOTION_WORDS),
            narrative_marker_count: count_matches(&lower, NARRATIVE_MARKERS),
            has_first_person: annotation
                .tokens
                .iter()
                .any(|t| t.pos == Pos::PRON && (t.lemma == "i" || t.lemma == "we")),
            certainty: local_certainty(&lower),
        })
    }
}

/// Coarse certainty seed: one step down per distinct hedge cue present
pub fn local_certainty(lower: &str) -> f64 {
    let cues = count_matches(lower, LOCAL_HEDGE_CUES) as f64;
    (1.0 - cues * LOCAL_HEDGE_CUE_STEP).clamp(0.0, 1.0)
}

fn has_modal(annotation: &Annotation, lemma: &str) -> bool {
    annotation
        .tokens
        .iter()
        .any(|t| t.pos == Pos::AUX && t.lemma == lemma)
}

/// Some token with `lemma` and one of `pos` has a direct child tagged `tag`
fn has_child_tagged(annotation: &Annotation, lemma: &str, pos: &[Pos], tag: &str) -> bool {
    annotation.tokens.iter().enumerate().any(|(i, t)| {
        t.lemma == lemma
            && pos.contains(&t.pos)
            && annotation.children(i).any(|c| annotation.tokens[c].tag == tag)
    })
}

fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// Distinct patterns present
fn count_matches(text: &str, patterns: &[&str]) -> usize {
    patterns.iter().filter(|p| text.contains(*p)).count()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotator::{Annotator, RuleAnnotator};
    use crate::types::Token;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn extract(s: &str) -> FeatureRecord {
        let annotation = RuleAnnotator::new().annotate(s).unwrap();
        FeatureExtractor::new().extract(s, &annotation).unwrap()
    }

    fn token(text: &str, lemma: &str, pos: Pos, tag: &str, dep: &str, head: usize) -> Token {
        Token {
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos,
            tag: tag.to_string(),
            dep: dep.to_string(),
            head,
            morph: BTreeMap::new(),
            idx: 0,
        }
    }

    #[test]
    fn test_used_to_is_past_habitual() {
        let rec = extract("I used to run every day");
        assert_eq!(rec.morph_tense, "Past");
        assert_eq!(rec.root_lemma.as_deref(), Some("use"));
        assert!(rec.has_habitual_adverb);
        assert!(rec.has_first_person);
        assert!(!rec.is_perfective);
        assert_eq!(rec.certainty, 1.0);
    }

    #[test]
    fn test_contracted_will_is_modal() {
        let rec = extract("lately I've been thinking maybe I'll get back into it.");
        assert!(rec.has_will);
        assert!(!rec.has_could && !rec.has_might);
        assert_eq!(rec.morph_tense, "Unknown");
        // "maybe" also carries the "may" cue
        assert!((rec.certainty - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_counterfactual_and_fatalistic_patterns() {
        assert!(extract("I should have left earlier").has_counterfactual_aux);
        assert!(extract("Nothing ever changes").has_fatalistic_phrase);
    }

    #[test]
    fn test_emotion_hits_are_distinct() {
        let rec = extract("I am scared and scared and worried");
        assert_eq!(rec.emotion_word_count, 2);
    }

    #[test]
    fn test_belief_root() {
        assert!(extract("I believe in hard work").has_belief_verb);
        assert!(!extract("I run daily").has_belief_verb);
    }

    #[test]
    fn test_perfective_needs_have_head() {
        // "have" heading a participle (as some parsers attach it)
        let annotation = Annotation::new(vec![
            token("I", "i", Pos::PRON, "PRP", "nsubj", 1),
            token("have", "have", Pos::AUX, "VBP", "ROOT", 1),
            token("finished", "finish", Pos::VERB, "VBN", "xcomp", 1),
        ]);
        let rec = FeatureExtractor::new()
            .extract("I have finished", &annotation)
            .unwrap();
        assert!(rec.is_perfective);
        assert!(!rec.is_progressive);
    }

    #[test]
    fn test_local_certainty_clamps() {
        assert_eq!(local_certainty("nothing here"), 1.0);
        let all = "might could maybe perhaps seem appear may possibly probably";
        assert!((local_certainty(all) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_annotation_is_error() {
        let err = FeatureExtractor::new()
            .extract("...", &Annotation::default())
            .unwrap_err();
        assert_eq!(err.code(), "TAS_EMPTY_ANNOTATION");
    }
}
