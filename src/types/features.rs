//! Feature record: the grammatical facts a sentence exposes

use serde::{Deserialize, Serialize};

/// Morph tense when the root carries none
pub const UNKNOWN_TENSE: &str = "Unknown";

/// Grammatical features extracted from one annotated sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Source sentence
    pub text: String,

    // Modals (AUX lemmas)
    pub has_will: bool,
    pub has_would: bool,
    pub has_should: bool,
    pub has_could: bool,
    pub has_might: bool,

    // Clause structure
    pub has_if_clause: bool,
    pub has_subordinate_clause: bool,

    // Lexical patterns
    pub has_counterfactual_aux: bool,
    pub has_habitual_adverb: bool,
    pub has_fatalistic_phrase: bool,

    // Aspect
    pub is_perfective: bool,
    pub is_progressive: bool,

    /// "Tense" morph of the root verb, or "Unknown"
    pub morph_tense: String,
    /// Root verb lemma, if the root is verbal
    pub root_lemma: Option<String>,

    pub emotion_word_count: usize,
    pub narrative_marker_count: usize,
    pub has_belief_verb: bool,
    pub has_first_person: bool,

    /// Certainty in [0, 1]; 1.0 = fully certain
    pub certainty: f64,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            text: String::new(),
            has_will: false,
            has_would: false,
            has_should: false,
            has_could: false,
            has_might: false,
            has_if_clause: false,
            has_subordinate_clause: false,
            has_counterfactual_aux: false,
            has_habitual_adverb: false,
            has_fatalistic_phrase: false,
            is_perfective: false,
            is_progressive: false,
            morph_tense: UNKNOWN_TENSE.to_string(),
            root_lemma: None,
            emotion_word_count: 0,
            narrative_marker_count: 0,
            has_belief_verb: false,
            has_first_person: false,
            certainty: 1.0,
        }
    }
}

impl FeatureRecord {
    /// Default record carrying only the sentence text
    pub fn degraded(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// 1 - certainty
    pub fn uncertainty(&self) -> f64 {
        1.0 - self.certainty
    }

    pub fn is_present(&self) -> bool {
        self.morph_tense == "Pres"
    }

    pub fn is_past(&self) -> bool {
        self.morph_tense == "Past"
    }
}
