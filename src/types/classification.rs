//! Tense classification result

use serde::{Deserialize, Serialize};

use crate::types::{FeatureRecord, TenseClass};

/// One class with its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredClass {
    pub class: TenseClass,
    pub score: f64,
}

/// Winner, confidence and the full score table for one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub tense_class: TenseClass,
    /// Winner's score, in [0, 1]
    pub confidence: f64,
    /// All twelve scores in rule-table order
    pub all_scores: Vec<ScoredClass>,
    /// First three of the stable descending sort
    pub top_3: Vec<ScoredClass>,
    /// Record the scores were computed from
    pub features: FeatureRecord,
}

impl ClassificationResult {
    /// Score of one class
    pub fn score_of(&self, class: TenseClass) -> f64 {
        self.all_scores
            .iter()
            .find(|s| s.class == class)
            .map(|s| s.score)
            .unwrap_or(0.0)
    }
}
