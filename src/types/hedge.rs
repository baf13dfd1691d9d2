//! Hedge scoring result

use serde::{Deserialize, Serialize};

/// How certain one sentence reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeResult {
    /// 1.0 = fully certain, floor 0.01; rounded to 4 decimals
    pub score: f64,
    /// Hedges found, deduplicated, first-seen order
    pub hedges: Vec<String>,
    /// Boosters found, table order
    pub boosters: Vec<String>,
    /// An uncertain modal (might/could/may) governs a verb
    pub has_uncertain_modal: bool,
    /// A certain modal (will/shall/must) is present; provenance only
    pub has_certain_modal: bool,
    /// score < heavily-hedged threshold
    pub is_heavily_hedged: bool,
    /// Every factor applied to the running score, in order
    pub multipliers: Vec<f64>,
}

impl HedgeResult {
    /// Unhedged sentence
    pub fn certain() -> Self {
        Self {
            score: 1.0,
            hedges: Vec::new(),
            boosters: Vec::new(),
            has_uncertain_modal: false,
            has_certain_modal: false,
            is_heavily_hedged: false,
            multipliers: Vec::new(),
        }
    }
}
