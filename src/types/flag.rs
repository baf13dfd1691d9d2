//! Sentence flags

use serde::{Deserialize, Serialize};

/// Notable conditions attached to a sentence analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceFlag {
    /// No first-person reference, no Zimbardo contribution
    NonSelfReferential,
    /// Hedge score below threshold
    HeavilyHedged,
    /// Classified Present-Fatalistic
    FatalismMarker,
    /// Classified Counterfactual Past
    RegretMarker,
    /// Confidence below 0.5
    LowConfidence,
    /// Annotation failed; default record used
    AnnotationDegraded,
}

impl SentenceFlag {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonSelfReferential => "non_self_referential",
            Self::HeavilyHedged => "heavily_hedged",
            Self::FatalismMarker => "fatalism_marker",
            Self::RegretMarker => "regret_marker",
            Self::LowConfidence => "low_confidence",
            Self::AnnotationDegraded => "annotation_degraded",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NonSelfReferential => "Sentence is not about the speaker",
            Self::HeavilyHedged => "Claim is heavily hedged",
            Self::FatalismMarker => "Present-fatalistic framing",
            Self::RegretMarker => "Counterfactual regret framing",
            Self::LowConfidence => "Classification confidence is low",
            Self::AnnotationDegraded => "Linguistic annotation unavailable for this sentence",
        }
    }
}

impl std::fmt::Display for SentenceFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
