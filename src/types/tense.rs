//! Tense class definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TasError;

/// The twelve psychological tense classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenseClass {
    /// "I'm building a startup"
    #[serde(rename = "T1")]
    ActivePresent,
    /// "I always wake up early"
    #[serde(rename = "T2")]
    HabitualPresent,
    /// "I believe in honesty"
    #[serde(rename = "T3")]
    StableBeliefPresent,
    /// "I used to run daily"
    #[serde(rename = "T4")]
    HistoricalPast,
    /// "I went through a tough time"
    #[serde(rename = "T5")]
    ExperientialPast,
    /// "So I walk into the room and..."
    #[serde(rename = "T6")]
    NarrativePresent,
    /// "I will launch next month"
    #[serde(rename = "T7")]
    DeclaredFuture,
    /// "I might try to exercise"
    #[serde(rename = "T8")]
    HedgedFuture,
    /// "I would travel if I could"
    #[serde(rename = "T9")]
    Conditional,
    /// "I should have left earlier"
    #[serde(rename = "T10")]
    CounterfactualPast,
    /// "Nothing ever changes"
    #[serde(rename = "T11")]
    PresentFatalistic,
    /// "I'm scared of what might happen"
    #[serde(rename = "T12")]
    FutureAnxious,
}

impl TenseClass {
    /// All classes in T-number order
    pub const ALL: [TenseClass; 12] = [
        TenseClass::ActivePresent,
        TenseClass::HabitualPresent,
        TenseClass::StableBeliefPresent,
        TenseClass::HistoricalPast,
        TenseClass::ExperientialPast,
        TenseClass::NarrativePresent,
        TenseClass::DeclaredFuture,
        TenseClass::HedgedFuture,
        TenseClass::Conditional,
        TenseClass::CounterfactualPast,
        TenseClass::PresentFatalistic,
        TenseClass::FutureAnxious,
    ];

    /// Short code ("T1".."T12"), the wire form of history labels
    pub fn code(&self) -> &'static str {
        match self {
            Self::ActivePresent => "T1",
            Self::HabitualPresent => "T2",
            Self::StableBeliefPresent => "T3",
            Self::HistoricalPast => "T4",
            Self::ExperientialPast => "T5",
            Self::NarrativePresent => "T6",
            Self::DeclaredFuture => "T7",
            Self::HedgedFuture => "T8",
            Self::Conditional => "T9",
            Self::CounterfactualPast => "T10",
            Self::PresentFatalistic => "T11",
            Self::FutureAnxious => "T12",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ActivePresent => "Active Present",
            Self::HabitualPresent => "Habitual Present",
            Self::StableBeliefPresent => "Stable Belief Present",
            Self::HistoricalPast => "Historical Past",
            Self::ExperientialPast => "Experiential Past",
            Self::NarrativePresent => "Narrative Present",
            Self::DeclaredFuture => "Declared Future",
            Self::HedgedFuture => "Hedged Future",
            Self::Conditional => "Conditional",
            Self::CounterfactualPast => "Counterfactual Past",
            Self::PresentFatalistic => "Present-Fatalistic",
            Self::FutureAnxious => "Future-Anxious",
        }
    }

    /// snake_case name, accepted as an alternative history label
    pub fn snake_name(&self) -> &'static str {
        match self {
            Self::ActivePresent => "active_present",
            Self::HabitualPresent => "habitual_present",
            Self::StableBeliefPresent => "stable_belief_present",
            Self::HistoricalPast => "historical_past",
            Self::ExperientialPast => "experiential_past",
            Self::NarrativePresent => "narrative_present",
            Self::DeclaredFuture => "declared_future",
            Self::HedgedFuture => "hedged_future",
            Self::Conditional => "conditional",
            Self::CounterfactualPast => "counterfactual_past",
            Self::PresentFatalistic => "present_fatalistic",
            Self::FutureAnxious => "future_anxious",
        }
    }

    /// Default psychological orientation.
    /// Narrative present is psychologically past: the speaker relives it.
    pub fn orientation(&self) -> TemporalOrientation {
        match self {
            Self::ActivePresent
            | Self::HabitualPresent
            | Self::StableBeliefPresent
            | Self::PresentFatalistic => TemporalOrientation::Present,
            Self::HistoricalPast
            | Self::ExperientialPast
            | Self::NarrativePresent
            | Self::CounterfactualPast => TemporalOrientation::Past,
            Self::DeclaredFuture
            | Self::HedgedFuture
            | Self::Conditional
            | Self::FutureAnxious => TemporalOrientation::Future,
        }
    }

    /// Default operation hint for the downstream graph engine
    pub fn graph_operation(&self) -> GraphOperation {
        match self {
            Self::ActivePresent
            | Self::HabitualPresent
            | Self::StableBeliefPresent
            | Self::NarrativePresent
            | Self::DeclaredFuture
            | Self::HedgedFuture
            | Self::Conditional => GraphOperation::Increment,
            Self::HistoricalPast => GraphOperation::Decrement,
            Self::ExperientialPast => GraphOperation::NoOperation,
            Self::CounterfactualPast => GraphOperation::Trigger,
            Self::PresentFatalistic | Self::FutureAnxious => GraphOperation::Flag,
        }
    }
}

impl FromStr for TenseClass {
    type Err = TasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        TenseClass::ALL
            .iter()
            .copied()
            .find(|tc| {
                tc.code().eq_ignore_ascii_case(label) || tc.snake_name().eq_ignore_ascii_case(label)
            })
            .ok_or_else(|| TasError::UnknownTenseLabel { label: s.to_string() })
    }
}

impl std::fmt::Display for TenseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Past / present / future
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalOrientation {
    Past,
    Present,
    Future,
}

impl std::fmt::Display for TemporalOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
        };
        write!(f, "{}", name)
    }
}

/// Operation hint routed to the downstream graph engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphOperation {
    /// Active engagement, boost node
    #[serde(rename = "INCREMENT")]
    Increment,
    /// Disengagement, reduce node
    #[serde(rename = "DECREMENT")]
    Decrement,
    /// Historical, archive node
    #[serde(rename = "ARCHIVE")]
    Archive,
    /// Concerning pattern
    #[serde(rename = "FLAG")]
    Flag,
    /// Conflict or regret
    #[serde(rename = "TRIGGER")]
    Trigger,
    /// Skip
    #[serde(rename = "NONE")]
    NoOperation,
}

impl GraphOperation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Increment => "INCREMENT",
            Self::Decrement => "DECREMENT",
            Self::Archive => "ARCHIVE",
            Self::Flag => "FLAG",
            Self::Trigger => "TRIGGER",
            Self::NoOperation => "NONE",
        }
    }
}

impl std::fmt::Display for GraphOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_code() {
        for tc in TenseClass::ALL {
            assert_eq!(tc.code().parse::<TenseClass>().unwrap(), tc);
            assert_eq!(tc.snake_name().parse::<TenseClass>().unwrap(), tc);
        }
    }

    #[test]
    fn test_unknown_label_is_error() {
        assert!("T13".parse::<TenseClass>().is_err());
        assert!("".parse::<TenseClass>().is_err());
    }

    #[test]
    fn test_serialized_as_code() {
        let json = serde_json::to_string(&TenseClass::CounterfactualPast).unwrap();
        assert_eq!(json, "\"T10\"");
        let op = serde_json::to_string(&GraphOperation::NoOperation).unwrap();
        assert_eq!(op, "\"NONE\"");
    }

    #[test]
    fn test_narrative_present_is_psychologically_past() {
        assert_eq!(TenseClass::NarrativePresent.orientation(), TemporalOrientation::Past);
        assert_eq!(TenseClass::HistoricalPast.graph_operation(), GraphOperation::Decrement);
        assert_eq!(TenseClass::HedgedFuture.graph_operation(), GraphOperation::Increment);
    }
}
