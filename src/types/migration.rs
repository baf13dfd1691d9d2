//! Tense migration events

use serde::{Deserialize, Serialize};

/// Behavioral shift signalled by a change in a topic's dominant tense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationEvent {
    /// Active (T1/T2/T6) → historical (T4)
    Deprioritization,
    /// Historical (T4) → active
    Reactivation,
    /// Declared (T7) → hedged / conditional (T8/T9)
    CommitmentDecay,
    /// Hedged / conditional → declared
    CommitmentIncrease,
    /// Belief (T3) → counterfactual (T10)
    BeliefQuestioning,
}

impl MigrationEvent {
    pub const ALL: [MigrationEvent; 5] = [
        MigrationEvent::Deprioritization,
        MigrationEvent::Reactivation,
        MigrationEvent::CommitmentDecay,
        MigrationEvent::CommitmentIncrease,
        MigrationEvent::BeliefQuestioning,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Deprioritization => "DEPRIORITIZATION",
            Self::Reactivation => "REACTIVATION",
            Self::CommitmentDecay => "COMMITMENT_DECAY",
            Self::CommitmentIncrease => "COMMITMENT_INCREASE",
            Self::BeliefQuestioning => "BELIEF_QUESTIONING",
        }
    }

    /// Human-readable reading of the event, optionally naming the topic
    pub fn interpretation(&self, topic: Option<&str>) -> String {
        let on = topic.map(|t| format!(" on '{}'", t)).unwrap_or_default();
        match self {
            Self::Deprioritization => format!(
                "User has stopped actively working on this{}. Shifted from active engagement to historical framing.",
                on
            ),
            Self::Reactivation => format!(
                "User is resuming focus on this{}. Shifted from historical to active engagement.",
                on
            ),
            Self::CommitmentDecay => format!(
                "User's commitment is weakening{}. Shifted from declared certainty to hedging/conditions.",
                on
            ),
            Self::CommitmentIncrease => format!(
                "User's commitment is strengthening{}. Shifted from hedging/conditions to declared certainty.",
                on
            ),
            Self::BeliefQuestioning => format!(
                "User is questioning core beliefs{}. Shifted from stable belief to counterfactual (regret).",
                on
            ),
        }
    }

    /// Follow-up actions for the downstream consumer
    pub fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            Self::Deprioritization => &[
                "Check if user has genuinely moved on or facing obstacles",
                "Ask clarifying questions about current status",
                "Update graph node importance downward",
            ],
            Self::Reactivation => &[
                "Celebrate renewed engagement",
                "Identify what triggered reactivation",
                "Update graph node importance upward",
            ],
            Self::CommitmentDecay => &[
                "Explore reasons for weakening commitment",
                "Identify blockers or doubts",
                "Consider whether conditions can be met",
            ],
            Self::CommitmentIncrease => &[
                "Reinforce the increased commitment",
                "Support concrete next steps",
                "Update intention tracking upward",
            ],
            Self::BeliefQuestioning => &[
                "Deep exploration of belief shift",
                "Understand regret or dissatisfaction",
                "Explore value realignment",
            ],
        }
    }
}

impl std::fmt::Display for MigrationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_names_topic() {
        let text = MigrationEvent::Deprioritization.interpretation(Some("fitness"));
        assert!(text.contains("on 'fitness'"));
        let bare = MigrationEvent::Deprioritization.interpretation(None);
        assert!(bare.starts_with("User has stopped actively working on this."));
    }

    #[test]
    fn test_every_event_has_actions() {
        for ev in MigrationEvent::ALL {
            assert_eq!(ev.recommended_actions().len(), 3);
        }
        assert_eq!(
            serde_json::to_string(&MigrationEvent::CommitmentDecay).unwrap(),
            "\"COMMITMENT_DECAY\""
        );
    }
}
