//! Configuration surface
//!
//! Every field is optional in TOML; missing fields fall back to the built-in
//! tables below.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TasError, TasResult};
use crate::types::{MigrationEvent, TenseClass, ZimbardoVector};
use crate::{HEAVILY_HEDGED_THRESHOLD, MIN_HISTORY_LEN, TREND_WINDOW};

// =============================================================================
// BUILT-IN HEDGE TABLES
// =============================================================================

/// Significant uncertainty (×0.15-0.25)
pub const STRONG_HEDGES: &[(&str, f64)] = &[
    ("maybe", 0.20),
    ("perhaps", 0.20),
    ("possibly", 0.20),
    ("someday", 0.15),
    ("kind of", 0.25),
    ("sort of", 0.25),
    ("i guess", 0.20),
    ("i suppose", 0.25),
    ("not sure", 0.20),
    ("who knows", 0.15),
];

/// Moderate uncertainty (×0.45-0.60)
pub const MEDIUM_HEDGES: &[(&str, f64)] = &[
    ("might", 0.50),
    ("could", 0.55),
    ("may", 0.55),
    ("probably", 0.60),
    ("likely", 0.60),
    ("i think", 0.50),
    ("sometimes", 0.55),
    ("tends to", 0.50),
    ("seems like", 0.45),
    ("appears to", 0.50),
];

/// Minor uncertainty (×0.70-0.85)
pub const LIGHT_HEDGES: &[(&str, f64)] = &[
    ("usually", 0.80),
    ("generally", 0.80),
    ("mostly", 0.80),
    ("often", 0.85),
    ("i believe", 0.75),
    ("i hope", 0.70),
    ("i feel like", 0.75),
    ("should", 0.80),
];

pub const BOOSTERS: &[&str] = &[
    "definitely",
    "absolutely",
    "certainly",
    "for sure",
    "without doubt",
    "i know",
    "i am certain",
    "will definitely",
    "must",
];

pub const UNCERTAIN_MODALS: &[&str] = &["might", "could", "may"];

pub const CERTAIN_MODALS: &[&str] = &["will", "shall", "must"];

// =============================================================================
// BUILT-IN ZIMBARDO MATRIX
// (past_negative, past_positive, present_hedonistic, present_fatalistic, future)
// =============================================================================

pub const ZIMBARDO_MATRIX: &[(TenseClass, [f64; 5])] = &[
    (TenseClass::ActivePresent, [0.0, 0.0, 0.02, 0.0, 0.0]),
    (TenseClass::HabitualPresent, [0.0, 0.0, 0.01, 0.0, 0.01]),
    (TenseClass::StableBeliefPresent, [0.0, 0.0, 0.0, 0.0, 0.02]),
    (TenseClass::HistoricalPast, [0.01, 0.02, 0.0, 0.0, 0.0]),
    (TenseClass::ExperientialPast, [0.01, 0.01, 0.0, 0.0, 0.0]),
    (TenseClass::NarrativePresent, [0.01, 0.02, 0.01, 0.0, 0.0]),
    (TenseClass::DeclaredFuture, [0.0, 0.0, 0.0, 0.0, 0.04]),
    (TenseClass::HedgedFuture, [0.0, 0.0, 0.0, 0.0, 0.02]),
    (TenseClass::Conditional, [0.0, 0.0, 0.01, 0.01, 0.01]),
    (TenseClass::CounterfactualPast, [0.05, 0.0, 0.0, 0.01, 0.0]),
    (TenseClass::PresentFatalistic, [0.02, 0.0, 0.0, 0.05, 0.0]),
    (TenseClass::FutureAnxious, [0.01, 0.0, 0.0, 0.02, 0.02]),
];

// =============================================================================
// BUILT-IN MIGRATION TABLE
// =============================================================================

pub const MIGRATION_TABLE: &[(TenseClass, TenseClass, MigrationEvent)] = &[
    (TenseClass::ActivePresent, TenseClass::HistoricalPast, MigrationEvent::Deprioritization),
    (TenseClass::HabitualPresent, TenseClass::HistoricalPast, MigrationEvent::Deprioritization),
    (TenseClass::NarrativePresent, TenseClass::HistoricalPast, MigrationEvent::Deprioritization),
    (TenseClass::HistoricalPast, TenseClass::ActivePresent, MigrationEvent::Reactivation),
    (TenseClass::HistoricalPast, TenseClass::HabitualPresent, MigrationEvent::Reactivation),
    (TenseClass::HistoricalPast, TenseClass::NarrativePresent, MigrationEvent::Reactivation),
    (TenseClass::DeclaredFuture, TenseClass::HedgedFuture, MigrationEvent::CommitmentDecay),
    (TenseClass::DeclaredFuture, TenseClass::Conditional, MigrationEvent::CommitmentDecay),
    (TenseClass::HedgedFuture, TenseClass::DeclaredFuture, MigrationEvent::CommitmentIncrease),
    (TenseClass::Conditional, TenseClass::DeclaredFuture, MigrationEvent::CommitmentIncrease),
    (TenseClass::StableBeliefPresent, TenseClass::CounterfactualPast, MigrationEvent::BeliefQuestioning),
];

// =============================================================================
// CONFIG STRUCTS
// =============================================================================

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TasConfig {
    pub hedge: HedgeConfig,
    pub zimbardo: ZimbardoConfig,
    pub migration: MigrationConfig,
    pub analyzer: AnalyzerConfig,
}

/// A hedge phrase and its multiplicative discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgePattern {
    pub phrase: String,
    pub factor: f64,
}

impl HedgePattern {
    pub fn new(phrase: &str, factor: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HedgeConfig {
    pub strong: Vec<HedgePattern>,
    pub medium: Vec<HedgePattern>,
    pub light: Vec<HedgePattern>,
    pub boosters: Vec<String>,
    pub uncertain_modals: Vec<String>,
    pub certain_modals: Vec<String>,
    pub heavily_hedged_threshold: f64,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        let table = |t: &[(&str, f64)]| t.iter().map(|(p, f)| HedgePattern::new(p, *f)).collect();
        let words = |w: &[&str]| w.iter().map(|s| s.to_string()).collect();
        Self {
            strong: table(STRONG_HEDGES),
            medium: table(MEDIUM_HEDGES),
            light: table(LIGHT_HEDGES),
            boosters: words(BOOSTERS),
            uncertain_modals: words(UNCERTAIN_MODALS),
            certain_modals: words(CERTAIN_MODALS),
            heavily_hedged_threshold: HEAVILY_HEDGED_THRESHOLD,
        }
    }
}

/// Contribution of one tense class to the Zimbardo vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZimbardoContribution {
    pub class: TenseClass,
    #[serde(flatten)]
    pub vector: ZimbardoVector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZimbardoConfig {
    pub contributions: Vec<ZimbardoContribution>,
}

impl Default for ZimbardoConfig {
    fn default() -> Self {
        Self {
            contributions: ZIMBARDO_MATRIX
                .iter()
                .map(|(class, v)| ZimbardoContribution {
                    class: *class,
                    vector: ZimbardoVector::new(v[0], v[1], v[2], v[3], v[4]),
                })
                .collect(),
        }
    }
}

impl ZimbardoConfig {
    /// Contribution row for `class`, zero if absent
    pub fn vector_for(&self, class: TenseClass) -> ZimbardoVector {
        self.contributions
            .iter()
            .find(|c| c.class == class)
            .map(|c| c.vector)
            .unwrap_or_default()
    }
}

/// One ordered pair of the migration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRule {
    pub from: TenseClass,
    pub to: TenseClass,
    pub event: MigrationEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub rules: Vec<MigrationRule>,
    pub min_history_len: usize,
    pub trend_window: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            rules: MIGRATION_TABLE
                .iter()
                .map(|(from, to, event)| MigrationRule {
                    from: *from,
                    to: *to,
                    event: *event,
                })
                .collect(),
            min_history_len: MIN_HISTORY_LEN,
            trend_window: TREND_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Refine the coarse certainty seed to the hedge score before scoring
    pub consolidate_certainty: bool,
    /// Whole-message budget; exceeded ⇒ `TasError::Timeout`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_timeout_ms: Option<u64>,
    /// Split sentences at ", but" / ", yet" / ", however" / ", whereas" and ";"
    pub split_contrast_clauses: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            consolidate_certainty: true,
            message_timeout_ms: None,
            split_contrast_clauses: true,
        }
    }
}

// =============================================================================
// LOADING & VALIDATION
// =============================================================================

impl TasConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(toml_str: &str) -> TasResult<Self> {
        let config: TasConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> TasResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> TasResult<String> {
        toml::to_string(self).map_err(|e| TasError::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> TasResult<()> {
        let hedge = &self.hedge;
        for pattern in hedge.strong.iter().chain(&hedge.medium).chain(&hedge.light) {
            if pattern.phrase.trim().is_empty() {
                return invalid("hedge phrase must not be empty".to_string());
            }
            if !(pattern.factor > 0.0 && pattern.factor <= 1.0) {
                return invalid(format!(
                    "hedge factor for {:?} must be in (0, 1], got {}",
                    pattern.phrase, pattern.factor
                ));
            }
        }
        if !(0.0..=1.0).contains(&hedge.heavily_hedged_threshold) {
            return invalid(format!(
                "heavily_hedged_threshold must be in [0, 1], got {}",
                hedge.heavily_hedged_threshold
            ));
        }

        for class in TenseClass::ALL {
            let count = self
                .zimbardo
                .contributions
                .iter()
                .filter(|c| c.class == class)
                .count();
            if count != 1 {
                return invalid(format!(
                    "zimbardo matrix needs exactly one row for {}, found {}",
                    class, count
                ));
            }
        }
        for row in &self.zimbardo.contributions {
            if row.vector.values().iter().any(|v| !(0.0..=1.0).contains(v)) {
                return invalid(format!("zimbardo row for {} must lie in [0, 1]", row.class));
            }
        }

        let mut pairs = HashSet::new();
        for rule in &self.migration.rules {
            if rule.from == rule.to {
                return invalid(format!("migration rule {}→{} is a self-loop", rule.from, rule.to));
            }
            if !pairs.insert((rule.from, rule.to)) {
                return invalid(format!("duplicate migration rule {}→{}", rule.from, rule.to));
            }
        }
        if self.migration.min_history_len < 2 {
            return invalid(format!(
                "min_history_len must be at least 2, got {}",
                self.migration.min_history_len
            ));
        }

        if self.analyzer.message_timeout_ms == Some(0) {
            return invalid("message_timeout_ms must be positive".to_string());
        }
        Ok(())
    }
}

fn invalid(message: String) -> TasResult<()> {
    Err(TasError::InvalidConfig { message })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid() {
        assert!(TasConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = TasConfig::from_toml_str("").unwrap();
        assert_eq!(config, TasConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TasConfig::default();
        config.analyzer.message_timeout_ms = Some(250);
        config.migration.trend_window = 7;
        let text = config.to_toml_string().unwrap();
        let back = TasConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_override() {
        let config = TasConfig::from_toml_str(
            r#"
            [hedge]
            heavily_hedged_threshold = 0.5

            [analyzer]
            split_contrast_clauses = false
            "#,
        )
        .unwrap();
        assert_eq!(config.hedge.heavily_hedged_threshold, 0.5);
        assert!(!config.analyzer.split_contrast_clauses);
        assert_eq!(config.hedge.strong.len(), 10);
        assert_eq!(config.migration.rules.len(), 11);
    }

    #[test]
    fn test_bad_factor_rejected() {
        let err = TasConfig::from_toml_str(
            r#"
            [hedge]
            strong = [{ phrase = "maybe", factor = 1.5 }]
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "TAS_INVALID_CONFIG");
    }

    #[test]
    fn test_duplicate_migration_rule_rejected() {
        let mut config = TasConfig::default();
        let first = config.migration.rules[0].clone();
        config.migration.rules.push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_zimbardo_row_rejected() {
        let mut config = TasConfig::default();
        config.zimbardo.contributions.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_class_is_parse_error() {
        let err = TasConfig::from_toml_str(
            r#"
            [[migration.rules]]
            from = "T13"
            to = "T4"
            event = "DEPRIORITIZATION"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "TAS_CONFIG_PARSE");
    }
}
