//! Tense scorer: weighted rule tables over a FeatureRecord
//!
//! Each class owns an ordered list of pure rules. A class score is the
//! weighted mean of its rules. Classes are declared in tie-break order:
//! a stable descending sort keeps the earlier class on equal scores.

use lazy_static::lazy_static;

use crate::types::{ClassificationResult, FeatureRecord, ScoredClass, TenseClass};

/// One weighted predicate
pub struct ScoringRule {
    pub name: &'static str,
    pub score: fn(&FeatureRecord) -> f64,
    pub weight: f64,
}

impl ScoringRule {
    fn new(name: &'static str, score: fn(&FeatureRecord) -> f64, weight: f64) -> Self {
        Self { name, score, weight }
    }
}

impl std::fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.name, self.weight)
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

lazy_static! {
    // =========================================================================
    // Rule table, in tie-break order
    // =========================================================================
    pub static ref RULES: Vec<(TenseClass, Vec<ScoringRule>)> = vec![
        (TenseClass::ActivePresent, vec![
            ScoringRule::new("present_tense", |f| flag(f.is_present()), 1.0),
            ScoringRule::new("first_person", |f| if f.has_first_person { 0.7 } else { 0.0 }, 0.8),
            ScoringRule::new("low_hedging", |f| if f.uncertainty() < 0.6 { 1.0 } else { 0.3 }, 0.7),
        ]),
        (TenseClass::HabitualPresent, vec![
            ScoringRule::new("present_tense", |f| flag(f.is_present()), 1.0),
            ScoringRule::new("habitual_marker", |f| flag(f.has_habitual_adverb), 1.0),
        ]),
        (TenseClass::NarrativePresent, vec![
            ScoringRule::new("present_tense", |f| if f.is_present() { 0.9 } else { 0.1 }, 0.9),
            ScoringRule::new("narrative_marker", |f| (f.narrative_marker_count as f64).min(1.0), 1.0),
        ]),
        (TenseClass::StableBeliefPresent, vec![
            ScoringRule::new("belief_verb", |f| flag(f.has_belief_verb), 1.0),
            ScoringRule::new("present_tense", |f| if f.is_present() { 1.0 } else { 0.5 }, 0.8),
        ]),
        (TenseClass::HistoricalPast, vec![
            ScoringRule::new("past_tense", |f| flag(f.is_past()), 1.0),
            ScoringRule::new("not_perfective", |f| if f.is_perfective { 0.5 } else { 1.0 }, 0.7),
        ]),
        (TenseClass::ExperientialPast, vec![
            ScoringRule::new("perfective", |f| flag(f.is_perfective || f.morph_tense == "Perf"), 1.0),
            ScoringRule::new(
                "have_been_pattern",
                |f| {
                    let lower = f.text.to_lowercase();
                    if lower.contains("have been") || lower.contains("has been") { 0.8 } else { 0.0 }
                },
                0.9,
            ),
        ]),
        (TenseClass::CounterfactualPast, vec![
            ScoringRule::new("counterfactual_pattern", |f| flag(f.has_counterfactual_aux), 1.0),
            ScoringRule::new("past_tense", |f| flag(f.is_past()), 0.9),
        ]),
        (TenseClass::DeclaredFuture, vec![
            ScoringRule::new("will_modal", |f| flag(f.has_will), 1.0),
            ScoringRule::new("low_hedging", |f| if f.uncertainty() < 0.5 { 1.0 } else { 0.2 }, 0.8),
        ]),
        (TenseClass::HedgedFuture, vec![
            ScoringRule::new("future_modal", |f| if f.has_could || f.has_might { 1.0 } else { 0.4 }, 1.0),
            ScoringRule::new("hedging", |f| if f.uncertainty() > 0.1 { 1.0 } else { 0.1 }, 0.9),
        ]),
        (TenseClass::Conditional, vec![
            ScoringRule::new("if_clause", |f| flag(f.has_if_clause), 1.0),
            ScoringRule::new("would_modal", |f| flag(f.has_would), 1.0),
            ScoringRule::new("not_present_tense", |f| if f.is_present() { 0.5 } else { 1.0 }, 0.8),
        ]),
        (TenseClass::PresentFatalistic, vec![
            ScoringRule::new("present_tense", |f| if f.is_present() { 1.0 } else { 0.1 }, 0.8),
            ScoringRule::new("fatalistic_phrase", |f| flag(f.has_fatalistic_phrase), 1.0),
        ]),
        (TenseClass::FutureAnxious, vec![
            ScoringRule::new("emotion_words", |f| flag(f.emotion_word_count > 0), 1.0),
            ScoringRule::new(
                "future_modal",
                |f| if f.has_will || f.has_would || f.has_could { 0.8 } else { 0.3 },
                0.8,
            ),
        ]),
    ];
}

/// Weighted mean of a rule list; 0 when the weights sum to 0
fn score_rules(rules: &[ScoringRule], features: &FeatureRecord) -> f64 {
    let total: f64 = rules.iter().map(|r| r.weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    rules
        .iter()
        .map(|r| (r.score)(features) * r.weight)
        .sum::<f64>()
        / total
}

/// Twelve-way tense classifier
#[derive(Debug, Default)]
pub struct TenseClassifier;

impl TenseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// All twelve scores, in rule-table order
    pub fn score_all(&self, features: &FeatureRecord) -> Vec<ScoredClass> {
        RULES
            .iter()
            .map(|(class, rules)| ScoredClass {
                class: *class,
                score: score_rules(rules, features),
            })
            .collect()
    }

    /// Score every class and pick the winner
    pub fn classify(&self, features: &FeatureRecord) -> ClassificationResult {
        let all_scores = self.score_all(features);

        let mut ranked = all_scores.clone();
        // sort_by is stable: equal scores keep declaration order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        let winner = ranked[0];
        ClassificationResult {
            tense_class: winner.class,
            confidence: winner.score,
            top_3: ranked.into_iter().take(3).collect(),
            all_scores,
            features: features.clone(),
        }
    }

    /// Human-readable breakdown of a classification
    pub fn explain(&self, result: &ClassificationResult) -> String {
        let f = &result.features;
        let mut out = String::new();
        out.push_str(&format!("Sentence: {}\n", f.text));
        out.push_str(&format!(
            "Class: {} ({})  confidence {:.2}\n",
            result.tense_class.code(),
            result.tense_class.display_name(),
            result.confidence
        ));
        out.push_str("Top 3:\n");
        for (i, s) in result.top_3.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {:<26} {:.2}\n",
                i + 1,
                s.class.display_name(),
                s.score
            ));
        }
        out.push_str(&format!(
            "Features: tense={} first_person={} will={} would={} could={} might={}\n",
            f.morph_tense, f.has_first_person, f.has_will, f.has_would, f.has_could, f.has_might
        ));
        out.push_str(&format!(
            "          perfective={} progressive={} emotions={} narrative={} belief_verb={} certainty={:.2}\n",
            f.is_perfective,
            f.is_progressive,
            f.emotion_word_count,
            f.narrative_marker_count,
            f.has_belief_verb,
            f.certainty
        ));
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_rule_table_order() {
        let order: Vec<&str> = RULES.iter().map(|(c, _)| c.code()).collect();
        assert_eq!(
            order,
            vec!["T1", "T2", "T6", "T3", "T4", "T5", "T10", "T7", "T8", "T9", "T11", "T12"]
        );
    }

    #[test]
    fn test_past_first_person_habitual() {
        let rec = FeatureRecord {
            morph_tense: "Past".into(),
            has_first_person: true,
            has_habitual_adverb: true,
            ..FeatureRecord::default()
        };
        let result = TenseClassifier::new().classify(&rec);
        assert_eq!(result.tense_class, TenseClass::HistoricalPast);
        assert!(close(result.confidence, 1.0));
        assert!(close(result.score_of(TenseClass::ActivePresent), 0.504));
        assert!(close(result.score_of(TenseClass::HabitualPresent), 0.5));
    }

    #[test]
    fn test_default_record_scores_declared_future() {
        let result = TenseClassifier::new().classify(&FeatureRecord::default());
        assert_eq!(result.tense_class, TenseClass::DeclaredFuture);
        assert!(close(result.confidence, 0.444));
    }

    #[test]
    fn test_tie_keeps_declaration_order() {
        // past counterfactual: T4 and T10 both score 1.0
        let rec = FeatureRecord {
            morph_tense: "Past".into(),
            has_counterfactual_aux: true,
            has_should: true,
            certainty: 0.8,
            ..FeatureRecord::default()
        };
        let result = TenseClassifier::new().classify(&rec);
        assert!(close(result.score_of(TenseClass::CounterfactualPast), 1.0));
        assert_eq!(result.tense_class, TenseClass::HistoricalPast);
        assert_eq!(result.top_3[1].class, TenseClass::CounterfactualPast);
    }

    #[test]
    fn test_hedged_will() {
        let rec = FeatureRecord {
            has_will: true,
            certainty: 0.2,
            ..FeatureRecord::default()
        };
        let result = TenseClassifier::new().classify(&rec);
        assert_eq!(result.tense_class, TenseClass::HedgedFuture);
        assert!(close(result.confidence, 0.684));
        assert!(close(result.score_of(TenseClass::DeclaredFuture), 0.644));
    }

    #[test]
    fn test_scores_bounded() {
        let rec = FeatureRecord {
            morph_tense: "Pres".into(),
            has_will: true,
            has_would: true,
            has_if_clause: true,
            has_fatalistic_phrase: true,
            emotion_word_count: 3,
            narrative_marker_count: 4,
            ..FeatureRecord::default()
        };
        let result = TenseClassifier::new().classify(&rec);
        assert_eq!(result.all_scores.len(), 12);
        assert!(result.all_scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        assert_eq!(result.top_3.len(), 3);
        assert_eq!(result.confidence, result.top_3[0].score);
    }

    #[test]
    fn test_explain_names_winner() {
        let classifier = TenseClassifier::new();
        let result = classifier.classify(&FeatureRecord::default());
        let text = classifier.explain(&result);
        assert!(text.contains("T7"));
        assert!(text.contains("Declared Future"));
    }
}
