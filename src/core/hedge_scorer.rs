//! Hedge scorer: how certain a sentence reads, in [0.01, 1]
//!
//! Discounts stack multiplicatively. An uncertain modal counts only when it
//! governs a verb. "i think" and "i believe" count only when they frame a
//! clause. A certainty booster suppresses the modal discount and restores
//! half of whatever certainty the other hedges took away.

use tracing::trace;

use crate::config::{HedgeConfig, HedgePattern};
use crate::types::{Annotation, HedgeResult, Pos};
use crate::{BOOSTER_RESTORATION, HEDGE_SCORE_FLOOR, UNCERTAIN_MODAL_DISCOUNT};

/// Clausal dependents that make a cognition verb epistemic
const CLAUSAL_DEPS: &[&str] = &["ccomp", "xcomp", "csubj"];

/// Context-aware hedge scorer
#[derive(Debug, Clone)]
pub struct HedgeScorer {
    config: HedgeConfig,
}

impl Default for HedgeScorer {
    fn default() -> Self {
        Self::new(HedgeConfig::default())
    }
}

impl HedgeScorer {
    /// Phrases are matched against lowercased text, so they are lowercased here
    pub fn new(mut config: HedgeConfig) -> Self {
        let lower = |table: &mut Vec<HedgePattern>| {
            for p in table.iter_mut() {
                p.phrase = p.phrase.to_lowercase();
            }
        };
        lower(&mut config.strong);
        lower(&mut config.medium);
        lower(&mut config.light);
        for b in config.boosters.iter_mut() {
            *b = b.to_lowercase();
        }
        Self { config }
    }

    pub fn config(&self) -> &HedgeConfig {
        &self.config
    }

    /// Score one sentence against its annotation
    pub fn score(&self, text: &str, annotation: &Annotation) -> HedgeResult {
        if text.trim().is_empty() {
            return HedgeResult::certain();
        }
        let lower = text.to_lowercase();

        let mut hedges: Vec<String> = Vec::new();
        let mut multipliers: Vec<f64> = Vec::new();

        let boosters: Vec<String> = self
            .config
            .boosters
            .iter()
            .filter(|b| lower.contains(b.as_str()))
            .cloned()
            .collect();
        let boosted = !boosters.is_empty();

        let has_uncertain_modal = self.has_uncertain_modal(annotation);
        if has_uncertain_modal && !boosted {
            multipliers.push(UNCERTAIN_MODAL_DISCOUNT);
            if let Some(modal) = annotation
                .tokens
                .iter()
                .find(|t| self.is_uncertain_modal_lemma(&t.lemma))
            {
                hedges.push(modal.text.to_lowercase());
            }
        }

        for (table, skip_modals) in [
            (&self.config.strong, false),
            (&self.config.medium, true),
            (&self.config.light, false),
        ] {
            for pattern in table {
                if skip_modals && self.is_uncertain_modal_lemma(&pattern.phrase) {
                    continue;
                }
                if self.is_hedge(&pattern.phrase, &lower, annotation) {
                    trace!(phrase = %pattern.phrase, factor = pattern.factor, "hedge matched");
                    hedges.push(pattern.phrase.clone());
                    multipliers.push(pattern.factor);
                }
            }
        }

        let mut score: f64 = multipliers.iter().product();
        if boosted && score < 1.0 {
            score = (score + (1.0 - score) * BOOSTER_RESTORATION).min(1.0);
        }
        let score = score.max(HEDGE_SCORE_FLOOR);

        HedgeResult {
            score: round4(score),
            hedges: dedup(hedges),
            boosters,
            has_uncertain_modal,
            has_certain_modal: self.has_certain_modal(annotation),
            is_heavily_hedged: score < self.config.heavily_hedged_threshold,
            multipliers,
        }
    }

    fn is_uncertain_modal_lemma(&self, lemma: &str) -> bool {
        self.config
            .uncertain_modals
            .iter()
            .any(|m| m.eq_ignore_ascii_case(lemma))
    }

    /// Uncertain modal as an auxiliary of a verb, or tagged AUX anywhere
    fn has_uncertain_modal(&self, annotation: &Annotation) -> bool {
        annotation.tokens.iter().any(|t| {
            self.is_uncertain_modal_lemma(&t.lemma)
                && ((t.dep == "aux"
                    && annotation.tokens.get(t.head).is_some_and(|h| h.pos == Pos::VERB))
                    || t.pos == Pos::AUX)
        })
    }

    fn has_certain_modal(&self, annotation: &Annotation) -> bool {
        annotation.tokens.iter().any(|t| {
            t.pos == Pos::AUX
                && self
                    .config
                    .certain_modals
                    .iter()
                    .any(|m| m.eq_ignore_ascii_case(&t.lemma))
        })
    }

    /// Pattern present and functioning as a hedge
    fn is_hedge(&self, phrase: &str, lower: &str, annotation: &Annotation) -> bool {
        if !lower.contains(phrase) {
            return false;
        }
        match phrase {
            "i think" => is_epistemic_think(annotation),
            "i believe" => is_epistemic_believe(annotation),
            _ => true,
        }
    }
}

fn find_verb<'a>(annotation: &'a Annotation, lemma: &str) -> Option<usize> {
    annotation
        .tokens
        .iter()
        .position(|t| t.pos == Pos::VERB && t.lemma == lemma)
}

/// "I think I should go" frames a clause; "I think about life" and
/// "I think pizza is good" assert
fn is_epistemic_think(annotation: &Annotation) -> bool {
    let Some(think) = find_verb(annotation, "think") else {
        return false;
    };
    for c in annotation.children(think) {
        let child = &annotation.tokens[c];
        if CLAUSAL_DEPS.contains(&child.dep.as_str()) && child.pos == Pos::VERB {
            return true;
        }
        if child.dep == "prep" && (child.lemma == "about" || child.lemma == "of") {
            return false;
        }
    }
    annotation.tokens[think + 1..]
        .iter()
        .any(|t| t.pos == Pos::VERB)
}

/// "I believe in honesty" is a belief statement; anything else hedges
fn is_epistemic_believe(annotation: &Annotation) -> bool {
    let Some(believe) = find_verb(annotation, "believe") else {
        return false;
    };
    for c in annotation.children(believe) {
        let child = &annotation.tokens[c];
        if child.dep == "prep" && child.lemma == "in" {
            return false;
        }
        if child.dep == "ccomp" || child.dep == "xcomp" {
            return true;
        }
    }
    true
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Drop repeats, keep first-seen order
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotator::{Annotator, RuleAnnotator};
    use pretty_assertions::assert_eq;

    fn score(text: &str) -> HedgeResult {
        let annotation = RuleAnnotator::new().annotate(text).unwrap();
        HedgeScorer::default().score(text, &annotation)
    }

    #[test]
    fn test_plain_statement_is_certain() {
        let r = score("I run every day");
        assert_eq!(r.score, 1.0);
        assert!(r.hedges.is_empty());
        assert!(!r.is_heavily_hedged);
    }

    #[test]
    fn test_hedges_stack() {
        let r = score("I might kind of want to try it");
        assert_eq!(r.score, 0.125);
        assert_eq!(r.hedges, vec!["might", "kind of"]);
        assert!(r.has_uncertain_modal);
        assert!(r.is_heavily_hedged);
        assert_eq!(r.multipliers, vec![0.5, 0.25]);
    }

    #[test]
    fn test_maybe_is_not_double_counted_as_may() {
        let r = score("lately I've been thinking maybe I'll get back into it.");
        assert_eq!(r.score, 0.2);
        assert_eq!(r.hedges, vec!["maybe"]);
        assert!(!r.has_uncertain_modal);
        assert!(r.has_certain_modal);
    }

    #[test]
    fn test_booster_without_hedges() {
        let r = score("I will definitely launch next month");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.boosters, vec!["definitely", "will definitely"]);
        assert!(r.has_certain_modal);
    }

    #[test]
    fn test_booster_suppresses_modal_and_restores() {
        let r = score("I could definitely maybe do it");
        assert!(r.has_uncertain_modal);
        assert!(!r.hedges.contains(&"could".to_string()));
        // 0.2 restored halfway to 1.0
        assert_eq!(r.score, 0.6);
    }

    #[test]
    fn test_copular_think_is_not_a_hedge() {
        let r = score("I think pizza is good");
        assert_eq!(r.score, 1.0);
        assert!(r.hedges.is_empty());
    }

    #[test]
    fn test_clausal_think_is_a_hedge() {
        let r = score("I think I should go");
        assert_eq!(r.score, 0.4);
        assert_eq!(r.hedges, vec!["i think", "should"]);
    }

    #[test]
    fn test_prepositional_think_is_not_a_hedge() {
        assert_eq!(score("I think about life").score, 1.0);
    }

    #[test]
    fn test_believe_in_is_not_a_hedge() {
        assert_eq!(score("I believe in hard work").score, 1.0);
    }

    #[test]
    fn test_floor() {
        let r = score("maybe perhaps possibly someday who knows, kind of sort of");
        assert_eq!(r.score, HEDGE_SCORE_FLOOR);
        assert!(r.is_heavily_hedged);
    }

    #[test]
    fn test_empty_text_is_certain() {
        assert_eq!(HedgeScorer::default().score("  ", &Annotation::default()), HedgeResult::certain());
    }

    #[test]
    fn test_out_of_range_modal_head_is_ignored() {
        let mut annotation = RuleAnnotator::new().annotate("I might go").unwrap();
        let might = annotation.tokens.iter().position(|t| t.lemma == "might").unwrap();
        annotation.tokens[might].pos = Pos::VERB;
        annotation.tokens[might].dep = "aux".to_string();
        annotation.tokens[might].head = 99;
        let r = HedgeScorer::default().score("I might go", &annotation);
        assert!(!r.has_uncertain_modal);
    }
}
