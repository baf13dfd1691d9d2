//! Zimbardo accumulator: tense classes → time-perspective profile
//!
//! Each classified sentence adds its class row of the contribution matrix,
//! scaled by hedge certainty. For the two plain past classes the sentiment of
//! the sentence shifts weight between past-negative and past-positive.

use tracing::debug;

use crate::config::ZimbardoConfig;
use crate::types::{TenseClass, ZimbardoDimension, ZimbardoVector};
use crate::SENTIMENT_SWING;

// =============================================================================
// SENTIMENT LEXICON
// =============================================================================

const POSITIVE_WORDS: &[&str] = &[
    "love", "happy", "great", "amazing", "wonderful", "excellent", "proud", "excited", "grateful",
    "good", "best", "perfect", "success", "achieve", "win", "strong", "confident", "capable",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "sad", "terrible", "awful", "horrible", "bad", "ashamed", "scared", "worried",
    "anxious", "fail", "weak", "struggle", "difficult", "pain", "regret", "sorry", "upset",
];

/// Sentiment modifier in [0.5, 1.5]: below 1 negative, above 1 positive
pub fn sentiment_modifier(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let pos = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    let neg = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    if pos + neg == 0.0 {
        return 1.0;
    }
    1.0 + SENTIMENT_SWING * (pos - neg) / (pos + neg)
}

/// Running, capped Zimbardo profile
#[derive(Debug, Clone)]
pub struct ZimbardoAccumulator {
    matrix: ZimbardoConfig,
    profile: ZimbardoVector,
}

impl Default for ZimbardoAccumulator {
    fn default() -> Self {
        Self::new(ZimbardoConfig::default())
    }
}

impl ZimbardoAccumulator {
    pub fn new(matrix: ZimbardoConfig) -> Self {
        Self {
            matrix,
            profile: ZimbardoVector::zero(),
        }
    }

    /// Add one sentence's contribution and return the delta (before capping)
    pub fn add_contribution(&mut self, class: TenseClass, hedge: f64, text: &str) -> ZimbardoVector {
        let mut delta = self.matrix.vector_for(class).scaled(hedge);

        if !text.is_empty()
            && matches!(class, TenseClass::HistoricalPast | TenseClass::ExperientialPast)
        {
            let modifier = sentiment_modifier(text);
            delta.past_negative *= modifier;
            delta.past_positive *= 2.0 - modifier;
        }

        self.profile = self.profile.add_capped(&delta);
        debug!(
            class = %class,
            hedge,
            dominant = %self.profile.dominant(),
            "zimbardo contribution added"
        );
        delta
    }

    /// Feed (class, hedge, text) triples in order; returns the profile
    pub fn accumulate<'a, I>(&mut self, items: I) -> ZimbardoVector
    where
        I: IntoIterator<Item = (TenseClass, f64, &'a str)>,
    {
        for (class, hedge, text) in items {
            self.add_contribution(class, hedge, text);
        }
        self.profile
    }

    pub fn profile(&self) -> ZimbardoVector {
        self.profile
    }

    pub fn normalize(&self) -> ZimbardoVector {
        self.profile.normalize()
    }

    pub fn dominant_orientation(&self) -> ZimbardoDimension {
        self.profile.dominant()
    }

    pub fn reset(&mut self) {
        self.profile = ZimbardoVector::zero();
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
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_neutral_sentiment() {
        assert_eq!(sentiment_modifier("I walked to the shop"), 1.0);
        assert_eq!(sentiment_modifier("I was happy"), 1.5);
        assert_eq!(sentiment_modifier("I was sad"), 0.5);
        assert_eq!(sentiment_modifier("good and bad"), 1.0);
    }

    #[test]
    fn test_declared_future_row() {
        let mut acc = ZimbardoAccumulator::default();
        let delta = acc.add_contribution(TenseClass::DeclaredFuture, 1.0, "I will launch");
        assert!(close(delta.future_oriented, 0.04));
        assert_eq!(acc.dominant_orientation(), ZimbardoDimension::FutureOriented);
    }

    #[test]
    fn test_hedge_scales_contribution() {
        let mut acc = ZimbardoAccumulator::default();
        let delta = acc.add_contribution(TenseClass::HedgedFuture, 0.5, "");
        assert!(close(delta.future_oriented, 0.01));
    }

    #[test]
    fn test_negative_past_shifts_to_past_negative() {
        let mut acc = ZimbardoAccumulator::default();
        let delta = acc.add_contribution(TenseClass::HistoricalPast, 1.0, "I was sad back then");
        assert!(close(delta.past_negative, 0.005));
        assert!(close(delta.past_positive, 0.03));
    }

    #[test]
    fn test_sentiment_ignored_outside_past_classes() {
        let mut acc = ZimbardoAccumulator::default();
        let delta = acc.add_contribution(TenseClass::CounterfactualPast, 1.0, "I was sad");
        assert!(close(delta.past_negative, 0.05));
    }

    #[test]
    fn test_accumulate_and_reset() {
        let mut acc = ZimbardoAccumulator::default();
        let profile = acc.accumulate(vec![
            (TenseClass::DeclaredFuture, 1.0, "I will launch"),
            (TenseClass::HabitualPresent, 1.0, "I always exercise"),
            (TenseClass::CounterfactualPast, 1.0, "I should have gone"),
        ]);
        assert!(close(profile.future_oriented, 0.05));
        assert!(close(profile.past_negative, 0.05));
        assert!(close(acc.normalize().sum(), 1.0));
        acc.reset();
        assert_eq!(acc.profile(), ZimbardoVector::zero());
        assert_eq!(acc.normalize(), ZimbardoVector::zero());
    }

    #[test]
    fn test_profile_is_capped() {
        let mut acc = ZimbardoAccumulator::default();
        for _ in 0..100 {
            acc.add_contribution(TenseClass::PresentFatalistic, 1.0, "");
        }
        assert_eq!(acc.profile().present_fatalistic, 1.0);
        assert!(acc.profile().past_negative <= 1.0);
    }
}
