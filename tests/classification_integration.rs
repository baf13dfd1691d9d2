//! Integration tests for tense classification
//!
//! Tests the path: sentence → annotator → features → hedge → classifier

use pretty_assertions::assert_eq;
use tas::core::{Analyzer, TenseClassifier};
use tas::types::{FeatureRecord, TenseClass};
use tas::TasConfig;

fn classify(sentence: &str) -> tas::types::ClassificationResult {
    Analyzer::new(TasConfig::default())
        .unwrap()
        .run_sentence(sentence)
        .classification
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_historical_past() {
    let result = classify("I used to run every day");
    assert_eq!(result.tense_class, TenseClass::HistoricalPast);
    assert!(close(result.confidence, 1.0));
    assert!(close(result.score_of(TenseClass::ActivePresent), 0.504));
    assert!(close(result.score_of(TenseClass::HabitualPresent), 0.5));
}

#[test]
fn test_declared_future() {
    let result = classify("I will definitely attend the meeting");
    assert_eq!(result.tense_class, TenseClass::DeclaredFuture);
    assert!(close(result.confidence, 1.0));
}

#[test]
fn test_hedged_future_beats_declared() {
    let result = classify("lately I've been thinking maybe I'll get back into it.");
    assert_eq!(result.tense_class, TenseClass::HedgedFuture);
    let top: Vec<TenseClass> = result.top_3.iter().map(|s| s.class).collect();
    assert_eq!(
        top,
        vec![TenseClass::HedgedFuture, TenseClass::DeclaredFuture, TenseClass::HistoricalPast]
    );
}

#[test]
fn test_present_fatalistic() {
    let result = classify("Nothing ever changes");
    assert_eq!(result.tense_class, TenseClass::PresentFatalistic);
    assert!(close(result.confidence, 1.0));
}

#[test]
fn test_copular_belief_is_stable_belief() {
    let result = classify("I think pizza is good");
    assert_eq!(result.tense_class, TenseClass::StableBeliefPresent);
}

#[test]
fn test_counterfactual_ties_resolve_to_historical_past() {
    let result = classify("I should have left earlier");
    assert!(close(result.score_of(TenseClass::HistoricalPast), 1.0));
    assert!(close(result.score_of(TenseClass::CounterfactualPast), 1.0));
    // T4 is declared before T10
    assert_eq!(result.tense_class, TenseClass::HistoricalPast);
}

#[test]
fn test_default_record() {
    let result = TenseClassifier::new().classify(&FeatureRecord::default());
    assert_eq!(result.tense_class, TenseClass::DeclaredFuture);
    assert!(close(result.confidence, 0.444));
}

#[test]
fn test_classification_is_deterministic() {
    let a = classify("If I could, I would travel the world");
    let b = classify("If I could, I would travel the world");
    assert_eq!(a, b);
}
