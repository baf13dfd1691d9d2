//! Integration tests for hedge scoring
//!
//! Tests the path: sentence → annotator → hedge scorer

use pretty_assertions::assert_eq;
use tas::core::Analyzer;
use tas::types::HedgeResult;
use tas::{TasConfig, HEAVILY_HEDGED_THRESHOLD};

fn score(sentence: &str) -> HedgeResult {
    Analyzer::new(TasConfig::default())
        .unwrap()
        .score_hedges(sentence)
        .unwrap()
}

#[test]
fn test_hedges_stack_multiplicatively() {
    let r = score("I might kind of want to try it");
    assert_eq!(r.score, 0.125);
    assert_eq!(r.hedges, vec!["might", "kind of"]);
    assert!(r.is_heavily_hedged);
}

#[test]
fn test_booster_only_sentence_is_certain() {
    let r = score("I will definitely launch next month");
    assert_eq!(r.score, 1.0);
    assert_eq!(r.boosters, vec!["definitely", "will definitely"]);
    assert!(!r.is_heavily_hedged);
}

#[test]
fn test_epistemic_disambiguation() {
    assert_eq!(score("I think pizza is good").score, 1.0);
    assert_eq!(score("I think about life").score, 1.0);
    let clausal = score("I think I should go");
    assert_eq!(clausal.score, 0.4);
    assert!(clausal.hedges.contains(&"i think".to_string()));
}

#[test]
fn test_scores_in_bounds() {
    for s in [
        "",
        "I run",
        "maybe perhaps possibly someday",
        "I absolutely might maybe go",
        "I guess I suppose who knows",
    ] {
        let r = score(s);
        assert!((0.01..=1.0).contains(&r.score), "{s}: {}", r.score);
        assert_eq!(r.is_heavily_hedged, r.score < HEAVILY_HEDGED_THRESHOLD);
    }
}

#[test]
fn test_custom_threshold() {
    let mut config = TasConfig::default();
    config.hedge.heavily_hedged_threshold = 0.5;
    let analyzer = Analyzer::new(config).unwrap();
    let r = analyzer.score_hedges("I think I should go").unwrap();
    assert!(r.is_heavily_hedged);
}
