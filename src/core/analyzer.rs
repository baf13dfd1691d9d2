//! Analyzer: message → per-sentence analyses, Zimbardo delta, events
//!
//! Per sentence: annotate, extract features, hedge-score, classify, then
//! derive the self-reference check, flags and graph hint. Annotation failures
//! degrade the sentence instead of failing the message.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::TasConfig;
use crate::core::annotator::{Annotator, RuleAnnotator};
use crate::core::feature_extractor::FeatureExtractor;
use crate::core::hedge_scorer::HedgeScorer;
use crate::core::migration::{detect_contrast_markers, parse_history, MigrationDetector};
use crate::core::segmenter::{RuleSegmenter, Segmenter};
use crate::core::tense_scorer::TenseClassifier;
use crate::core::zimbardo::ZimbardoAccumulator;
use crate::error::{TasError, TasResult};
use crate::types::{
    Annotation, AnalysisOutput, ClassificationResult, FeatureRecord, GraphOperation,
    HedgeResult, SentenceAnalysis, SentenceFlag, TenseClass, ZimbardoVector,
};
use crate::LOW_CONFIDENCE_THRESHOLD;

/// Words that make a sentence about the speaker
const SELF_REFERENCE: &[&str] = &["i", "we", "me", "us", "my", "our", "mine", "ours"];

/// Everything one sentence produced before assembly
#[derive(Debug, Clone)]
pub struct SentenceRun {
    pub annotation: Option<Annotation>,
    pub hedge: HedgeResult,
    pub classification: ClassificationResult,
    pub degraded: bool,
}

/// Tense-as-Signal analyzer
pub struct Analyzer {
    config: TasConfig,
    annotator: Arc<dyn Annotator>,
    segmenter: Box<dyn Segmenter>,
    extractor: FeatureExtractor,
    classifier: TenseClassifier,
    hedge: HedgeScorer,
    migration: MigrationDetector,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("annotator", &self.annotator.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Analyzer {
    /// Analyzer with the built-in rule annotator
    pub fn new(config: TasConfig) -> TasResult<Self> {
        Self::with_annotator(config, Arc::new(RuleAnnotator::new()))
    }

    /// Analyzer over a caller-supplied annotation provider
    pub fn with_annotator(config: TasConfig, annotator: Arc<dyn Annotator>) -> TasResult<Self> {
        config.validate()?;
        annotator.check().map_err(|err| match err {
            TasError::AnnotationUnavailable { .. } => err,
            other => TasError::AnnotationUnavailable {
                reason: format!("{}: {}", annotator.name(), other),
            },
        })?;
        info!(
            annotator = annotator.name(),
            consolidate_certainty = config.analyzer.consolidate_certainty,
            "analyzer ready"
        );
        Ok(Self {
            segmenter: Box::new(RuleSegmenter::new(config.analyzer.split_contrast_clauses)),
            extractor: FeatureExtractor::new(),
            classifier: TenseClassifier::new(),
            hedge: HedgeScorer::new(config.hedge.clone()),
            migration: MigrationDetector::new(&config.migration),
            annotator,
            config,
        })
    }

    /// Replace the sentence segmenter
    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn config(&self) -> &TasConfig {
        &self.config
    }

    pub fn classifier(&self) -> &TenseClassifier {
        &self.classifier
    }

    pub fn migration_detector(&self) -> &MigrationDetector {
        &self.migration
    }

    /// Hedge-score one sentence
    pub fn score_hedges(&self, sentence: &str) -> TasResult<HedgeResult> {
        let annotation = self.annotate(sentence)?;
        Ok(self.hedge.score(sentence, &annotation))
    }

    /// Annotate and reject trees whose heads point outside the sentence
    fn annotate(&self, text: &str) -> TasResult<Annotation> {
        let annotation = self.annotator.annotate(text)?;
        if let Some((token, head)) = annotation.dangling_head() {
            return Err(TasError::Annotation {
                sentence: text.to_string(),
                message: format!(
                    "token {} has head {} but the sentence has {} tokens",
                    token,
                    head,
                    annotation.len()
                ),
            });
        }
        Ok(annotation)
    }

    /// Run the per-sentence pipeline, degrading on annotation failure
    pub fn run_sentence(&self, text: &str) -> SentenceRun {
        let extracted = self
            .annotate(text)
            .and_then(|a| self.extractor.extract(text, &a).map(|f| (a, f)));

        match extracted {
            Ok((annotation, mut features)) => {
                let hedge = self.hedge.score(text, &annotation);
                if self.config.analyzer.consolidate_certainty {
                    features.certainty = hedge.score;
                }
                let classification = self.classifier.classify(&features);
                SentenceRun {
                    annotation: Some(annotation),
                    hedge,
                    classification,
                    degraded: false,
                }
            }
            Err(err) => {
                if err.is_sentence_local() {
                    warn!(code = err.code(), error = %err, sentence = text, "annotation degraded");
                } else {
                    error!(code = err.code(), error = %err, sentence = text, "annotator failed, sentence degraded");
                }
                let hedge = self.hedge.score(text, &Annotation::default());
                let classification = self.classifier.classify(&FeatureRecord::degraded(text));
                SentenceRun {
                    annotation: None,
                    hedge,
                    classification,
                    degraded: true,
                }
            }
        }
    }

    /// Analyze one message against caller-supplied topic histories
    pub fn analyze(
        &self,
        message: &str,
        history: &BTreeMap<String, Vec<String>>,
    ) -> TasResult<AnalysisOutput> {
        let start = Instant::now();

        if message.trim().is_empty() {
            debug!("empty message");
            return Ok(AnalysisOutput::empty(message));
        }

        let mut accumulator = ZimbardoAccumulator::new(self.config.zimbardo.clone());
        let mut sentences = Vec::new();

        for text in self.segmenter.segment(message) {
            let run = self.run_sentence(&text);
            let self_referential = is_self_referential(&text, run.annotation.as_ref());
            let class = run.classification.tense_class;

            let zimbardo_contribution = if self_referential && !run.degraded {
                Some(accumulator.add_contribution(class, run.hedge.score, &text))
            } else {
                None
            };

            let analysis = assemble(text, run, self_referential, zimbardo_contribution);
            debug!(
                sentence = %analysis.text,
                class = %analysis.tense_class,
                confidence = analysis.confidence,
                hedge = analysis.hedge_score,
                self_referential,
                "sentence analyzed"
            );
            sentences.push(analysis);

            self.check_budget(start)?;
        }

        let contrast_markers = detect_contrast_markers(message);
        let events = self.history_events(history, &contrast_markers);

        let output = AnalysisOutput {
            original_text: message.to_string(),
            empty: sentences.is_empty(),
            sentences,
            sentence_level_events: events,
            contrast_markers_detected: contrast_markers,
            session_zimbardo_delta: accumulator.profile(),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            analyzed_at: chrono::Utc::now(),
        };

        info!(
            sentences = output.sentences.len(),
            events = output.sentence_level_events.len(),
            dominant = %output.session_zimbardo_delta.dominant(),
            elapsed_ms = output.processing_time_ms,
            "message analyzed"
        );
        Ok(output)
    }

    fn check_budget(&self, start: Instant) -> TasResult<()> {
        let Some(budget_ms) = self.config.analyzer.message_timeout_ms else {
            return Ok(());
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;
        if elapsed_ms > budget_ms {
            warn!(elapsed_ms, budget_ms, "message analysis over budget");
            return Err(TasError::Timeout {
                elapsed_ms,
                budget_ms,
            });
        }
        Ok(())
    }

    /// Migration, trend and contrast events, topics in sorted order
    pub fn history_events(
        &self,
        history: &BTreeMap<String, Vec<String>>,
        contrast_markers: &[String],
    ) -> Vec<String> {
        let mut events = Vec::new();
        let contrast_present = !contrast_markers.is_empty();
        let window = self.migration.trend_window();

        for (topic, labels) in history {
            let Some(classes) = parse_history(labels) else {
                debug!(topic = %topic, "history has unknown labels, skipped");
                continue;
            };
            if let Some(event) = self.migration.detect_migration(&classes, contrast_present) {
                let from = classes[classes.len() - 2];
                let to = classes[classes.len() - 1];
                events.push(format!(
                    "TENSE_MIGRATION: {}→{} {} on topic:{}",
                    from,
                    to,
                    event.code(),
                    topic
                ));
            }
            if let Some(event) = self.migration.detect_trending_shift(&classes, window) {
                events.push(format!(
                    "TREND_SHIFT: {} over {} entries on topic:{}",
                    event.code(),
                    window,
                    topic
                ));
            }
        }

        if !history.is_empty() && contrast_present {
            events.push(format!("CONTRAST_DETECTED: {}", contrast_markers.join(", ")));
        }
        events
    }
}

/// Speaker reference by token text or lemma; whitespace words when unannotated
fn is_self_referential(text: &str, annotation: Option<&Annotation>) -> bool {
    let is_self = |w: &str| {
        let w = w
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        SELF_REFERENCE.contains(&w.as_str())
    };
    match annotation {
        Some(a) => a
            .tokens
            .iter()
            .any(|t| is_self(&t.text) || SELF_REFERENCE.contains(&t.lemma.as_str())),
        None => text.split_whitespace().any(is_self),
    }
}

fn assemble(
    text: String,
    run: SentenceRun,
    self_referential: bool,
    zimbardo_contribution: Option<ZimbardoVector>,
) -> SentenceAnalysis {
    let SentenceRun {
        hedge,
        classification,
        degraded,
        ..
    } = run;
    let class = classification.tense_class;
    let confidence = if degraded { 0.0 } else { classification.confidence };

    let mut flags = Vec::new();
    if !self_referential {
        flags.push(SentenceFlag::NonSelfReferential);
    }
    if hedge.is_heavily_hedged {
        flags.push(SentenceFlag::HeavilyHedged);
    }
    if class == TenseClass::PresentFatalistic {
        flags.push(SentenceFlag::FatalismMarker);
    }
    if class == TenseClass::CounterfactualPast {
        flags.push(SentenceFlag::RegretMarker);
    }
    if confidence < LOW_CONFIDENCE_THRESHOLD {
        flags.push(SentenceFlag::LowConfidence);
    }
    if degraded {
        flags.push(SentenceFlag::AnnotationDegraded);
    }

    let features = classification.features;
    SentenceAnalysis {
        text,
        root_verb: features.root_lemma,
        grammatical_tense: features.morph_tense,
        tense_class: class,
        tense_class_name: class.display_name().to_string(),
        temporal_orientation: class.orientation(),
        self_referential,
        hedge_score: hedge.score,
        hedge_words: hedge.hedges,
        confidence,
        zimbardo_contribution,
        graph_operation: if degraded {
            GraphOperation::NoOperation
        } else {
            class.graph_operation()
        },
        weight_modifier: hedge.score,
        flags,
        alternatives: classification.top_3,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;
    use pretty_assertions::assert_eq;

    struct FailingAnnotator;

    impl Annotator for FailingAnnotator {
        fn annotate(&self, sentence: &str) -> TasResult<Annotation> {
            Err(TasError::Annotation {
                sentence: sentence.to_string(),
                message: "parser offline".to_string(),
            })
        }
    }

    /// Points the head of every modal past the end of the sentence
    struct DanglingModalHead;

    impl Annotator for DanglingModalHead {
        fn annotate(&self, sentence: &str) -> TasResult<Annotation> {
            let mut annotation = RuleAnnotator::new().annotate(sentence)?;
            for token in annotation.tokens.iter_mut().filter(|t| t.lemma == "might") {
                token.pos = Pos::VERB;
                token.dep = "aux".to_string();
                token.head = 99;
            }
            Ok(annotation)
        }
    }

    struct OfflineAnnotator;

    impl Annotator for OfflineAnnotator {
        fn annotate(&self, sentence: &str) -> TasResult<Annotation> {
            RuleAnnotator::new().annotate(sentence)
        }

        fn name(&self) -> &str {
            "offline"
        }

        fn check(&self) -> TasResult<()> {
            Err(TasError::Annotation {
                sentence: String::new(),
                message: "model not loaded".to_string(),
            })
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(TasConfig::default()).unwrap()
    }

    #[test]
    fn test_self_reference() {
        assert!(is_self_referential("Me, again.", None));
        assert!(is_self_referential("This is ours!", None));
        assert!(!is_self_referential("It rains", None));
    }

    #[test]
    fn test_empty_message() {
        let out = analyzer().analyze("   ", &BTreeMap::new()).unwrap();
        assert!(out.empty);
        assert!(out.sentences.is_empty());
    }

    #[test]
    fn test_degraded_sentence() {
        let analyzer =
            Analyzer::with_annotator(TasConfig::default(), Arc::new(FailingAnnotator)).unwrap();
        let out = analyzer.analyze("I run daily.", &BTreeMap::new()).unwrap();
        let s = &out.sentences[0];
        assert_eq!(s.confidence, 0.0);
        assert_eq!(s.graph_operation, GraphOperation::NoOperation);
        assert!(s.has_flag(SentenceFlag::AnnotationDegraded));
        assert!(s.has_flag(SentenceFlag::LowConfidence));
        assert!(s.self_referential);
        assert!(s.zimbardo_contribution.is_none());
        assert_eq!(out.session_zimbardo_delta, ZimbardoVector::zero());
    }

    #[test]
    fn test_dangling_head_degrades_only_its_sentence() {
        let analyzer =
            Analyzer::with_annotator(TasConfig::default(), Arc::new(DanglingModalHead)).unwrap();
        let out = analyzer.analyze("I run. I might go.", &BTreeMap::new()).unwrap();
        assert_eq!(out.sentences.len(), 2);

        let healthy = &out.sentences[0];
        assert!(!healthy.has_flag(SentenceFlag::AnnotationDegraded));
        assert!(healthy.zimbardo_contribution.is_some());

        let broken = &out.sentences[1];
        assert!(broken.has_flag(SentenceFlag::AnnotationDegraded));
        assert!(broken.has_flag(SentenceFlag::LowConfidence));
        assert_eq!(broken.confidence, 0.0);

        let err = analyzer.score_hedges("I might go").unwrap_err();
        assert_eq!(err.code(), "TAS_ANNOTATION_FAILED");
    }

    #[test]
    fn test_unready_annotator_is_unavailable() {
        let err = Analyzer::with_annotator(TasConfig::default(), Arc::new(OfflineAnnotator))
            .unwrap_err();
        assert_eq!(err.code(), "TAS_ANNOTATION_UNAVAILABLE");
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_non_self_referential_has_no_contribution() {
        let out = analyzer().analyze("Nothing ever changes", &BTreeMap::new()).unwrap();
        let s = &out.sentences[0];
        assert!(!s.self_referential);
        assert!(s.zimbardo_contribution.is_none());
        assert!(s.has_flag(SentenceFlag::NonSelfReferential));
        assert_eq!(out.session_zimbardo_delta, ZimbardoVector::zero());
    }

    #[test]
    fn test_history_events_sorted_and_skip_unknown() {
        let mut history = BTreeMap::new();
        history.insert("zeta".to_string(), vec!["T7".to_string(), "T8".to_string()]);
        history.insert("alpha".to_string(), vec!["T1".to_string(), "T4".to_string()]);
        history.insert("broken".to_string(), vec!["T1".to_string(), "T99".to_string()]);
        let events = analyzer().history_events(&history, &["but".to_string()]);
        assert_eq!(
            events,
            vec![
                "TENSE_MIGRATION: T1→T4 DEPRIORITIZATION on topic:alpha".to_string(),
                "TENSE_MIGRATION: T7→T8 COMMITMENT_DECAY on topic:zeta".to_string(),
                "CONTRAST_DETECTED: but".to_string(),
            ]
        );
    }

    #[test]
    fn test_zero_budget_rejected_by_config() {
        let mut config = TasConfig::default();
        config.analyzer.message_timeout_ms = Some(0);
        assert_eq!(Analyzer::new(config).unwrap_err().code(), "TAS_INVALID_CONFIG");
    }
}
