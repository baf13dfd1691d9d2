//! Core modules for TAS

pub mod lexicon;
pub mod annotator;
pub mod segmenter;
pub mod feature_extractor;
pub mod tense_scorer;
pub mod hedge_scorer;
pub mod zimbardo;
pub mod migration;
pub mod analyzer;
pub mod api;

pub use annotator::{Annotator, RuleAnnotator};
pub use segmenter::{RuleSegmenter, Segmenter};
pub use feature_extractor::FeatureExtractor;
pub use tense_scorer::{ScoringRule, TenseClassifier};
pub use hedge_scorer::HedgeScorer;
pub use zimbardo::{sentiment_modifier, ZimbardoAccumulator};
pub use migration::{detect_contrast_markers, parse_history, MigrationDetector};
pub use analyzer::{Analyzer, SentenceRun};
pub use api::{create_router, run_server};
