//! Core types for TAS

mod annotation;
mod classification;
mod features;
mod flag;
mod hedge;
mod migration;
mod output;
mod tense;
mod zimbardo;

pub use annotation::{Annotation, Pos, Token};
pub use classification::{ClassificationResult, ScoredClass};
pub use features::{FeatureRecord, UNKNOWN_TENSE};
pub use flag::SentenceFlag;
pub use hedge::HedgeResult;
pub use migration::MigrationEvent;
pub use output::{AnalysisOutput, SentenceAnalysis};
pub use tense::{GraphOperation, TemporalOrientation, TenseClass};
pub use zimbardo::{ZimbardoDimension, ZimbardoVector};
