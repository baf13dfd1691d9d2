//! TAS: Tense-as-Signal Analyzer
//!
//! Message → sentences → per-sentence tense class, hedge score and
//! Zimbardo contribution → migration events over caller-supplied history.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::TasConfig;
pub use error::{TasError, TasResult};

// =============================================================================
// HEDGE THRESHOLDS
// =============================================================================

/// Below this hedge score a sentence is flagged heavily hedged
pub const HEAVILY_HEDGED_THRESHOLD: f64 = 0.30;

/// Minimum certainty a hedged sentence can retain
pub const HEDGE_SCORE_FLOOR: f64 = 0.01;

/// Discount applied when an uncertain modal governs the main verb
pub const UNCERTAIN_MODAL_DISCOUNT: f64 = 0.50;

/// Share of lost certainty a booster restores
pub const BOOSTER_RESTORATION: f64 = 0.5;

/// Per-cue discount of the coarse local certainty seed
pub const LOCAL_HEDGE_CUE_STEP: f64 = 0.15;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Below this winning score a sentence is flagged low confidence
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

// =============================================================================
// MIGRATION
// =============================================================================

/// Entries needed before a two-point migration can fire
pub const MIN_HISTORY_LEN: usize = 2;

/// Default window for trending-shift detection
pub const TREND_WINDOW: usize = 5;

// =============================================================================
// ZIMBARDO SENTIMENT
// =============================================================================

/// Max swing of the sentiment modifier around 1.0
pub const SENTIMENT_SWING: f64 = 0.5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
