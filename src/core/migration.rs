//! Migration detector: tense shifts across a topic's history
//!
//! Two signals: the last two entries of a history (`detect_migration`) and
//! the dominant class of each half of a recent window
//! (`detect_trending_shift`). Both resolve through a sparse table of
//! ordered (from, to) pairs.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::MigrationConfig;
use crate::types::{MigrationEvent, TenseClass};

/// Markers of an explicit contrast between two states or times, in report order
const CONTRAST_MARKERS: &[&str] = &[
    "but", "however", "though", "yet", "instead", "on the other hand", "conversely",
    "in contrast", "despite", "although", "whereas", "while", "lately", "recently",
    "these days", "now",
];

/// Contrast markers found in `text`, as lowercase substrings
pub fn detect_contrast_markers(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    CONTRAST_MARKERS
        .iter()
        .filter(|m| lower.contains(*m))
        .map(|m| m.to_string())
        .collect()
}

/// Parse a label history; `None` if any label is unknown
pub fn parse_history<S: AsRef<str>>(labels: &[S]) -> Option<Vec<TenseClass>> {
    labels
        .iter()
        .map(|l| l.as_ref().parse::<TenseClass>().ok())
        .collect()
}

/// Most frequent class; the first encountered wins ties.
/// An empty slice defaults to Active Present.
fn dominant(classes: &[TenseClass]) -> TenseClass {
    let mut counts: Vec<(TenseClass, usize)> = Vec::new();
    for class in classes {
        match counts.iter_mut().find(|(c, _)| c == class) {
            Some((_, n)) => *n += 1,
            None => counts.push((*class, 1)),
        }
    }
    let mut best: Option<(TenseClass, usize)> = None;
    for (class, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((class, n));
        }
    }
    best.map(|(c, _)| c).unwrap_or(TenseClass::ActivePresent)
}

/// Migration detector over a configured pair table
#[derive(Debug, Clone)]
pub struct MigrationDetector {
    rules: HashMap<(TenseClass, TenseClass), MigrationEvent>,
    min_history_len: usize,
    trend_window: usize,
}

impl Default for MigrationDetector {
    fn default() -> Self {
        Self::new(&MigrationConfig::default())
    }
}

impl MigrationDetector {
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            rules: config
                .rules
                .iter()
                .map(|r| ((r.from, r.to), r.event))
                .collect(),
            min_history_len: config.min_history_len,
            trend_window: config.trend_window,
        }
    }

    /// Configured trend window
    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Event for an ordered pair, if any
    pub fn lookup(&self, from: TenseClass, to: TenseClass) -> Option<MigrationEvent> {
        self.rules.get(&(from, to)).copied()
    }

    /// Event between the last two entries of `history`.
    ///
    /// `contrast_present` never gates the result; it is only logged.
    pub fn detect_migration(
        &self,
        history: &[TenseClass],
        contrast_present: bool,
    ) -> Option<MigrationEvent> {
        if history.len() < self.min_history_len.max(2) {
            return None;
        }
        let from = history[history.len() - 2];
        let to = history[history.len() - 1];
        let event = self.lookup(from, to)?;
        info!(
            from = %from,
            to = %to,
            event = event.code(),
            contrast_present,
            "tense migration detected"
        );
        Some(event)
    }

    /// Event between the dominant classes of the two halves of the last
    /// `window` entries
    pub fn detect_trending_shift(
        &self,
        history: &[TenseClass],
        window: usize,
    ) -> Option<MigrationEvent> {
        if window < 2 || history.len() < window {
            return None;
        }
        let recent = &history[history.len() - window..];
        let first = dominant(&recent[..window / 2]);
        let second = dominant(&recent[window / 2..]);
        if first == second {
            debug!(dominant = %first, window, "no trending shift");
            return None;
        }
        let event = self.lookup(first, second)?;
        info!(
            from = %first,
            to = %second,
            window,
            event = event.code(),
            "trending shift detected"
        );
        Some(event)
    }

    /// `detect_migration` over string labels; unknown labels yield `None`
    pub fn detect_migration_labels<S: AsRef<str>>(
        &self,
        labels: &[S],
        contrast_present: bool,
    ) -> Option<MigrationEvent> {
        let history = parse_history(labels)?;
        self.detect_migration(&history, contrast_present)
    }

    /// `detect_trending_shift` over string labels; unknown labels yield `None`
    pub fn detect_trending_shift_labels<S: AsRef<str>>(
        &self,
        labels: &[S],
        window: usize,
    ) -> Option<MigrationEvent> {
        let history = parse_history(labels)?;
        self.detect_trending_shift(&history, window)
    }
}

// =============================================================================
// TESTS
// =============================================================================
