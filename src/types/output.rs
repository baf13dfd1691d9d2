//! Output structures: per-sentence analysis and the message envelope

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{
    GraphOperation, ScoredClass, SentenceFlag, TemporalOrientation, TenseClass, ZimbardoVector,
};

/// Analysis of one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    /// Original sentence text
    pub text: String,
    /// Root verb lemma
    pub root_verb: Option<String>,
    /// Surface grammatical tense ("Pres", "Past", "Unknown")
    pub grammatical_tense: String,
    pub tense_class: TenseClass,
    pub tense_class_name: String,
    pub temporal_orientation: TemporalOrientation,
    /// Is the sentence about "I/we"?
    pub self_referential: bool,
    /// 1.0 = certain, 0.01 = maximally hedged
    pub hedge_score: f64,
    pub hedge_words: Vec<String>,
    pub confidence: f64,
    /// Present only for self-referential, non-degraded sentences
    pub zimbardo_contribution: Option<ZimbardoVector>,
    pub graph_operation: GraphOperation,
    /// Weight for the graph operation (= hedge score)
    pub weight_modifier: f64,
    pub flags: Vec<SentenceFlag>,
    /// Three best classes
    pub alternatives: Vec<ScoredClass>,
}

impl SentenceAnalysis {
    pub fn has_flag(&self, flag: SentenceFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let class = format!("{} {}", self.tense_class.code(), self.tense_class_name);
        let class = match self.graph_operation {
            GraphOperation::Flag | GraphOperation::Trigger => class.red().bold(),
            GraphOperation::Decrement => class.yellow().bold(),
            GraphOperation::NoOperation => class.dimmed(),
            _ => class.green().bold(),
        };
        let mut line = format!(
            "{} | conf={:.2} | hedge={:.2} | {} | {}",
            class,
            self.confidence,
            self.hedge_score,
            self.temporal_orientation,
            self.graph_operation.code().cyan()
        );
        if !self.hedge_words.is_empty() {
            line.push_str(&format!(" | hedges=[{}]", self.hedge_words.join(", ")));
        }
        if !self.flags.is_empty() {
            let flags: Vec<&str> = self.flags.iter().map(|f| f.code()).collect();
            line.push_str(&format!(" | {}", flags.join(",").magenta()));
        }
        line
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let flags: Vec<&str> = self.flags.iter().map(|f| f.code()).collect();
        format!(
            "class={} | conf={:.3} | hedge={:.4} | orientation={} | op={} | self_ref={} | flags={}",
            self.tense_class.code(),
            self.confidence,
            self.hedge_score,
            self.temporal_orientation,
            self.graph_operation.code(),
            self.self_referential,
            flags.join(",")
        )
    }
}

/// Full analysis of one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub original_text: String,
    pub sentences: Vec<SentenceAnalysis>,
    /// Migration, trend and contrast events
    pub sentence_level_events: Vec<String>,
    pub contrast_markers_detected: Vec<String>,
    /// Capped running Zimbardo vector of this message
    pub session_zimbardo_delta: ZimbardoVector,
    pub processing_time_ms: f64,
    /// No sentences: input was empty or whitespace
    pub empty: bool,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisOutput {
    /// Envelope for empty input
    pub fn empty(original_text: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            sentences: Vec::new(),
            sentence_level_events: Vec::new(),
            contrast_markers_detected: Vec::new(),
            session_zimbardo_delta: ZimbardoVector::zero(),
            processing_time_ms: 0.0,
            empty: true,
            analyzed_at: Utc::now(),
        }
    }

    /// SHA-256 hex over the analysis content.
    /// Latency and timestamp are excluded so equal inputs share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.original_text.as_bytes());
        hasher.update([0u8]);
        for sentence in &self.sentences {
            hasher.update(serde_json::to_vec(sentence).unwrap_or_default());
            hasher.update([0u8]);
        }
        for event in &self.sentence_level_events {
            hasher.update(event.as_bytes());
            hasher.update([0u8]);
        }
        for marker in &self.contrast_markers_detected {
            hasher.update(marker.as_bytes());
            hasher.update([0u8]);
        }
        for value in self.session_zimbardo_delta.values() {
            hasher.update(value.to_le_bytes());
        }
        hasher.update([self.empty as u8]);
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        if self.empty {
            return format!("{}", "(empty message)".dimmed());
        }
        let mut out = String::new();
        for (i, s) in self.sentences.iter().enumerate() {
            out.push_str(&format!("{} {}\n", format!("[{}]", i + 1).bold(), s.text));
            out.push_str(&format!("    {}\n", s.to_terminal_string()));
        }
        if !self.contrast_markers_detected.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "contrast:".bold(),
                self.contrast_markers_detected.join(", ")
            ));
        }
        for event in &self.sentence_level_events {
            out.push_str(&format!("{} {}\n", "event:".bold().yellow(), event));
        }
        let z = &self.session_zimbardo_delta;
        out.push_str(&format!(
            "{} pn={:.3} pp={:.3} ph={:.3} pf={:.3} fo={:.3} | {:.1}ms",
            "zimbardo:".bold(),
            z.past_negative,
            z.past_positive,
            z.present_hedonistic,
            z.present_fatalistic,
            z.future_oriented,
            self.processing_time_ms
        ));
        out
    }

    /// Format for parseable output (no colors), one line per sentence
    pub fn to_parseable_string(&self) -> String {
        let mut lines: Vec<String> = self
            .sentences
            .iter()
            .map(SentenceAnalysis::to_parseable_string)
            .collect();
        for event in &self.sentence_level_events {
            lines.push(format!("event={}", event));
        }
        lines.push(format!(
            "sentences={} | markers={} | dominant={} | fingerprint={}",
            self.sentences.len(),
            self.contrast_markers_detected.join(","),
            self.session_zimbardo_delta.dominant(),
            self.fingerprint()
        ));
        lines.join("\n")
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_ignores_latency_and_timestamp() {
        let a = AnalysisOutput::empty("");
        let mut b = a.clone();
        b.processing_time_ms = 42.0;
        b.analyzed_at = Utc::now() + chrono::Duration::seconds(5);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = AnalysisOutput::empty("hello");
        let b = AnalysisOutput::empty("hello!");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_empty_serializes_flag() {
        let json = serde_json::to_value(AnalysisOutput::empty("  ")).unwrap();
        assert_eq!(json["empty"], true);
        assert_eq!(json["sentences"].as_array().map(|a| a.len()), Some(0));
    }
}
