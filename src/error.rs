//! Error types for the analyzer

/// Convenience alias used across the crate
pub type TasResult<T> = Result<T, TasError>;

/// Everything that can go wrong inside TAS.
///
/// Only `AnnotationUnavailable`, `Timeout` and the config variants ever reach
/// a caller of `Analyzer::analyze`. Per-sentence annotation failures are
/// absorbed into degraded sentences, unknown history labels into "no migration".
#[derive(Debug, thiserror::Error)]
pub enum TasError {
    #[error("Annotation provider unavailable: {reason}")]
    AnnotationUnavailable { reason: String },

    #[error("Annotation failed for sentence {sentence:?}: {message}")]
    Annotation { sentence: String, message: String },

    #[error("Annotation returned no tokens for sentence {sentence:?}")]
    EmptyAnnotation { sentence: String },

    #[error("Unknown tense class label: {label:?}")]
    UnknownTenseLabel { label: String },

    #[error("Message analysis exceeded {budget_ms}ms budget after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64, budget_ms: u64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl TasError {
    /// Stable code for logs and API payloads
    pub fn code(&self) -> &'static str {
        match self {
            Self::AnnotationUnavailable { .. } => "TAS_ANNOTATION_UNAVAILABLE",
            Self::Annotation { .. } => "TAS_ANNOTATION_FAILED",
            Self::EmptyAnnotation { .. } => "TAS_EMPTY_ANNOTATION",
            Self::UnknownTenseLabel { .. } => "TAS_UNKNOWN_TENSE_LABEL",
            Self::Timeout { .. } => "TAS_TIMEOUT",
            Self::InvalidConfig { .. } => "TAS_INVALID_CONFIG",
            Self::ConfigIo(_) => "TAS_CONFIG_IO",
            Self::ConfigParse(_) => "TAS_CONFIG_PARSE",
        }
    }

    /// Errors that a sentence can recover from by degrading
    pub fn is_sentence_local(&self) -> bool {
        matches!(self, Self::Annotation { .. } | Self::EmptyAnnotation { .. })
    }
}
