use thiserror::Error;

/// Failures that are allowed to reach a caller.
///
/// Extraction-level problems (a feature set failing internally, missing AI
/// analysis) are deliberately absent: those are contained at the set boundary,
/// logged, and replaced with documented defaults so extraction always returns
/// a complete vector. Per-trial predictor failures only surface as
/// `NoCompletedTrials` when every trial of a scenario failed.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("predictor call failed: {0}")]
    Predictor(String),

    #[error("no trials completed for scenario '{scenario}'")]
    NoCompletedTrials { scenario: String },
}

impl SimError {
    pub fn validation(message: impl Into<String>) -> Self {
        SimError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SimError::Configuration(message.into())
    }
}
