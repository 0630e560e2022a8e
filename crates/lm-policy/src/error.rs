use lm_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("feature vector has {got} entries, model expects {expected}")]
    FeatureLength { expected: usize, got: usize },

    #[error("episode has {records} decisions but {costs} costs")]
    EpisodeLength { records: usize, costs: usize },

    #[error("action {action} outside the action space of {actions}")]
    ActionOutOfRange { action: usize, actions: usize },

    #[error("policy produced no usable distribution: {0}")]
    Degenerate(String),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
