use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown job type: {0} (expected: hive|pig|streaming)")]
    UnknownJobType(String),

    #[error("unknown sizing preset: {0} (expected: test|production)")]
    UnknownPreset(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
