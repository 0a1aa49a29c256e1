use thiserror::Error;

use flowkeep_model::JobType;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The provider does not know the requested job flow id.
    #[error("job flow not found: {0}")]
    NotFound(String),

    /// An active managed job flow of this type already exists.
    #[error("an active managed {0} job flow already exists")]
    DuplicateJob(JobType),

    #[error("invalid job type: {0}")]
    InvalidType(String),

    #[error("invalid epoch: {0}")]
    InvalidEpoch(String),

    /// Any other provider failure, carried as-is.
    #[error(transparent)]
    Transport(#[from] ProviderError),
}

pub type CoreResult<T> = Result<T, CoreError>;
