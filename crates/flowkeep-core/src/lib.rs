pub mod config;
pub mod error;
pub mod provider;
pub mod registry;

pub mod prelude {
    pub use crate::config::{Configuration, Credentials, Epoch};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::provider::{InMemoryJobFlows, JobFlowApi, ProviderError, ProviderErrorKind};
    pub use crate::registry::{Job, JobRegistry};
}
