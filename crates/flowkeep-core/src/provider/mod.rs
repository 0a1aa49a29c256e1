//! Narrow view of the cloud job flow API.
//!
//! Only four calls are needed to manage job flows: describe, run, add steps and
//! terminate. Concrete SDK bindings implement [`JobFlowApi`]; [`InMemoryJobFlows`]
//! is an in-process implementation for tests and dry runs.
mod error;
pub use error::{JOB_FLOW_NOT_FOUND_SIGNAL, ProviderError, ProviderErrorKind, ProviderResult};

mod memory;
pub use memory::InMemoryJobFlows;

use async_trait::async_trait;
use flowkeep_model::{DescribeJobFlows, JobFlowConfig, JobFlowRecord, StepConfig};

/// Job flow operations of the cloud provider.
///
/// Implementations perform the network round-trip and nothing else: no retries, no
/// caching. Errors are reported as [`ProviderError`]; an unknown job flow id must be
/// reported so that [`ProviderError::is_not_found`] returns `true`.
#[async_trait]
pub trait JobFlowApi: Send + Sync {
    /// Describe job flows matching the query.
    async fn describe_job_flows(&self, query: &DescribeJobFlows) -> ProviderResult<Vec<JobFlowRecord>>;

    /// Create a job flow and return its provider-assigned id.
    async fn run_job_flow(&self, name: &str, config: &JobFlowConfig) -> ProviderResult<String>;

    /// Append steps to an existing job flow.
    async fn add_job_flow_steps(&self, job_flow_id: &str, steps: &[StepConfig]) -> ProviderResult<()>;

    /// Request termination; returns whether the provider acknowledged the request.
    async fn terminate_job_flows(&self, job_flow_ids: &[String]) -> ProviderResult<bool>;
}
