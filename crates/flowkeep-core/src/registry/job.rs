use time::OffsetDateTime;

use flowkeep_model::{JobFlowRecord, JobState, JobType, NAME_KEY_TYPE, NAME_SUFFIX_SEPARATOR, StepDetail};

use crate::{error::CoreResult, registry::JobRegistry};

/// Snapshot of one job flow.
///
/// Wraps the provider's description; every accessor reads from it. The snapshot never
/// changes on its own: call [`Job::refresh`] to pull the latest description.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    record: JobFlowRecord,
}

impl Job {
    pub fn new(record: JobFlowRecord) -> Self {
        Self { record }
    }

    /// Provider-assigned id.
    pub fn id(&self) -> &str {
        &self.record.job_flow_id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Raw provider description.
    pub fn record(&self) -> &JobFlowRecord {
        &self.record
    }

    pub fn into_record(self) -> JobFlowRecord {
        self.record
    }

    pub fn state(&self) -> &JobState {
        self.record.state()
    }

    /// The cluster accepts work (`RUNNING` or `WAITING`).
    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// The cluster is still coming up (`STARTING` or `BOOTSTRAPPING`).
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.record.execution_status_detail.creation_date_time
    }

    pub fn steps(&self) -> &[StepDetail] {
        &self.record.steps
    }

    /// Address of the lead node; `None` until the provider allocates it.
    pub fn public_dns(&self) -> Option<&str> {
        self.record.instances.master_public_dns_name.as_deref()
    }

    pub fn is_termination_protected(&self) -> bool {
        self.record.instances.termination_protected
    }

    /// Type recovered from the `type => X` part of the name.
    ///
    /// `None` when the name carries no type or an unsupported one.
    pub fn job_type(&self) -> Option<JobType> {
        type_from_name(&self.record.name)
    }

    /// Re-describe this job flow and replace the snapshot. The id never changes.
    pub async fn refresh(&mut self, registry: &JobRegistry) -> CoreResult<&mut Self> {
        let latest = registry.get(self.id()).await?;
        self.record = latest.record;
        Ok(self)
    }

    /// Request termination of this job flow.
    pub async fn kill(&self, registry: &JobRegistry) -> CoreResult<bool> {
        registry.kill([self.id()]).await
    }
}

impl From<JobFlowRecord> for Job {
    fn from(record: JobFlowRecord) -> Self {
        Self::new(record)
    }
}

fn type_from_name(name: &str) -> Option<JobType> {
    let marker = format!("{NAME_KEY_TYPE}{NAME_SUFFIX_SEPARATOR}");
    let (_, rest) = name.split_once(marker.as_str())?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let label = &rest[..end];
    JobType::ALL.into_iter().find(|t| t.as_str() == label)
}
