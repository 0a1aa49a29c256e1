//! Registry of managed job flows.
//!
//! The registry lists job flows from the provider, keeps the ones following the
//! naming convention of its [`Configuration`], and enforces at most one active
//! managed job flow per [`JobType`] through [`JobRegistry::find_or_start`].
//!
//! The check in [`JobRegistry::start`] and the creation that follows are two separate
//! provider calls. Two callers racing on the same type can both see "nothing active"
//! and both create a job flow with the same name; nothing here prevents that.
mod job;
pub use job::Job;

use std::sync::Arc;

use tracing::{debug, info, instrument};

use flowkeep_model::{DescribeJobFlows, JobType, StepConfig};

use crate::{
    config::{Configuration, Credentials},
    error::{CoreError, CoreResult},
    provider::JobFlowApi,
};

/// Lists, starts and terminates managed job flows.
///
/// Holds no state of its own between calls: every answer comes from the provider.
#[derive(Clone)]
pub struct JobRegistry {
    config: Arc<Configuration>,
    api: Arc<dyn JobFlowApi>,
}

impl JobRegistry {
    pub fn new(config: Arc<Configuration>, api: Arc<dyn JobFlowApi>) -> Self {
        Self { config, api }
    }

    /// Registry using the configuration's cached client, built by `connect` on first use.
    pub fn connect<F>(config: Arc<Configuration>, connect: F) -> Self
    where
        F: FnOnce(&Credentials) -> Arc<dyn JobFlowApi>,
    {
        let api = config.client_with(connect);
        Self { config, api }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Describe one job flow by id. Not limited to managed job flows.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, job_flow_id: &str) -> CoreResult<Job> {
        let query = DescribeJobFlows::by_ids([job_flow_id]);
        let flows = self.api.describe_job_flows(&query).await.map_err(|e| {
            if e.is_not_found() {
                CoreError::NotFound(job_flow_id.to_string())
            } else {
                CoreError::Transport(e)
            }
        })?;

        flows
            .into_iter()
            .find(|f| f.job_flow_id == job_flow_id)
            .map(Job::new)
            .ok_or_else(|| CoreError::NotFound(job_flow_id.to_string()))
    }

    /// Every job flow created at or after the configured epoch. Not limited to managed ones.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_all(&self) -> CoreResult<Vec<Job>> {
        let query = DescribeJobFlows::created_after(self.config.epoch()?);
        let flows = self.api.describe_job_flows(&query).await?;

        debug!(count = flows.len(), "listed job flows");
        Ok(flows.into_iter().map(Job::new).collect())
    }

    /// Managed job flows.
    ///
    /// Without a filter, every job flow whose name starts with the name prefix. With a
    /// type, only job flows named exactly [`Configuration::full_name_for`] that type.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_managed(&self, filter: Option<JobType>) -> CoreResult<Vec<Job>> {
        let jobs = self.list_all().await?;

        let managed: Vec<Job> = match filter {
            None => jobs
                .into_iter()
                .filter(|j| j.name().starts_with(self.config.name_prefix.as_str()))
                .collect(),
            Some(job_type) => {
                let full_name = self.config.full_name_for(job_type);
                jobs.into_iter().filter(|j| j.name() == full_name).collect()
            }
        };
        Ok(managed)
    }

    /// Managed job flows that are starting, bootstrapping, running or waiting.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_active_managed(&self, filter: Option<JobType>) -> CoreResult<Vec<Job>> {
        let jobs = self.list_managed(filter).await?;
        Ok(jobs.into_iter().filter(Job::is_active).collect())
    }

    /// The active managed job flow of this type, started first if there is none.
    #[instrument(level = "debug", skip(self, job_type), fields(job_type = %job_type))]
    pub async fn find_or_start(&self, job_type: JobType) -> CoreResult<Job> {
        if let Some(job) = self
            .list_active_managed(Some(job_type))
            .await?
            .into_iter()
            .next()
        {
            debug!(job_flow_id = job.id(), "reusing active job flow");
            return Ok(job);
        }
        self.start(job_type).await
    }

    /// Create a managed job flow of this type.
    ///
    /// Fails with [`CoreError::DuplicateJob`] when one is already active. Otherwise the
    /// job flow is created with the type's display name and the configured sizing, the
    /// type's bootstrap step is attached, and the fresh description is returned.
    #[instrument(level = "debug", skip(self, job_type), fields(job_type = %job_type))]
    pub async fn start(&self, job_type: JobType) -> CoreResult<Job> {
        if !self.list_active_managed(Some(job_type)).await?.is_empty() {
            return Err(CoreError::DuplicateJob(job_type));
        }

        let name = self.config.full_name_for(job_type);
        let job_flow_id = self
            .api
            .run_job_flow(&name, &self.config.job_flow_config())
            .await?;
        info!(job_flow_id = %job_flow_id, name = %name, "job flow created");

        if let Some(step) = StepConfig::bootstrap_for(job_type) {
            self.api
                .add_job_flow_steps(&job_flow_id, std::slice::from_ref(&step))
                .await?;
            debug!(job_flow_id = %job_flow_id, step = %step.name, "bootstrap step attached");
        }

        self.get(&job_flow_id).await
    }

    /// [`JobRegistry::start`] for a type given by label (`"hive"`, `"pig"`, `"streaming"`).
    pub async fn start_named(&self, label: &str) -> CoreResult<Job> {
        self.start(parse_type(label)?).await
    }

    /// [`JobRegistry::find_or_start`] for a type given by label.
    pub async fn find_or_start_named(&self, label: &str) -> CoreResult<Job> {
        self.find_or_start(parse_type(label)?).await
    }

    pub async fn start_hive(&self) -> CoreResult<Job> {
        self.start(JobType::Hive).await
    }

    pub async fn start_pig(&self) -> CoreResult<Job> {
        self.start(JobType::Pig).await
    }

    pub async fn start_streaming(&self) -> CoreResult<Job> {
        self.start(JobType::Streaming).await
    }

    pub async fn find_or_start_hive(&self) -> CoreResult<Job> {
        self.find_or_start(JobType::Hive).await
    }

    pub async fn find_or_start_pig(&self) -> CoreResult<Job> {
        self.find_or_start(JobType::Pig).await
    }

    pub async fn find_or_start_streaming(&self) -> CoreResult<Job> {
        self.find_or_start(JobType::Streaming).await
    }

    /// Attach steps to an existing job flow (streaming work, ad-hoc scripts).
    #[instrument(level = "debug", skip(self, steps), fields(steps = steps.len()))]
    pub async fn add_steps(&self, job_flow_id: &str, steps: &[StepConfig]) -> CoreResult<()> {
        self.api
            .add_job_flow_steps(job_flow_id, steps)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::NotFound(job_flow_id.to_string())
                } else {
                    CoreError::Transport(e)
                }
            })
    }

    /// Request termination of the given job flows. Not limited to managed ones.
    ///
    /// Returns whether the provider acknowledged the request; an empty list is not
    /// sent and yields `false`.
    pub async fn kill<I, S>(&self, job_flow_ids: I) -> CoreResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = job_flow_ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Ok(false);
        }

        let acknowledged = self.api.terminate_job_flows(&ids).await?;
        info!(count = ids.len(), acknowledged, "termination requested");
        Ok(acknowledged)
    }

    /// Terminate every managed job flow, whatever its state.
    ///
    /// Returns `false` without contacting the provider when there is nothing managed.
    #[instrument(level = "debug", skip(self))]
    pub async fn kill_all(&self) -> CoreResult<bool> {
        let jobs = self.list_managed(None).await?;
        if jobs.is_empty() {
            debug!("no managed job flows to terminate");
            return Ok(false);
        }
        self.kill(jobs.iter().map(Job::id)).await
    }
}

fn parse_type(label: &str) -> CoreResult<JobType> {
    label
        .parse()
        .map_err(|_| CoreError::InvalidType(label.to_string()))
}
