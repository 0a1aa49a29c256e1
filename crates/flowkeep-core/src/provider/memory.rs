use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::trace;
use uuid::Uuid;

use flowkeep_model::{
    DescribeJobFlows, ExecutionStatusDetail, InstanceGroupDetail, InstancesDetail, JobFlowConfig,
    JobFlowRecord, JobState, StepConfig, StepDetail, StepExecutionStatusDetail, parse_iso8601,
};

use crate::provider::{JOB_FLOW_NOT_FOUND_SIGNAL, JobFlowApi, ProviderError, ProviderResult};

/// In-process job flow provider.
///
/// Behaves like the remote API as far as the registry can observe:
/// - new job flows get a `j-` id and start in `STARTING`;
/// - unknown ids are answered with the provider's "not found" message;
/// - terminated job flows stay listed in `TERMINATED`;
/// - termination-protected job flows ignore terminate requests.
///
/// State transitions never happen on their own: use [`InMemoryJobFlows::set_state`]
/// to move a job flow along.
#[derive(Default)]
pub struct InMemoryJobFlows {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    flows: Vec<JobFlowRecord>,
    terminate_calls: usize,
}

impl InMemoryJobFlows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already existing job flow (created by someone else, or long ago).
    pub fn insert(&self, record: JobFlowRecord) {
        self.lock().flows.push(record);
    }

    /// Force the execution state of a job flow. Returns `false` for unknown ids.
    ///
    /// Moving into a ready state allocates the lead node address if it has none yet.
    pub fn set_state(&self, job_flow_id: &str, state: JobState) -> bool {
        let mut inner = self.lock();
        let Some(flow) = inner.flows.iter_mut().find(|f| f.job_flow_id == job_flow_id) else {
            return false;
        };

        if state.is_ready() {
            let status = &mut flow.execution_status_detail;
            status.ready_date_time.get_or_insert_with(OffsetDateTime::now_utc);
            flow.instances
                .master_public_dns_name
                .get_or_insert_with(|| master_dns_name(job_flow_id));
        }
        flow.execution_status_detail.state = state;
        true
    }

    /// Toggle termination protection. Returns `false` for unknown ids.
    pub fn set_termination_protected(&self, job_flow_id: &str, protected: bool) -> bool {
        let mut inner = self.lock();
        match inner.flows.iter_mut().find(|f| f.job_flow_id == job_flow_id) {
            Some(flow) => {
                flow.instances.termination_protected = protected;
                true
            }
            None => false,
        }
    }

    /// Number of terminate requests received so far.
    pub fn terminate_calls(&self) -> usize {
        self.lock().terminate_calls
    }

    /// Number of job flows known, whatever their state.
    pub fn len(&self) -> usize {
        self.lock().flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn not_found(job_flow_id: &str) -> ProviderError {
    ProviderError::not_found(format!("{JOB_FLOW_NOT_FOUND_SIGNAL}: {job_flow_id}"))
}

fn generate_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    format!("{prefix}-{}", &raw[..13])
}

fn master_dns_name(job_flow_id: &str) -> String {
    format!("{}.compute-1.amazonaws.com", job_flow_id.to_ascii_lowercase())
}

fn describe_groups(config: &JobFlowConfig) -> Vec<InstanceGroupDetail> {
    config
        .instances
        .instance_groups
        .iter()
        .map(|g| InstanceGroupDetail {
            instance_group_id: generate_id("ig"),
            name: g.name.clone(),
            instance_role: g.instance_role,
            instance_type: g.instance_type.clone(),
            market: g.market,
            instance_request_count: g.instance_count,
            instance_running_count: 0,
            bid_price: g.bid_price.clone(),
        })
        .collect()
}

#[async_trait]
impl JobFlowApi for InMemoryJobFlows {
    async fn describe_job_flows(&self, query: &DescribeJobFlows) -> ProviderResult<Vec<JobFlowRecord>> {
        let created_after = query
            .created_after
            .as_deref()
            .map(parse_iso8601)
            .transpose()
            .map_err(|e| ProviderError::rejected(e.to_string()))?;

        let inner = self.lock();
        if let Some(missing) = query
            .job_flow_ids
            .iter()
            .find(|id| !inner.flows.iter().any(|f| &f.job_flow_id == *id))
        {
            return Err(not_found(missing));
        }

        let out: Vec<JobFlowRecord> = inner
            .flows
            .iter()
            .filter(|f| query.job_flow_ids.is_empty() || query.job_flow_ids.contains(&f.job_flow_id))
            .filter(|f| match created_after {
                Some(after) => f.execution_status_detail.creation_date_time >= after,
                None => true,
            })
            .cloned()
            .collect();

        trace!(matched = out.len(), "described job flows");
        Ok(out)
    }

    async fn run_job_flow(&self, name: &str, config: &JobFlowConfig) -> ProviderResult<String> {
        let job_flow_id = generate_id("j");
        let groups = describe_groups(config);

        let record = JobFlowRecord {
            job_flow_id: job_flow_id.clone(),
            name: name.to_string(),
            execution_status_detail: ExecutionStatusDetail {
                state: JobState::Starting,
                creation_date_time: OffsetDateTime::now_utc(),
                ready_date_time: None,
                end_date_time: None,
                last_state_change_reason: None,
            },
            instances: InstancesDetail {
                master_public_dns_name: None,
                termination_protected: config.instances.termination_protected,
                keep_job_flow_alive_when_no_steps: config.instances.keep_job_flow_alive_when_no_steps,
                ec2_key_name: config.instances.ec2_key_name.clone(),
                instance_count: groups.iter().map(|g| g.instance_request_count).sum(),
                instance_groups: groups,
            },
            steps: Vec::new(),
            log_uri: config.log_uri.clone(),
            ami_version: Some(config.ami_version.clone()),
        };

        self.lock().flows.push(record);
        trace!(job_flow_id = %job_flow_id, "created job flow");
        Ok(job_flow_id)
    }

    async fn add_job_flow_steps(&self, job_flow_id: &str, steps: &[StepConfig]) -> ProviderResult<()> {
        let mut inner = self.lock();
        let flow = inner
            .flows
            .iter_mut()
            .find(|f| f.job_flow_id == job_flow_id)
            .ok_or_else(|| not_found(job_flow_id))?;

        flow.steps.extend(steps.iter().cloned().map(|step_config| StepDetail {
            step_config,
            execution_status_detail: StepExecutionStatusDetail {
                state: "PENDING".to_string(),
            },
        }));
        Ok(())
    }

    async fn terminate_job_flows(&self, job_flow_ids: &[String]) -> ProviderResult<bool> {
        let mut inner = self.lock();
        inner.terminate_calls += 1;

        if let Some(missing) = job_flow_ids
            .iter()
            .find(|id| !inner.flows.iter().any(|f| &f.job_flow_id == *id))
        {
            return Err(not_found(missing));
        }

        let now = OffsetDateTime::now_utc();
        for flow in inner
            .flows
            .iter_mut()
            .filter(|f| job_flow_ids.contains(&f.job_flow_id))
            .filter(|f| !f.instances.termination_protected)
        {
            let status = &mut flow.execution_status_detail;
            status.state = JobState::Terminated;
            status.end_date_time = Some(now);
            status.last_state_change_reason = Some("Terminated by user request".to_string());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowkeep_model::{InstancesConfig, SizingPreset};

    fn config() -> JobFlowConfig {
        JobFlowConfig {
            ami_version: "2.0".to_string(),
            log_uri: None,
            instances: InstancesConfig {
                ec2_key_name: Some("ops".to_string()),
                instance_groups: SizingPreset::Test.instance_groups(20),
                keep_job_flow_alive_when_no_steps: true,
                termination_protected: false,
            },
        }
    }

    #[tokio::test]
    async fn run_assigns_id_and_starting_state() {
        let api = InMemoryJobFlows::new();
        let id = api.run_job_flow("demo", &config()).await.unwrap();

        assert!(id.starts_with("j-"));
        assert_eq!(id.len(), 15);

        let flows = api.describe_job_flows(&DescribeJobFlows::by_ids([id.as_str()])).await.unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].state(), &JobState::Starting);
        assert_eq!(flows[0].instances.instance_count, 2);
        assert_eq!(flows[0].instances.ec2_key_name.as_deref(), Some("ops"));
    }

    #[tokio::test]
    async fn unknown_ids_report_not_found() {
        let api = InMemoryJobFlows::new();

        let err = api
            .describe_job_flows(&DescribeJobFlows::by_ids(["j-MISSING"]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = api.add_job_flow_steps("j-MISSING", &[]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn created_after_filters_old_flows() {
        let api = InMemoryJobFlows::new();
        let id = api.run_job_flow("demo", &config()).await.unwrap();

        let future = DescribeJobFlows::created_after("2999-01-01");
        assert!(api.describe_job_flows(&future).await.unwrap().is_empty());

        let past = DescribeJobFlows::created_after("2000-01-01T00:00:00Z");
        let flows = api.describe_job_flows(&past).await.unwrap();
        assert_eq!(flows[0].job_flow_id, id);
    }

    #[tokio::test]
    async fn malformed_created_after_is_rejected() {
        let api = InMemoryJobFlows::new();
        let err = api
            .describe_job_flows(&DescribeJobFlows::created_after("last tuesday"))
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn ready_state_allocates_master_address() {
        let api = InMemoryJobFlows::new();
        let id = api.run_job_flow("demo", &config()).await.unwrap();

        assert!(api.set_state(&id, JobState::Waiting));
        assert!(!api.set_state("j-MISSING", JobState::Waiting));

        let flows = api.describe_job_flows(&DescribeJobFlows::by_ids([id.as_str()])).await.unwrap();
        assert!(flows[0].instances.master_public_dns_name.is_some());
        assert!(flows[0].execution_status_detail.ready_date_time.is_some());
    }

    #[tokio::test]
    async fn terminate_skips_protected_flows() {
        let api = InMemoryJobFlows::new();
        let open = api.run_job_flow("open", &config()).await.unwrap();
        let guarded = api.run_job_flow("guarded", &config()).await.unwrap();
        api.set_termination_protected(&guarded, true);

        let ack = api
            .terminate_job_flows(&[open.clone(), guarded.clone()])
            .await
            .unwrap();
        assert!(ack);
        assert_eq!(api.terminate_calls(), 1);

        let flows = api.describe_job_flows(&DescribeJobFlows::default()).await.unwrap();
        let state_of = |id: &str| flows.iter().find(|f| f.job_flow_id == id).unwrap().state().clone();
        assert_eq!(state_of(&open), JobState::Terminated);
        assert_eq!(state_of(&guarded), JobState::Starting);
    }
}
