use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    kind::JobState,
    spec::{InstanceRole, Market, StepConfig},
};

/// Full description of one job flow, as reported by the provider.
///
/// This is the raw descriptor a `Job` snapshot wraps: derived fields (state, public
/// address, termination protection, type) are read from it on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobFlowRecord {
    /// Provider-assigned identifier (`j-...`). Never changes after creation.
    pub job_flow_id: String,
    /// Display name given at creation; managed job flows follow the naming convention.
    pub name: String,
    pub execution_status_detail: ExecutionStatusDetail,
    #[serde(default)]
    pub instances: InstancesDetail,
    #[serde(default)]
    pub steps: Vec<StepDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_version: Option<String>,
}

/// Lifecycle of the job flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionStatusDetail {
    pub state: JobState,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_date_time: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub ready_date_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_state_change_reason: Option<String>,
}

/// Instance block of a job flow description.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstancesDetail {
    /// Public DNS name of the lead node. Absent until the node is allocated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_public_dns_name: Option<String>,
    #[serde(default)]
    pub termination_protected: bool,
    #[serde(default)]
    pub keep_job_flow_alive_when_no_steps: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec2_key_name: Option<String>,
    #[serde(default)]
    pub instance_count: u32,
    #[serde(default)]
    pub instance_groups: Vec<InstanceGroupDetail>,
}

/// One provisioned instance group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceGroupDetail {
    pub instance_group_id: String,
    pub name: String,
    pub instance_role: InstanceRole,
    pub instance_type: String,
    pub market: Market,
    pub instance_request_count: u32,
    #[serde(default)]
    pub instance_running_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<String>,
}

/// One step of a job flow and where it is in its own lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StepDetail {
    pub step_config: StepConfig,
    pub execution_status_detail: StepExecutionStatusDetail,
}

/// Step state, kept as the provider spells it (`PENDING`, `RUNNING`, `COMPLETED`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StepExecutionStatusDetail {
    pub state: String,
}

impl JobFlowRecord {
    /// Current execution state.
    pub fn state(&self) -> &JobState {
        &self.execution_status_detail.state
    }
}
