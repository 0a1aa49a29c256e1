use serde::{Deserialize, Serialize};

use crate::spec::instance::InstanceGroupConfig;

/// AMI version requested when none is configured.
pub const DEFAULT_AMI_VERSION: &str = "2.0";

/// Instance block of a job flow creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstancesConfig {
    /// EC2 key pair allowing SSH access to the lead node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec2_key_name: Option<String>,
    pub instance_groups: Vec<InstanceGroupConfig>,
    /// Keep the cluster up after its last step so interactive work can be added later.
    pub keep_job_flow_alive_when_no_steps: bool,
    pub termination_protected: bool,
}

/// Everything the provider needs besides the name to create a job flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobFlowConfig {
    pub ami_version: String,
    /// S3 location receiving the cluster logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    pub instances: InstancesConfig,
}
