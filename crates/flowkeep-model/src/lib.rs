//! Data model shared by the flowkeep crates: job types and states, the job flow
//! creation request, and the job flow description returned by the provider.
mod domain;
pub use domain::{
    KeyValue, NAME_KEY_TYPE, NAME_NAME_SEPARATOR, NAME_SUFFIX_SEPARATOR, format_iso8601,
    format_iso8601_date, parse_iso8601,
};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::{ACTIVE_STATES, JobState, JobType, PENDING_STATES, READY_STATES};

mod spec;
pub use spec::{
    ActionOnFailure, DEFAULT_AMI_VERSION, HadoopJarStep, InstanceGroupConfig, InstanceRole,
    InstancesConfig, JobFlowConfig, Market, SizingPreset, StepConfig,
};

mod record;
pub use record::{
    DescribeJobFlows, ExecutionStatusDetail, InstanceGroupDetail, InstancesDetail, JobFlowRecord,
    StepDetail, StepExecutionStatusDetail,
};
