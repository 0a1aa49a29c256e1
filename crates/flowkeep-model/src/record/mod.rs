//! Response-side shapes returned by the provider when describing job flows.
mod detail;
pub use detail::{
    ExecutionStatusDetail, InstanceGroupDetail, InstancesDetail, JobFlowRecord, StepDetail,
    StepExecutionStatusDetail,
};

mod query;
pub use query::DescribeJobFlows;
