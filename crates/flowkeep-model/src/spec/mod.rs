//! Request-side shapes sent to the provider when creating a job flow.
mod instance;
pub use instance::{InstanceGroupConfig, InstanceRole, Market};

mod preset;
pub use preset::SizingPreset;

mod step;
pub use step::{ActionOnFailure, HadoopJarStep, StepConfig};

mod flow;
pub use flow::{DEFAULT_AMI_VERSION, InstancesConfig, JobFlowConfig};
