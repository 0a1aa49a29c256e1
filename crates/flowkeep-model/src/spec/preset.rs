use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ModelError, ModelResult},
    spec::instance::{InstanceGroupConfig, InstanceRole},
};

/// Instance class of the lead node.
pub const MASTER_INSTANCE_TYPE: &str = "m1.small";

/// Instance class of every worker group.
pub const WORKER_INSTANCE_TYPE: &str = "c1.medium";

/// Hourly bid for spot workers of the production plan.
pub const SPOT_BID_PRICE: &str = "0.08";

/// Named instance-group plan used when creating a job flow.
///
/// - `Test`: one lead node and one worker.
/// - `Production`: one lead node, `N` on-demand workers and `2N` spot workers,
///   where `N` is the configured maximum number of on-demand instances.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingPreset {
    #[default]
    Test,
    Production,
}

impl SizingPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingPreset::Test => "test",
            SizingPreset::Production => "production",
        }
    }

    /// Resolve the preset into concrete instance groups.
    ///
    /// `max_instances` is only consulted by [`SizingPreset::Production`].
    pub fn instance_groups(&self, max_instances: u32) -> Vec<InstanceGroupConfig> {
        let master =
            InstanceGroupConfig::on_demand(InstanceRole::Master, MASTER_INSTANCE_TYPE, 1, "Master group");

        match self {
            SizingPreset::Test => vec![
                master,
                InstanceGroupConfig::on_demand(InstanceRole::Core, WORKER_INSTANCE_TYPE, 1, "Compute group"),
            ],
            SizingPreset::Production => vec![
                master,
                InstanceGroupConfig::on_demand(
                    InstanceRole::Core,
                    WORKER_INSTANCE_TYPE,
                    max_instances,
                    "Compute group",
                ),
                InstanceGroupConfig::spot(
                    InstanceRole::Task,
                    WORKER_INSTANCE_TYPE,
                    max_instances.saturating_mul(2),
                    "Flex group",
                    SPOT_BID_PRICE,
                ),
            ],
        }
    }
}

impl fmt::Display for SizingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizingPreset {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(SizingPreset::Test),
            "production" | "prod" => Ok(SizingPreset::Production),
            _ => Err(ModelError::UnknownPreset(s.to_string())),
        }
    }
}
