use serde::{Deserialize, Serialize};

/// Role an instance group plays inside the cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceRole {
    /// Lead node: runs the job tracker and exposes the public address.
    Master,
    /// Workers holding HDFS data.
    Core,
    /// Compute-only workers.
    Task,
}

/// Purchasing market of an instance group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    OnDemand,
    Spot,
}

/// One instance group of a job flow creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceGroupConfig {
    /// Number of instances in the group.
    pub instance_count: u32,
    pub instance_role: InstanceRole,
    /// Provider instance class (e.g. "m1.small").
    pub instance_type: String,
    pub market: Market,
    /// Human-readable group name.
    pub name: String,
    /// Maximum hourly bid, only meaningful for [`Market::Spot`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<String>,
}

impl InstanceGroupConfig {
    /// On-demand group with the given role, class, size and name.
    pub fn on_demand(
        role: InstanceRole,
        instance_type: impl Into<String>,
        count: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            instance_count: count,
            instance_role: role,
            instance_type: instance_type.into(),
            market: Market::OnDemand,
            name: name.into(),
            bid_price: None,
        }
    }

    /// Spot group bidding `bid_price` per instance hour.
    pub fn spot(
        role: InstanceRole,
        instance_type: impl Into<String>,
        count: u32,
        name: impl Into<String>,
        bid_price: impl Into<String>,
    ) -> Self {
        Self {
            market: Market::Spot,
            bid_price: Some(bid_price.into()),
            ..Self::on_demand(role, instance_type, count, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_provider_casing() {
        let group = InstanceGroupConfig::spot(InstanceRole::Task, "c1.medium", 4, "Flex group", "0.08");
        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(json["InstanceCount"], 4);
        assert_eq!(json["InstanceRole"], "TASK");
        assert_eq!(json["Market"], "SPOT");
        assert_eq!(json["BidPrice"], "0.08");
    }

    #[test]
    fn on_demand_omits_bid_price() {
        let group = InstanceGroupConfig::on_demand(InstanceRole::Master, "m1.small", 1, "Master group");
        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(json["Market"], "ON_DEMAND");
        assert!(json.get("BidPrice").is_none());
    }
}
