use serde::{Deserialize, Serialize};

/// Filter for a describe call.
///
/// Empty `job_flow_ids` and no `created_after` means "whatever the provider lists by default".
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeJobFlows {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_flow_ids: Vec<String>,
    /// ISO-8601 lower bound on the creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
}

impl DescribeJobFlows {
    /// Describe exactly the given job flows.
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            job_flow_ids: ids.into_iter().map(Into::into).collect(),
            created_after: None,
        }
    }

    /// Describe every job flow created at or after `epoch`.
    pub fn created_after(epoch: impl Into<String>) -> Self {
        Self {
            job_flow_ids: Vec::new(),
            created_after: Some(epoch.into()),
        }
    }
}
