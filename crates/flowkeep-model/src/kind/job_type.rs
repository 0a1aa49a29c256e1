use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Kind of workload a managed job flow is prepared for.
///
/// At most one active managed job flow exists per type: the type label is embedded in the
/// job flow name (`type => hive`) and that exact name is what de-duplication compares against.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// Interactive Hive query cluster.
    Hive,
    /// Pig batch script cluster.
    #[default]
    Pig,
    /// Hadoop streaming cluster. No bootstrap step is attached on start.
    Streaming,
}

impl JobType {
    /// Every supported job type, in label-table order.
    pub const ALL: [JobType; 3] = [JobType::Hive, JobType::Pig, JobType::Streaming];

    /// Returns the label used in job flow names.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Hive => "hive",
            JobType::Pig => "pig",
            JobType::Streaming => "streaming",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.trim().to_ascii_lowercase();
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownJobType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pig() {
        assert_eq!(JobType::default(), JobType::Pig);
    }

    #[test]
    fn parses_labels_case_insensitive() {
        assert_eq!("hive".parse::<JobType>().unwrap(), JobType::Hive);
        assert_eq!("PIG".parse::<JobType>().unwrap(), JobType::Pig);
        assert_eq!(" Streaming ".parse::<JobType>().unwrap(), JobType::Streaming);
    }

    #[test]
    fn rejects_unknown_labels() {
        for input in ["", "spark", "hive2", "map-reduce"] {
            match input.parse::<JobType>() {
                Err(ModelError::UnknownJobType(got)) => assert_eq!(got, input),
                other => panic!("expected UnknownJobType for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn display_matches_label_table() {
        for t in JobType::ALL {
            assert_eq!(t.to_string(), t.as_str());
            assert_eq!(t.as_str().parse::<JobType>().unwrap(), t);
        }
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&JobType::Streaming).unwrap();
        assert_eq!(json, r#""streaming""#);
    }
}
