use serde::{Deserialize, Serialize};

use crate::kind::JobType;

/// Jar that runs an arbitrary script stored on S3.
pub const SCRIPT_RUNNER_JAR: &str = "s3://elasticmapreduce/libs/script-runner/script-runner.jar";

/// Hive release installed on hive clusters.
pub const HIVE_VERSION: &str = "0.7.1.1";

/// What the provider does with the job flow when a step fails.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOnFailure {
    #[default]
    TerminateJobFlow,
    CancelAndWait,
    Continue,
}

/// Jar invocation executed by a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HadoopJarStep {
    pub jar: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// One step submitted to a job flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StepConfig {
    pub name: String,
    #[serde(default)]
    pub action_on_failure: ActionOnFailure,
    pub hadoop_jar_step: HadoopJarStep,
}

impl StepConfig {
    /// Step running `jar` with `args`; a failure terminates the job flow.
    pub fn new<I, S>(name: impl Into<String>, jar: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            action_on_failure: ActionOnFailure::default(),
            hadoop_jar_step: HadoopJarStep {
                jar: jar.into(),
                args: args.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Override the failure action.
    pub fn with_action_on_failure(mut self, action: ActionOnFailure) -> Self {
        self.action_on_failure = action;
        self
    }

    /// Installs Hive on the cluster so it can serve interactive queries.
    pub fn hive_install() -> Self {
        Self::new(
            "Hive",
            SCRIPT_RUNNER_JAR,
            [
                "s3://elasticmapreduce/libs/hive/hive-script",
                "--base-path",
                "s3://elasticmapreduce/libs/hive/",
                "--install-hive",
                "--hive-versions",
                HIVE_VERSION,
            ],
        )
    }

    /// Installs Pig on the cluster.
    pub fn pig_install() -> Self {
        Self::new(
            "Pig",
            SCRIPT_RUNNER_JAR,
            [
                "s3://elasticmapreduce/libs/pig/pig-script",
                "--base-path",
                "s3://elasticmapreduce/libs/pig/",
                "--install-pig",
            ],
        )
    }

    /// Step attached right after a job flow of the given type is created.
    ///
    /// Streaming clusters get none: their work arrives as regular steps later.
    pub fn bootstrap_for(job_type: JobType) -> Option<Self> {
        match job_type {
            JobType::Hive => Some(Self::hive_install()),
            JobType::Pig => Some(Self::pig_install()),
            JobType::Streaming => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_steps_per_type() {
        let hive = StepConfig::bootstrap_for(JobType::Hive).unwrap();
        assert_eq!(hive.name, "Hive");
        assert!(hive.hadoop_jar_step.args.iter().any(|a| a == "--install-hive"));

        let pig = StepConfig::bootstrap_for(JobType::Pig).unwrap();
        assert_eq!(pig.name, "Pig");
        assert!(pig.hadoop_jar_step.args.iter().any(|a| a == "--install-pig"));

        assert!(StepConfig::bootstrap_for(JobType::Streaming).is_none());
    }

    #[test]
    fn install_steps_terminate_on_failure() {
        for step in [StepConfig::hive_install(), StepConfig::pig_install()] {
            assert_eq!(step.action_on_failure, ActionOnFailure::TerminateJobFlow);
            assert_eq!(step.hadoop_jar_step.jar, SCRIPT_RUNNER_JAR);
        }
    }

    #[test]
    fn serializes_with_provider_casing() {
        let step = StepConfig::new("wc", "s3://bucket/wc.jar", ["in", "out"])
            .with_action_on_failure(ActionOnFailure::Continue);
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["Name"], "wc");
        assert_eq!(json["ActionOnFailure"], "CONTINUE");
        assert_eq!(json["HadoopJarStep"]["Jar"], "s3://bucket/wc.jar");
        assert_eq!(json["HadoopJarStep"]["Args"][1], "out");
    }
}
