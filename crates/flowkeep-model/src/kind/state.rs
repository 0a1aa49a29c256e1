use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution state of a job flow as reported by the provider.
///
/// The provider may report states this crate does not know about; those are kept verbatim
/// in [`JobState::Other`] and are never considered active.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    ShuttingDown,
    Terminated,
    Completed,
    Failed,
    Other(String),
}

/// States in which the cluster accepts work.
pub const READY_STATES: [JobState; 2] = [JobState::Running, JobState::Waiting];

/// States of a cluster that is still coming up.
pub const PENDING_STATES: [JobState; 2] = [JobState::Starting, JobState::Bootstrapping];

/// Ready and pending states together: the job flow occupies its type slot.
pub const ACTIVE_STATES: [JobState; 4] = [
    JobState::Running,
    JobState::Waiting,
    JobState::Starting,
    JobState::Bootstrapping,
];

impl JobState {
    /// Returns the provider's spelling of the state.
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Starting => "STARTING",
            JobState::Bootstrapping => "BOOTSTRAPPING",
            JobState::Running => "RUNNING",
            JobState::Waiting => "WAITING",
            JobState::ShuttingDown => "SHUTTING_DOWN",
            JobState::Terminated => "TERMINATED",
            JobState::Completed => "COMPLETED",
            JobState::Failed => "FAILED",
            JobState::Other(s) => s,
        }
    }

    /// `RUNNING` or `WAITING`.
    pub fn is_ready(&self) -> bool {
        READY_STATES.contains(self)
    }

    /// `STARTING` or `BOOTSTRAPPING`.
    pub fn is_pending(&self) -> bool {
        PENDING_STATES.contains(self)
    }

    /// Ready or pending.
    pub fn is_active(&self) -> bool {
        ACTIVE_STATES.contains(self)
    }
}

impl From<&str> for JobState {
    fn from(s: &str) -> Self {
        match s {
            "STARTING" => JobState::Starting,
            "BOOTSTRAPPING" => JobState::Bootstrapping,
            "RUNNING" => JobState::Running,
            "WAITING" => JobState::Waiting,
            "SHUTTING_DOWN" => JobState::ShuttingDown,
            "TERMINATED" => JobState::Terminated,
            "COMPLETED" => JobState::Completed,
            "FAILED" => JobState::Failed,
            _ => JobState::Other(s.to_string()),
        }
    }
}

impl From<String> for JobState {
    fn from(s: String) -> Self {
        JobState::from(s.as_str())
    }
}

impl From<JobState> for String {
    fn from(s: JobState) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_states() {
        let cases = [
            ("STARTING", false, true),
            ("BOOTSTRAPPING", false, true),
            ("RUNNING", true, false),
            ("WAITING", true, false),
            ("SHUTTING_DOWN", false, false),
            ("TERMINATED", false, false),
            ("COMPLETED", false, false),
            ("FAILED", false, false),
        ];

        for (raw, ready, pending) in cases {
            let state = JobState::from(raw);
            assert_eq!(state.is_ready(), ready, "ready mismatch for {raw}");
            assert_eq!(state.is_pending(), pending, "pending mismatch for {raw}");
            assert_eq!(state.is_active(), ready || pending, "active mismatch for {raw}");
            assert_eq!(state.as_str(), raw);
        }
    }

    #[test]
    fn unknown_state_is_kept_and_inactive() {
        let state = JobState::from("RESIZING");
        assert_eq!(state, JobState::Other("RESIZING".to_string()));
        assert!(!state.is_active());
        assert_eq!(state.to_string(), "RESIZING");
    }

    #[test]
    fn serde_uses_provider_spelling() {
        let json = serde_json::to_string(&JobState::ShuttingDown).unwrap();
        assert_eq!(json, r#""SHUTTING_DOWN""#);

        let back: JobState = serde_json::from_str(r#""WAITING""#).unwrap();
        assert_eq!(back, JobState::Waiting);
    }

    #[test]
    fn spelling_must_match_exactly() {
        for raw in ["waiting", " RUNNING", "Starting"] {
            let state = JobState::from(raw);
            assert_eq!(state, JobState::Other(raw.to_string()));
            assert!(!state.is_active(), "{raw:?} must not be active");
        }
    }
}
