mod job_type;
pub use job_type::JobType;

mod state;
pub use state::{ACTIVE_STATES, JobState, PENDING_STATES, READY_STATES};
