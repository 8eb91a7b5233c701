mod machine;
mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use machine::{Command, InputRejection, MachineError, SessionMachine, Step, parse_command};
pub use plan::{PoolSelector, SessionPlan, distinct_categories, uniform_sample};
pub use progress::SessionProgress;
pub use service::{SessionMode, SessionService};
pub use workflow::{CompletedSession, SessionLoopService};
