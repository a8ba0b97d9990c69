pub mod action_outcome;
pub mod pid;
pub mod process_record;

pub use action_outcome::ActionOutcome;
pub use pid::{Pid, MAX_PID};
pub use process_record::ProcessRecord;
