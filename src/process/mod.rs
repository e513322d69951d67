/*!
 * Process Module
 * Lifecycle, reaping, priority, and status decoding
 */

pub mod lifecycle;
pub mod priority;
pub mod status;
pub mod types;

// Re-export public API
pub use lifecycle::{alarm, exec_replace, fork, kill, parent_pid, pid, raise, wait, wait_pid};
pub use priority::{get_priority, set_priority, PriorityTarget};
pub use status::{DecodedStatus, WaitStatus};
pub use types::{ForkOutcome, ProcessError, ProcessResult, ReapOutcome, WaitOptions};
