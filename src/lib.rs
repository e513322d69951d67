/*!
 * procctl
 * Safe, uniform surface over Unix process-control primitives
 *
 * Wraps process creation and replacement, signal registration/dispatch/
 * masking, scheduling priority, and child status inspection. Signal
 * callbacks never run in asynchronous trap context: arrivals are recorded
 * lock-free and handlers run only when the caller invokes the dispatch
 * pass. Legacy -1/0 sentinel returns are modeled as explicit result
 * variants throughout.
 */

pub mod core;
pub mod process;
pub mod signals;

// Re-exports
pub use crate::core::{describe, last_error_code, DescribeError, Pid, Priority, RawStatus};
pub use process::{
    alarm, exec_replace, fork, get_priority, kill, parent_pid, pid, raise, set_priority, wait,
    wait_pid, DecodedStatus, ForkOutcome, PriorityTarget, ProcessError, ProcessResult,
    ReapOutcome, WaitOptions, WaitStatus,
};
pub use signals::{
    blocked_signals, set_mask, wait_for_signal, wait_for_signal_timed, HandlerAction,
    HandlerDisposition, MaskHow, PendingSet, Signal, SignalControl, SignalDispatch, SignalError,
    SignalInfo, SignalManager, SignalRegistration, SignalResult, SignalStats,
};
