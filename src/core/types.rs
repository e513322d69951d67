/*!
 * Core Types
 * Common types used across the crate
 */

/// Process ID type
///
/// Always a positive value in this crate's API; the -1/0 sentinels of the
/// legacy primitive surface are modeled as explicit result variants instead.
pub type Pid = libc::pid_t;

/// Scheduling priority (niceness), conventionally -20..=19
///
/// Lower numeric value = more favorable scheduling.
pub type Priority = i32;

/// Raw wait-status word as produced by the reap primitives
///
/// The bit layout is platform-defined; interpret only through
/// [`crate::process::status::WaitStatus`].
pub type RawStatus = i32;
