/*!
 * Error Channel
 * Read-only view of the primitive layer's last-error code
 */

use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error channel failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescribeError {
    #[error("Unrecognized error code: {0}")]
    UnknownCode(i32),
}

/// Error code of the most recently failed primitive call.
///
/// Overwritten by every primitive call per the platform's own contract.
/// Advisory/debugging state only: every fallible operation in this crate
/// reports failure through its own result type, never through this channel
/// alone.
pub fn last_error_code() -> i32 {
    Errno::last_raw()
}

/// Platform description of an error code.
///
/// Read-only: a failing call never disturbs the last-error code (the
/// description comes from a static table, not from the primitive layer).
pub fn describe(code: i32) -> Result<String, DescribeError> {
    let errno = Errno::from_raw(code);
    if errno == Errno::UnknownErrno {
        return Err(DescribeError::UnknownCode(code));
    }
    Ok(errno.desc().to_owned())
}

/// Reset the last-error code to zero.
///
/// Required by primitives where a -1 return is also a valid result
/// (getpriority): clear first, call, then check whether an error code
/// was set.
pub(crate) fn clear() {
    Errno::clear()
}
