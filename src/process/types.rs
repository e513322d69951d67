/*!
 * Process Types
 * Lifecycle outcomes, wait options, and result types
 */

use super::status::WaitStatus;
use crate::core::types::Pid;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProcessError {
    #[error("No such process: {0}")]
    NoSuchProcess(Pid),

    #[error("No waitable children")]
    NoChildren,

    #[error("Executable not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Interrupted by an unrelated signal")]
    Interrupted,

    #[error("Platform error: {0}")]
    Platform(i32),
}

impl ProcessError {
    pub(crate) fn from_errno(errno: Errno) -> Self {
        match errno {
            Errno::EINTR => ProcessError::Interrupted,
            Errno::ECHILD => ProcessError::NoChildren,
            e => ProcessError::Platform(e as i32),
        }
    }
}

/// Which side of a process duplication the caller is on
///
/// Exactly one of parent tag, child tag, or an error is ever observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForkOutcome {
    /// Caller is the original process; carries the child's PID
    Parent(Pid),
    /// Caller is the duplicate
    Child,
}

/// Result of a reap attempt
///
/// Replaces the legacy -1/0 return conventions: failure is an error
/// variant, "no eligible child yet" is `NoChildReady`, success carries the
/// reaped PID and its raw status for the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReapOutcome {
    /// A child changed state and was reaped
    Reaped { pid: Pid, status: WaitStatus },
    /// Non-blocking wait found no eligible child
    NoChildReady,
}

/// Options for the wait operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Return `NoChildReady` instead of blocking
    pub no_hang: bool,
    /// Also report children stopped by a signal
    pub report_stopped: bool,
    /// Also report children resumed by SIGCONT
    pub report_continued: bool,
}

impl WaitOptions {
    /// Blocking wait for termination only
    pub const fn blocking() -> Self {
        Self {
            no_hang: false,
            report_stopped: false,
            report_continued: false,
        }
    }

    /// Non-blocking wait for termination only
    pub const fn non_blocking() -> Self {
        Self {
            no_hang: true,
            report_stopped: false,
            report_continued: false,
        }
    }

    pub(super) fn to_flags(self) -> libc::c_int {
        let mut flags = 0;
        if self.no_hang {
            flags |= libc::WNOHANG;
        }
        if self.report_stopped {
            flags |= libc::WUNTRACED;
        }
        if self.report_continued {
            flags |= libc::WCONTINUED;
        }
        flags
    }
}
