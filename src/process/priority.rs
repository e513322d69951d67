/*!
 * Process Priority Management
 * Scheduling priority (niceness) queries and updates
 */

use super::types::{ProcessError, ProcessResult};
use crate::core::errno;
use crate::core::types::{Pid, Priority};
use log::info;
use nix::errno::Errno;

/// Scope a priority operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTarget {
    /// A single process
    Process,
    /// Every member of a process group
    ProcessGroup,
    /// Every process owned by a user (the id is a UID, not a PID)
    User,
}

impl PriorityTarget {
    fn which(self) -> libc::c_int {
        match self {
            PriorityTarget::Process => libc::PRIO_PROCESS as libc::c_int,
            PriorityTarget::ProcessGroup => libc::PRIO_PGRP as libc::c_int,
            PriorityTarget::User => libc::PRIO_USER as libc::c_int,
        }
    }
}

/// Current scheduling priority for the target.
///
/// `who = None` means the calling process (group, user). Lower value =
/// more favorable scheduling.
///
/// The primitive signals failure through the error channel because -1 is
/// also a valid priority: the channel is cleared before the call and
/// consulted after.
pub fn get_priority(target: PriorityTarget, who: Option<Pid>) -> ProcessResult<Priority> {
    let id = who.unwrap_or(0);

    errno::clear();
    // `which` is an enum type under glibc and a plain int elsewhere; let
    // the FFI signature pick.
    let value = unsafe { libc::getpriority(target.which() as _, id as libc::id_t) };
    if value == -1 && errno::last_error_code() != 0 {
        return Err(priority_error(who));
    }
    Ok(value)
}

/// Set the scheduling priority for the target.
///
/// Unprivileged callers may only raise the niceness (lower the favor) of
/// processes they own.
pub fn set_priority(
    target: PriorityTarget,
    who: Option<Pid>,
    value: Priority,
) -> ProcessResult<()> {
    let id = who.unwrap_or(0);

    let res = unsafe { libc::setpriority(target.which() as _, id as libc::id_t, value) };
    if res == -1 {
        return Err(priority_error(who));
    }

    info!("Set priority {} for {:?} id {}", value, target, id);
    Ok(())
}

fn priority_error(who: Option<Pid>) -> ProcessError {
    match Errno::last() {
        Errno::ESRCH => ProcessError::NoSuchProcess(who.unwrap_or(0)),
        Errno::EACCES | Errno::EPERM => {
            ProcessError::PermissionDenied("priority change not permitted".to_owned())
        }
        Errno::EINVAL => ProcessError::InvalidArgument("invalid priority target".to_owned()),
        e => ProcessError::Platform(e as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_own_priority() {
        let value = get_priority(PriorityTarget::Process, None).unwrap();
        assert!((-20..=19).contains(&value));
    }

    #[test]
    fn get_priority_unknown_pid() {
        // PID 1 always exists; an absurd PID should not.
        let err = get_priority(PriorityTarget::Process, Some(i32::MAX - 1)).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::NoSuchProcess(_) | ProcessError::InvalidArgument(_)
        ));
    }
}
