/*!
 * Process Lifecycle Controller
 * Creation, image replacement, reaping, and signal sending
 */

use super::status::WaitStatus;
use super::types::{ForkOutcome, ProcessError, ProcessResult, ReapOutcome, WaitOptions};
use crate::core::types::Pid;
use crate::signals::types::Signal;
use log::{debug, info};
use nix::errno::Errno;
use nix::unistd::{self, ForkResult};
use std::convert::Infallible;
use std::ffi::CString;

/// Duplicate the calling process.
///
/// Returns `Parent(child_pid)` in the original process and `Child` in the
/// duplicate; exactly one of the two tags or an error is ever observable.
///
/// The duplicate inherits the caller's full state. In a multithreaded
/// process only the calling thread is duplicated, so the child should
/// restrict itself to async-signal-safe work until it replaces its image.
pub fn fork() -> ProcessResult<ForkOutcome> {
    match unsafe { unistd::fork() } {
        Ok(ForkResult::Parent { child }) => {
            info!("Forked child PID {}", child);
            Ok(ForkOutcome::Parent(child.as_raw()))
        }
        Ok(ForkResult::Child) => Ok(ForkOutcome::Child),
        Err(errno) => Err(ProcessError::from_errno(errno)),
    }
}

/// Replace the calling process image.
///
/// On success this does not return: the process image is replaced and only
/// the error path is observable, which the `Infallible` success type
/// reflects.
pub fn exec_replace(path: &str, args: &[&str], env: &[&str]) -> ProcessResult<Infallible> {
    let c_path = c_string(path)?;
    let c_args: Vec<CString> = args.iter().map(|a| c_string(a)).collect::<Result<_, _>>()?;
    let c_env: Vec<CString> = env.iter().map(|e| c_string(e)).collect::<Result<_, _>>()?;

    debug!("Replacing process image with {}", path);
    let errno = match unistd::execve(&c_path, &c_args, &c_env) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    Err(match errno {
        Errno::ENOENT => ProcessError::NotFound(path.to_owned()),
        Errno::EACCES => ProcessError::PermissionDenied(path.to_owned()),
        e => ProcessError::from_errno(e),
    })
}

/// Reap any child that changes state.
///
/// Blocks unless `options.no_hang` is set; a non-blocking call with no
/// eligible child returns `NoChildReady` rather than an error. Suspension
/// point when blocking; an interrupting signal yields
/// [`ProcessError::Interrupted`].
pub fn wait(options: WaitOptions) -> ProcessResult<ReapOutcome> {
    reap(-1, options)
}

/// Reap a specific child.
///
/// Same blocking and sentinel semantics as [`wait`].
pub fn wait_pid(pid: Pid, options: WaitOptions) -> ProcessResult<ReapOutcome> {
    if pid <= 0 {
        return Err(ProcessError::InvalidArgument(format!(
            "PID must be positive, got {}",
            pid
        )));
    }
    reap(pid, options)
}

fn reap(pid: Pid, options: WaitOptions) -> ProcessResult<ReapOutcome> {
    let mut raw: libc::c_int = 0;
    let res = unsafe { libc::waitpid(pid, &mut raw, options.to_flags()) };
    match res {
        -1 => Err(ProcessError::from_errno(Errno::last())),
        0 => Ok(ReapOutcome::NoChildReady),
        child => {
            let status = WaitStatus::from_raw(raw);
            debug!("Reaped PID {}: {}", child, status);
            Ok(ReapOutcome::Reaped { pid: child, status })
        }
    }
}

/// Send a signal to a process
pub fn kill(pid: Pid, signal: Signal) -> ProcessResult<()> {
    nix::sys::signal::kill(unistd::Pid::from_raw(pid), signal.to_nix()).map_err(|errno| {
        match errno {
            Errno::ESRCH => ProcessError::NoSuchProcess(pid),
            Errno::EPERM => {
                ProcessError::PermissionDenied(format!("cannot signal PID {}", pid))
            }
            e => ProcessError::from_errno(e),
        }
    })
}

/// Deliver a signal to the calling process
pub fn raise(signal: Signal) -> ProcessResult<()> {
    nix::sys::signal::raise(signal.to_nix()).map_err(ProcessError::from_errno)
}

/// Schedule a SIGALRM after `secs` seconds, cancelling any previous alarm.
///
/// Returns the seconds that remained on the previously scheduled alarm.
/// The platform conflates two cases in a 0 return: no alarm was scheduled,
/// and an alarm with zero whole seconds remaining. This wrapper preserves
/// that ambiguity rather than guessing.
pub fn alarm(secs: u32) -> u32 {
    unsafe { libc::alarm(secs) }
}

/// PID of the calling process
pub fn pid() -> Pid {
    unistd::getpid().as_raw()
}

/// PID of the calling process's parent
pub fn parent_pid() -> Pid {
    unistd::getppid().as_raw()
}

fn c_string(s: &str) -> ProcessResult<CString> {
    CString::new(s)
        .map_err(|_| ProcessError::InvalidArgument(format!("embedded NUL in {:?}", s)))
}
