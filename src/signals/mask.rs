/*!
 * Signal Mask/Wait Controller
 * Blocked-signal set management and blocking signal waits
 */

use super::types::{Signal, SignalError, SignalInfo, SignalResult};
use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{sigprocmask, SigSet, SigmaskHow};
use std::time::Duration;

/// How a mask mutation applies to the blocked set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskHow {
    /// Add the given signals to the blocked set
    Block,
    /// Remove the given signals from the blocked set
    Unblock,
    /// Replace the blocked set wholesale
    SetExact,
}

/// Mutate the blocked-signal set, returning the previously blocked set.
///
/// The blocked set is kernel state; this is the only mutation surface the
/// crate exposes for it. `SetExact` with an empty slice clears the mask.
///
/// The returned set is the [`Signal`] enum view: blocked signals outside
/// the classic range (real-time signals) are not representable and are
/// omitted. `Block`/`Unblock` leave such signals untouched, but restoring
/// a saved mask with `SetExact` unblocks them.
pub fn set_mask(how: MaskHow, signals: &[Signal]) -> SignalResult<Vec<Signal>> {
    let set = to_sigset(signals);
    let nix_how = match how {
        MaskHow::Block => SigmaskHow::SIG_BLOCK,
        MaskHow::Unblock => SigmaskHow::SIG_UNBLOCK,
        MaskHow::SetExact => SigmaskHow::SIG_SETMASK,
    };

    let mut previous = SigSet::empty();
    sigprocmask(nix_how, Some(&set), Some(&mut previous)).map_err(SignalError::from_errno)?;

    debug!("Applied {:?} mask change for {} signals", how, signals.len());
    Ok(from_sigset(&previous))
}

/// The currently blocked set, without mutating it.
///
/// Same enum view as [`set_mask`]: blocked signals outside the classic
/// range are omitted.
pub fn blocked_signals() -> SignalResult<Vec<Signal>> {
    let mut current = SigSet::empty();
    sigprocmask(SigmaskHow::SIG_BLOCK, None, Some(&mut current))
        .map_err(SignalError::from_errno)?;
    Ok(from_sigset(&current))
}

/// Block until one of the given signals is delivered or already pending.
///
/// Pending signals satisfy the wait immediately. Indefinite: no timeout.
/// The signals should be blocked (see [`set_mask`]) before waiting, or
/// asynchronous delivery may consume them first.
///
/// Suspension point: the calling thread yields until delivery.
pub fn wait_for_signal(signals: &[Signal]) -> SignalResult<SignalInfo> {
    if signals.is_empty() {
        return Err(SignalError::InvalidSignalSet);
    }

    let set = to_raw_sigset(signals);
    let mut info: libc::siginfo_t = unsafe { std::mem::zeroed() };
    let res = unsafe { libc::sigwaitinfo(&set, &mut info) };
    if res == -1 {
        return Err(SignalError::from_errno(Errno::last()));
    }
    signal_info(&info)
}

/// Bounded variant of [`wait_for_signal`].
///
/// Returns `Ok(None)` when the timeout elapses with nothing delivered; a
/// zero timeout polls once without blocking.
pub fn wait_for_signal_timed(
    signals: &[Signal],
    timeout: Duration,
) -> SignalResult<Option<SignalInfo>> {
    if signals.is_empty() {
        return Err(SignalError::InvalidSignalSet);
    }

    let set = to_raw_sigset(signals);
    // Saturate rather than wrap: a wrapped tv_sec goes negative and the
    // kernel rejects the whole call with EINVAL.
    let ts = libc::timespec {
        tv_sec: libc::time_t::try_from(timeout.as_secs()).unwrap_or(libc::time_t::MAX),
        tv_nsec: timeout.subsec_nanos() as libc::c_long,
    };
    let mut info: libc::siginfo_t = unsafe { std::mem::zeroed() };
    let res = unsafe { libc::sigtimedwait(&set, &mut info, &ts) };
    if res == -1 {
        return match Errno::last() {
            Errno::EAGAIN => Ok(None),
            errno => Err(SignalError::from_errno(errno)),
        };
    }
    signal_info(&info).map(Some)
}

fn to_sigset(signals: &[Signal]) -> SigSet {
    let mut set = SigSet::empty();
    for signal in signals {
        set.add(signal.to_nix());
    }
    set
}

fn to_raw_sigset(signals: &[Signal]) -> libc::sigset_t {
    let mut set = std::mem::MaybeUninit::<libc::sigset_t>::uninit();
    unsafe {
        libc::sigemptyset(set.as_mut_ptr());
        for signal in signals {
            libc::sigaddset(set.as_mut_ptr(), signal.number());
        }
        set.assume_init()
    }
}

fn from_sigset(set: &SigSet) -> Vec<Signal> {
    Signal::iter().filter(|s| set.contains(s.to_nix())).collect()
}

fn signal_info(info: &libc::siginfo_t) -> SignalResult<SignalInfo> {
    let signal = Signal::from_number(info.si_signo)?;
    // Sender fields are populated for kill/queue-originated delivery.
    let (sender_pid, sender_uid) = unsafe { (info.si_pid(), info.si_uid()) };
    Ok(SignalInfo {
        signal,
        sender_pid,
        sender_uid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigset_round_trip() {
        let signals = [Signal::SIGUSR1, Signal::SIGTERM, Signal::SIGWINCH];
        let set = to_sigset(&signals);
        let back = from_sigset(&set);
        assert_eq!(back, vec![Signal::SIGUSR1, Signal::SIGTERM, Signal::SIGWINCH]);
    }

    #[test]
    fn empty_set_rejected_for_waits() {
        assert_eq!(wait_for_signal(&[]).unwrap_err(), SignalError::InvalidSignalSet);
        assert_eq!(
            wait_for_signal_timed(&[], Duration::ZERO).unwrap_err(),
            SignalError::InvalidSignalSet
        );
    }
}
