/*!
 * Signal Types
 * UNIX-style signal definitions and result types
 */

use crate::core::types::Pid;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SignalError {
    #[error("Invalid signal: {0}")]
    InvalidSignal(i32),

    #[error("Invalid signal set: empty or not usable for waiting")]
    InvalidSignalSet,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Interrupted by an unrelated signal")]
    Interrupted,

    #[error("Platform error: {0}")]
    Platform(i32),
}

impl SignalError {
    /// Map a primitive-layer failure, distinguishing interruption
    /// from genuine failure.
    pub(crate) fn from_errno(errno: Errno) -> Self {
        match errno {
            Errno::EINTR => SignalError::Interrupted,
            e => SignalError::Platform(e as i32),
        }
    }
}

/// UNIX-style signal numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum Signal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP = 1,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT = 2,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT = 3,
    /// Illegal instruction
    SIGILL = 4,
    /// Trace/breakpoint trap
    SIGTRAP = 5,
    /// Abort signal
    SIGABRT = 6,
    /// Bus error (bad memory access)
    SIGBUS = 7,
    /// Floating-point exception
    SIGFPE = 8,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = 9,
    /// User-defined signal 1
    SIGUSR1 = 10,
    /// Invalid memory reference
    SIGSEGV = 11,
    /// User-defined signal 2
    SIGUSR2 = 12,
    /// Broken pipe
    SIGPIPE = 13,
    /// Timer signal
    SIGALRM = 14,
    /// Termination signal
    SIGTERM = 15,
    /// Child process stopped or terminated
    SIGCHLD = 17,
    /// Continue if stopped
    SIGCONT = 18,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = 19,
    /// Stop typed at terminal (Ctrl+Z)
    SIGTSTP = 20,
    /// Terminal input for background process
    SIGTTIN = 21,
    /// Terminal output for background process
    SIGTTOU = 22,
    /// Urgent condition on socket
    SIGURG = 23,
    /// CPU time limit exceeded
    SIGXCPU = 24,
    /// File size limit exceeded
    SIGXFSZ = 25,
    /// Virtual alarm clock
    SIGVTALRM = 26,
    /// Profiling timer expired
    SIGPROF = 27,
    /// Window resize signal
    SIGWINCH = 28,
    /// I/O now possible
    SIGIO = 29,
    /// Power failure
    SIGPWR = 30,
    /// Bad system call
    SIGSYS = 31,
}

/// All signals in ascending numeric order
pub(crate) const ALL_SIGNALS: [Signal; 30] = [
    Signal::SIGHUP,
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGILL,
    Signal::SIGTRAP,
    Signal::SIGABRT,
    Signal::SIGBUS,
    Signal::SIGFPE,
    Signal::SIGKILL,
    Signal::SIGUSR1,
    Signal::SIGSEGV,
    Signal::SIGUSR2,
    Signal::SIGPIPE,
    Signal::SIGALRM,
    Signal::SIGTERM,
    Signal::SIGCHLD,
    Signal::SIGCONT,
    Signal::SIGSTOP,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
    Signal::SIGURG,
    Signal::SIGXCPU,
    Signal::SIGXFSZ,
    Signal::SIGVTALRM,
    Signal::SIGPROF,
    Signal::SIGWINCH,
    Signal::SIGIO,
    Signal::SIGPWR,
    Signal::SIGSYS,
];

impl Signal {
    /// Convert from signal number
    pub fn from_number(n: i32) -> SignalResult<Self> {
        match n {
            1 => Ok(Signal::SIGHUP),
            2 => Ok(Signal::SIGINT),
            3 => Ok(Signal::SIGQUIT),
            4 => Ok(Signal::SIGILL),
            5 => Ok(Signal::SIGTRAP),
            6 => Ok(Signal::SIGABRT),
            7 => Ok(Signal::SIGBUS),
            8 => Ok(Signal::SIGFPE),
            9 => Ok(Signal::SIGKILL),
            10 => Ok(Signal::SIGUSR1),
            11 => Ok(Signal::SIGSEGV),
            12 => Ok(Signal::SIGUSR2),
            13 => Ok(Signal::SIGPIPE),
            14 => Ok(Signal::SIGALRM),
            15 => Ok(Signal::SIGTERM),
            17 => Ok(Signal::SIGCHLD),
            18 => Ok(Signal::SIGCONT),
            19 => Ok(Signal::SIGSTOP),
            20 => Ok(Signal::SIGTSTP),
            21 => Ok(Signal::SIGTTIN),
            22 => Ok(Signal::SIGTTOU),
            23 => Ok(Signal::SIGURG),
            24 => Ok(Signal::SIGXCPU),
            25 => Ok(Signal::SIGXFSZ),
            26 => Ok(Signal::SIGVTALRM),
            27 => Ok(Signal::SIGPROF),
            28 => Ok(Signal::SIGWINCH),
            29 => Ok(Signal::SIGIO),
            30 => Ok(Signal::SIGPWR),
            31 => Ok(Signal::SIGSYS),
            _ => Err(SignalError::InvalidSignal(n)),
        }
    }

    /// Get signal number
    pub fn number(&self) -> i32 {
        *self as i32
    }

    /// Iterate all signals in ascending numeric order
    pub fn iter() -> impl Iterator<Item = Signal> {
        ALL_SIGNALS.iter().copied()
    }

    /// Check if signal can be caught/blocked
    pub fn can_catch(&self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }

    /// Check if signal is fatal by default
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Signal::SIGKILL
                | Signal::SIGTERM
                | Signal::SIGQUIT
                | Signal::SIGABRT
                | Signal::SIGSEGV
                | Signal::SIGILL
                | Signal::SIGBUS
                | Signal::SIGFPE
                | Signal::SIGSYS
        )
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Signal::SIGHUP => "Hangup",
            Signal::SIGINT => "Interrupt",
            Signal::SIGQUIT => "Quit",
            Signal::SIGILL => "Illegal instruction",
            Signal::SIGTRAP => "Trace/breakpoint trap",
            Signal::SIGABRT => "Aborted",
            Signal::SIGBUS => "Bus error",
            Signal::SIGFPE => "Floating point exception",
            Signal::SIGKILL => "Killed",
            Signal::SIGUSR1 => "User defined signal 1",
            Signal::SIGSEGV => "Segmentation fault",
            Signal::SIGUSR2 => "User defined signal 2",
            Signal::SIGPIPE => "Broken pipe",
            Signal::SIGALRM => "Alarm clock",
            Signal::SIGTERM => "Terminated",
            Signal::SIGCHLD => "Child status changed",
            Signal::SIGCONT => "Continued",
            Signal::SIGSTOP => "Stopped (signal)",
            Signal::SIGTSTP => "Stopped",
            Signal::SIGTTIN => "Stopped (tty input)",
            Signal::SIGTTOU => "Stopped (tty output)",
            Signal::SIGURG => "Urgent I/O condition",
            Signal::SIGXCPU => "CPU time limit exceeded",
            Signal::SIGXFSZ => "File size limit exceeded",
            Signal::SIGVTALRM => "Virtual timer expired",
            Signal::SIGPROF => "Profiling timer expired",
            Signal::SIGWINCH => "Window size changed",
            Signal::SIGIO => "I/O possible",
            Signal::SIGPWR => "Power failure",
            Signal::SIGSYS => "Bad system call",
        }
    }

    /// Convert to the primitive layer's signal type
    pub(crate) fn to_nix(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal as Nix;
        match self {
            Signal::SIGHUP => Nix::SIGHUP,
            Signal::SIGINT => Nix::SIGINT,
            Signal::SIGQUIT => Nix::SIGQUIT,
            Signal::SIGILL => Nix::SIGILL,
            Signal::SIGTRAP => Nix::SIGTRAP,
            Signal::SIGABRT => Nix::SIGABRT,
            Signal::SIGBUS => Nix::SIGBUS,
            Signal::SIGFPE => Nix::SIGFPE,
            Signal::SIGKILL => Nix::SIGKILL,
            Signal::SIGUSR1 => Nix::SIGUSR1,
            Signal::SIGSEGV => Nix::SIGSEGV,
            Signal::SIGUSR2 => Nix::SIGUSR2,
            Signal::SIGPIPE => Nix::SIGPIPE,
            Signal::SIGALRM => Nix::SIGALRM,
            Signal::SIGTERM => Nix::SIGTERM,
            Signal::SIGCHLD => Nix::SIGCHLD,
            Signal::SIGCONT => Nix::SIGCONT,
            Signal::SIGSTOP => Nix::SIGSTOP,
            Signal::SIGTSTP => Nix::SIGTSTP,
            Signal::SIGTTIN => Nix::SIGTTIN,
            Signal::SIGTTOU => Nix::SIGTTOU,
            Signal::SIGURG => Nix::SIGURG,
            Signal::SIGXCPU => Nix::SIGXCPU,
            Signal::SIGXFSZ => Nix::SIGXFSZ,
            Signal::SIGVTALRM => Nix::SIGVTALRM,
            Signal::SIGPROF => Nix::SIGPROF,
            Signal::SIGWINCH => Nix::SIGWINCH,
            Signal::SIGIO => Nix::SIGIO,
            Signal::SIGPWR => Nix::SIGPWR,
            Signal::SIGSYS => Nix::SIGSYS,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.number())
    }
}

/// Signal handler callback function type
pub type HandlerFn = Arc<dyn Fn(Signal) + Send + Sync>;

/// Handler action stored per signal in the registry
///
/// A registered action is replaced by a later registration for the same
/// signal and reset to `Default` only by explicit action, never silently.
#[derive(Clone)]
pub enum HandlerAction {
    /// Default behavior for the signal
    Default,
    /// Ignore signal
    Ignore,
    /// Record arrival, run the callback at the next dispatch pass
    Invoke(HandlerFn),
}

impl HandlerAction {
    /// Build an `Invoke` action from a closure
    pub fn invoke<F>(callback: F) -> Self
    where
        F: Fn(Signal) + Send + Sync + 'static,
    {
        HandlerAction::Invoke(Arc::new(callback))
    }

    /// Get disposition from action
    pub fn disposition(&self) -> HandlerDisposition {
        match self {
            HandlerAction::Default => HandlerDisposition::Default,
            HandlerAction::Ignore => HandlerDisposition::Ignore,
            HandlerAction::Invoke(_) => HandlerDisposition::Invoke,
        }
    }
}

impl fmt::Debug for HandlerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerAction::Default => write!(f, "Default"),
            HandlerAction::Ignore => write!(f, "Ignore"),
            HandlerAction::Invoke(_) => write!(f, "Invoke(..)"),
        }
    }
}

/// Signal disposition - what the registry will do on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerDisposition {
    Default,
    Ignore,
    Invoke,
}

/// Details of a delivered signal, from the wait primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    pub signal: Signal,
    /// Sending process; meaningful for kill-originated signals
    pub sender_pid: Pid,
    /// Real user ID of the sender
    pub sender_uid: u32,
}

/// Signal statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalStats {
    pub handlers_registered: usize,
    pub signals_recorded: u64,
    pub signals_dispatched: u64,
    pub cleared_without_invoke: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_number_round_trip() {
        assert_eq!(Signal::from_number(1).unwrap(), Signal::SIGHUP);
        assert_eq!(Signal::from_number(9).unwrap(), Signal::SIGKILL);
        assert_eq!(Signal::from_number(15).unwrap(), Signal::SIGTERM);
        assert!(Signal::from_number(0).is_err());
        assert!(Signal::from_number(16).is_err());
        assert!(Signal::from_number(99).is_err());
    }

    #[test]
    fn signal_properties() {
        assert!(!Signal::SIGKILL.can_catch());
        assert!(!Signal::SIGSTOP.can_catch());
        assert!(Signal::SIGTERM.can_catch());
        assert!(Signal::SIGUSR1.can_catch());

        assert!(Signal::SIGKILL.is_fatal());
        assert!(Signal::SIGSEGV.is_fatal());
        assert!(!Signal::SIGUSR1.is_fatal());
        assert!(!Signal::SIGCHLD.is_fatal());
    }

    #[test]
    fn iter_is_ascending() {
        let numbers: Vec<i32> = Signal::iter().map(|s| s.number()).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn action_dispositions() {
        assert_eq!(HandlerAction::Default.disposition(), HandlerDisposition::Default);
        assert_eq!(HandlerAction::Ignore.disposition(), HandlerDisposition::Ignore);
        assert_eq!(
            HandlerAction::invoke(|_| {}).disposition(),
            HandlerDisposition::Invoke
        );
    }
}
