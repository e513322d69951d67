/*!
 * Wait Status Decoder
 * Pure interpretation of raw child-status words
 */

use crate::core::types::RawStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw status word produced by a reap operation
///
/// The bit layout is platform-defined; callers interpret it only through
/// [`WaitStatus::decode`] and the predicate methods, which defer to the
/// platform's own decoding macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitStatus(RawStatus);

/// Decoded child state change
///
/// Exactly one variant describes a well-formed status word. Signal numbers
/// are the raw encoded values; symbolic mapping is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedStatus {
    /// Normal termination with the low 8 bits of the exit status
    Exited(u8),
    /// Termination by the given signal number
    Signaled(i32),
    /// Stopped by the given signal number
    Stopped(i32),
    /// Resumed by SIGCONT
    Continued,
}

impl WaitStatus {
    pub const fn from_raw(raw: RawStatus) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> RawStatus {
        self.0
    }

    /// Decode into exactly one state-change variant.
    ///
    /// Pure and infallible: a malformed word yields a best-effort decode
    /// (the exit-status reading), mirroring the primitive layer's
    /// defined-but-degenerate behavior rather than erroring.
    pub fn decode(self) -> DecodedStatus {
        let s = self.0;
        if libc::WIFEXITED(s) {
            DecodedStatus::Exited((libc::WEXITSTATUS(s) & 0xff) as u8)
        } else if libc::WIFSIGNALED(s) {
            DecodedStatus::Signaled(libc::WTERMSIG(s))
        } else if libc::WIFSTOPPED(s) {
            DecodedStatus::Stopped(libc::WSTOPSIG(s))
        } else if libc::WIFCONTINUED(s) {
            DecodedStatus::Continued
        } else {
            DecodedStatus::Exited((libc::WEXITSTATUS(s) & 0xff) as u8)
        }
    }

    /// Child terminated normally
    pub fn is_exited(self) -> bool {
        libc::WIFEXITED(self.0)
    }

    /// Exit code, masked to 0..=255.
    ///
    /// Meaningful only when [`is_exited`](Self::is_exited) is true; for any
    /// other status the returned value is unspecified (never a runtime
    /// fault). Guard with the predicate or match on [`decode`](Self::decode).
    pub fn exit_code(self) -> u8 {
        (libc::WEXITSTATUS(self.0) & 0xff) as u8
    }

    /// Child was terminated by a signal
    pub fn is_signaled(self) -> bool {
        libc::WIFSIGNALED(self.0)
    }

    /// Terminating signal number; meaningful only when
    /// [`is_signaled`](Self::is_signaled) is true.
    pub fn terminating_signal(self) -> i32 {
        libc::WTERMSIG(self.0)
    }

    /// Child is currently stopped
    pub fn is_stopped(self) -> bool {
        libc::WIFSTOPPED(self.0)
    }

    /// Stopping signal number; meaningful only when
    /// [`is_stopped`](Self::is_stopped) is true.
    pub fn stopping_signal(self) -> i32 {
        libc::WSTOPSIG(self.0)
    }

    /// Child was resumed by SIGCONT
    pub fn is_continued(self) -> bool {
        libc::WIFCONTINUED(self.0)
    }

    /// Signal termination produced a core dump; meaningful only when
    /// [`is_signaled`](Self::is_signaled) is true.
    pub fn core_dumped(self) -> bool {
        libc::WCOREDUMP(self.0)
    }
}

impl fmt::Display for WaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            DecodedStatus::Exited(code) => write!(f, "exited with code {}", code),
            DecodedStatus::Signaled(sig) => write!(f, "terminated by signal {}", sig),
            DecodedStatus::Stopped(sig) => write!(f, "stopped by signal {}", sig),
            DecodedStatus::Continued => write!(f, "continued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Encodings below follow the glibc layout: exit code in the second
    // byte, terminating signal in the low 7 bits, 0x7f low byte for stops,
    // 0xffff for continuation.

    #[test]
    fn normal_exit() {
        let status = WaitStatus::from_raw(42 << 8);
        assert!(status.is_exited());
        assert_eq!(status.exit_code(), 42);
        assert!(!status.is_signaled());
        assert!(!status.is_stopped());
        assert_eq!(status.decode(), DecodedStatus::Exited(42));
    }

    #[test]
    fn killed_by_signal() {
        let status = WaitStatus::from_raw(9);
        assert!(!status.is_exited());
        assert!(status.is_signaled());
        assert_eq!(status.terminating_signal(), 9);
        assert_eq!(status.decode(), DecodedStatus::Signaled(9));
    }

    #[test]
    fn stopped_by_signal() {
        let status = WaitStatus::from_raw((19 << 8) | 0x7f);
        assert!(status.is_stopped());
        assert_eq!(status.stopping_signal(), 19);
        assert_eq!(status.decode(), DecodedStatus::Stopped(19));
    }

    #[test]
    fn continued() {
        let status = WaitStatus::from_raw(0xffff);
        assert!(status.is_continued());
        assert_eq!(status.decode(), DecodedStatus::Continued);
    }

    #[test]
    fn decode_is_mutually_exclusive() {
        for raw in [0, 42 << 8, 9, (19 << 8) | 0x7f, 0xffff] {
            let status = WaitStatus::from_raw(raw);
            let tags = [
                matches!(status.decode(), DecodedStatus::Exited(_)) && status.is_exited(),
                matches!(status.decode(), DecodedStatus::Signaled(_)),
                matches!(status.decode(), DecodedStatus::Stopped(_)),
                matches!(status.decode(), DecodedStatus::Continued),
            ];
            assert_eq!(tags.iter().filter(|t| **t).count(), 1, "raw = {:#x}", raw);
        }
    }
}
