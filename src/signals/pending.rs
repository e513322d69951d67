/*!
 * Pending Signal Set
 * Lock-free recording of signal arrivals from trap context
 */

use super::types::{Signal, ALL_SIGNALS};
use std::sync::atomic::{AtomicU64, Ordering};

// Process-wide state. The OS trap cannot capture a context pointer, so the
// bitmask and its counter live in statics; PendingSet is the owned handle
// through which all non-trap access flows.
static PENDING_BITS: AtomicU64 = AtomicU64::new(0);
static RECORDED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// OS-level trap installed for `Invoke` registrations.
///
/// Runs in asynchronous signal context, possibly in the middle of another
/// primitive call: atomic stores only. No allocation, no locks, no user
/// callbacks. Callback execution is deferred to the dispatch pass.
pub(crate) extern "C" fn record_trap(signo: libc::c_int) {
    if (1..64).contains(&signo) {
        PENDING_BITS.fetch_or(1u64 << signo, Ordering::SeqCst);
        RECORDED_TOTAL.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle over the process-wide pending-signal bitmask
///
/// One bit per signal number: arrivals of the same signal before a dispatch
/// coalesce into a single pending mark (signals are not queued by count).
#[derive(Debug, Clone, Copy)]
pub struct PendingSet {
    _priv: (),
}

impl PendingSet {
    pub(crate) fn handle() -> Self {
        Self { _priv: () }
    }

    /// Check whether a signal is recorded but not yet dispatched
    pub fn is_pending(&self, signal: Signal) -> bool {
        PENDING_BITS.load(Ordering::SeqCst) & Self::bit(signal) != 0
    }

    /// All recorded signals, ascending numeric order
    pub fn snapshot(&self) -> Vec<Signal> {
        let bits = PENDING_BITS.load(Ordering::SeqCst);
        ALL_SIGNALS
            .iter()
            .copied()
            .filter(|s| bits & Self::bit(*s) != 0)
            .collect()
    }

    /// Clear the pending mark for a signal, returning whether it was set
    pub(crate) fn take(&self, signal: Signal) -> bool {
        let bit = Self::bit(signal);
        PENDING_BITS.fetch_and(!bit, Ordering::SeqCst) & bit != 0
    }

    /// Record a signal as pending (non-trap path, used by tests and
    /// synthetic delivery)
    pub(crate) fn record(&self, signal: Signal) {
        record_trap(signal.number());
    }

    /// Total arrivals recorded since process start, pre-coalescing
    pub(crate) fn recorded_total(&self) -> u64 {
        RECORDED_TOTAL.load(Ordering::Relaxed)
    }

    fn bit(signal: Signal) -> u64 {
        1u64 << signal.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn record_take_round_trip() {
        let pending = PendingSet::handle();
        assert!(!pending.is_pending(Signal::SIGWINCH));

        pending.record(Signal::SIGWINCH);
        assert!(pending.is_pending(Signal::SIGWINCH));
        assert!(pending.snapshot().contains(&Signal::SIGWINCH));

        assert!(pending.take(Signal::SIGWINCH));
        assert!(!pending.is_pending(Signal::SIGWINCH));
        assert!(!pending.take(Signal::SIGWINCH));
    }

    #[test]
    #[serial]
    fn repeated_arrivals_coalesce() {
        let pending = PendingSet::handle();
        pending.record(Signal::SIGURG);
        pending.record(Signal::SIGURG);
        pending.record(Signal::SIGURG);

        assert!(pending.take(Signal::SIGURG));
        // One pending mark regardless of arrival count
        assert!(!pending.take(Signal::SIGURG));
    }

    #[test]
    fn trap_ignores_out_of_range_numbers() {
        record_trap(0);
        record_trap(64);
        record_trap(-3);
    }
}
