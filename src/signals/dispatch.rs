/*!
 * Signal Dispatcher
 * Deferred, caller-triggered execution of registered handlers
 */

use super::registry::SignalControl;
use super::traits::SignalDispatch;
use super::types::{HandlerAction, Signal, SignalResult};
use log::debug;

impl SignalDispatch for SignalControl {
    /// Single synchronous pass over the recorded signals.
    ///
    /// Drains in ascending signal-number order within this call. Each
    /// pending mark is cleared before its handler runs, so a handler that
    /// re-delivers its own signal marks it for the *next* pass rather than
    /// looping here. `Ignore`/`Default` entries (and signals with no
    /// registered action) are cleared without invocation.
    ///
    /// Not atomic: if a callback panics, earlier handlers in the pass have
    /// already run and their pending marks stay cleared.
    ///
    /// Returns the number of callbacks invoked.
    fn dispatch_pending(&self) -> SignalResult<usize> {
        let mut invoked = 0usize;
        let mut cleared = 0u64;

        for signal in Signal::iter() {
            if !self.pending.take(signal) {
                continue;
            }

            let action = self.actions.get(&signal).map(|entry| entry.value().clone());
            match action {
                Some(HandlerAction::Invoke(callback)) => {
                    debug!("Dispatching {} to registered handler", signal);
                    callback(signal);
                    invoked += 1;
                }
                _ => {
                    debug!("Cleared pending {} without invocation", signal);
                    cleared += 1;
                }
            }
        }

        if invoked > 0 || cleared > 0 {
            let mut stats = self.stats.write();
            stats.signals_dispatched += invoked as u64;
            stats.cleared_without_invoke += cleared;
        }

        Ok(invoked)
    }

    fn pending_signals(&self) -> Vec<Signal> {
        self.pending.snapshot()
    }

    fn has_pending(&self) -> bool {
        !self.pending.snapshot().is_empty()
    }
}
