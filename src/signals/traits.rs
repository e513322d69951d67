/*!
 * Signal Traits
 * Signal handling abstractions
 */

use super::types::{HandlerAction, Signal, SignalResult};

/// Handler registration interface
pub trait SignalRegistration: Send + Sync {
    /// Install an action for a signal
    fn register(
        &self,
        signal: Signal,
        action: HandlerAction,
        restart_syscalls: bool,
    ) -> SignalResult<()>;

    /// Get the currently registered action for a signal
    fn registered_action(&self, signal: Signal) -> Option<HandlerAction>;

    /// Explicitly restore the default action for a signal
    fn reset(&self, signal: Signal) -> SignalResult<()>;
}

/// Deferred dispatch interface
pub trait SignalDispatch: Send + Sync {
    /// Drain recorded signals, invoking registered callbacks
    fn dispatch_pending(&self) -> SignalResult<usize>;

    /// Signals recorded but not yet dispatched
    fn pending_signals(&self) -> Vec<Signal>;

    /// Check whether any signal is recorded
    fn has_pending(&self) -> bool;
}

/// Combined signal manager trait
pub trait SignalManager: SignalRegistration + SignalDispatch + Clone + Send + Sync {}

/// Implement SignalManager for types that implement all required traits
impl<T> SignalManager for T where T: SignalRegistration + SignalDispatch + Clone + Send + Sync {}
