/*!
 * Signal Registry
 * Per-process table of handler actions and OS-level trap installation
 */

use super::pending::{record_trap, PendingSet};
use super::traits::SignalRegistration;
use super::types::{
    HandlerAction, HandlerDisposition, Signal, SignalError, SignalResult, SignalStats,
};
use ahash::RandomState;
use dashmap::DashMap;
use log::info;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet};
use parking_lot::RwLock;
use std::sync::Arc;

/// Signal control context
///
/// The explicitly-owned context for per-process signal state: the
/// handler-action table, the pending-set handle, and statistics. Intended
/// to be created once per process and shared (it is cheap to clone; clones
/// share state).
#[derive(Clone)]
pub struct SignalControl {
    pub(super) actions: Arc<DashMap<Signal, HandlerAction, RandomState>>,
    pub(super) pending: PendingSet,
    pub(super) stats: Arc<RwLock<SignalStats>>,
}

impl SignalControl {
    pub fn new() -> Self {
        info!("Signal control initialized");
        Self {
            actions: Arc::new(DashMap::with_hasher(RandomState::new())),
            pending: PendingSet::handle(),
            stats: Arc::new(RwLock::new(SignalStats::default())),
        }
    }

    /// Handle over the process-wide pending set
    pub fn pending(&self) -> PendingSet {
        self.pending
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> SignalStats {
        let mut stats = self.stats.read().clone();
        stats.signals_recorded = self.pending.recorded_total();
        stats
    }

    /// Register by raw signal number.
    ///
    /// Fails with `InvalidSignal` for numbers outside the platform range.
    pub fn register_raw(
        &self,
        signo: i32,
        action: HandlerAction,
        restart_syscalls: bool,
    ) -> SignalResult<()> {
        let signal = Signal::from_number(signo)?;
        self.register(signal, action, restart_syscalls)
    }

    fn install(signal: Signal, handler: SigHandler, restart_syscalls: bool) -> SignalResult<()> {
        let flags = if restart_syscalls {
            SaFlags::SA_RESTART
        } else {
            SaFlags::empty()
        };
        let act = SigAction::new(handler, flags, SigSet::empty());
        // Installing a disposition is process-global state, same as the
        // primitive it wraps.
        unsafe { sigaction(signal.to_nix(), &act) }
            .map(|_| ())
            .map_err(SignalError::from_errno)
    }

    fn adjust_handler_count(
        &self,
        removed: Option<HandlerDisposition>,
        added: Option<HandlerDisposition>,
    ) {
        let was_invoke = removed == Some(HandlerDisposition::Invoke);
        let is_invoke = added == Some(HandlerDisposition::Invoke);
        if was_invoke == is_invoke {
            return;
        }
        let mut stats = self.stats.write();
        if is_invoke {
            stats.handlers_registered += 1;
        } else {
            stats.handlers_registered = stats.handlers_registered.saturating_sub(1);
        }
    }
}

impl Default for SignalControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalRegistration for SignalControl {
    fn register(
        &self,
        signal: Signal,
        action: HandlerAction,
        restart_syscalls: bool,
    ) -> SignalResult<()> {
        if !signal.can_catch() {
            return Err(SignalError::PermissionDenied(format!(
                "Signal {} cannot be trapped",
                signal
            )));
        }

        // The trap records arrival only; Invoke callbacks run at the next
        // dispatch pass, never inside asynchronous delivery.
        let handler = match &action {
            HandlerAction::Default => SigHandler::SigDfl,
            HandlerAction::Ignore => SigHandler::SigIgn,
            HandlerAction::Invoke(_) => SigHandler::Handler(record_trap),
        };
        Self::install(signal, handler, restart_syscalls)?;

        let disposition = action.disposition();
        let previous = self.actions.insert(signal, action);
        self.adjust_handler_count(
            previous.as_ref().map(HandlerAction::disposition),
            Some(disposition),
        );

        info!(
            "Registered {:?} action for {} (restart_syscalls: {})",
            disposition, signal, restart_syscalls
        );
        Ok(())
    }

    fn registered_action(&self, signal: Signal) -> Option<HandlerAction> {
        self.actions.get(&signal).map(|entry| entry.value().clone())
    }

    fn reset(&self, signal: Signal) -> SignalResult<()> {
        if !signal.can_catch() {
            return Err(SignalError::PermissionDenied(format!(
                "Signal {} cannot be trapped",
                signal
            )));
        }

        Self::install(signal, SigHandler::SigDfl, false)?;
        let previous = self.actions.remove(&signal).map(|(_, action)| action);
        self.adjust_handler_count(previous.as_ref().map(HandlerAction::disposition), None);

        info!("Reset {} to default action", signal);
        Ok(())
    }
}
