/*!
 * Signals Module
 * Registration, deferred dispatch, and masking of UNIX signals
 */

mod dispatch;
pub mod mask;
mod pending;
mod registry;
pub mod traits;
pub mod types;

// Re-export public API
pub use mask::{blocked_signals, set_mask, wait_for_signal, wait_for_signal_timed, MaskHow};
pub use pending::PendingSet;
pub use registry::SignalControl;
pub use traits::*;
pub use types::{
    HandlerAction, HandlerDisposition, HandlerFn, Signal, SignalError, SignalInfo, SignalResult,
    SignalStats,
};
