/*!
 * Core Module
 * Shared types and the error channel
 */

pub mod errno;
pub mod types;

pub use errno::{describe, last_error_code, DescribeError};
pub use types::{Pid, Priority, RawStatus};
