//! Error types for the reactive core.

use thiserror::Error;

/// Errors raised by writable signals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
	/// A write arrived while the signal was already notifying at its maximum
	/// nesting depth. This almost always means a listener writes back into
	/// its own source unconditionally.
	#[error("re-entrant write rejected on signal {label} at notification depth {depth}")]
	ReentrantWrite {
		/// Nesting depth at which the write was rejected.
		depth: usize,
		/// Debug label of the signal, `"<unnamed>"` when none was set.
		label: &'static str,
	},
}

/// Result alias for signal writes.
pub type SignalResult<T = ()> = Result<T, SignalError>;
