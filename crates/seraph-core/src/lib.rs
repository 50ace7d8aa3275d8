//! # Seraph Core
//!
//! Platform-independent reactive primitives for the Seraph library.
//!
//! - [`reactive`]: signals, subscriptions and the derivation combinators
//! - [`logging`]: `debug_log!`, `info_log!`, `warn_log!`, `error_log!`
//! - [`s!`]: string templates over signals
//! - [`error`]: error types shared by writable signals
//!
//! The DOM binding layer and the router live in `seraph-pages`; this crate
//! knows nothing about the browser.

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod reactive;

pub use error::{SignalError, SignalResult};
pub use reactive::{
	All, Bindable, Computed, IntoBindable, Lens, Listener, Memo, Observable, ObservableExt,
	ReadSignal, Reducer, SameValue, Signal, SignalOptions, Subscription, Transition,
	TransitionGuard, Writable, Zip, all, computed, derive, effect, memo, transition, zip,
};

/// Commonly used items in one import.
pub mod prelude {
	pub use crate::reactive::{
		Bindable, IntoBindable, Observable, ObservableExt, ReadSignal, Signal, Subscription,
		Writable, all, computed, derive, effect, memo, transition, zip,
	};
	pub use crate::s;
}

#[doc(hidden)]
pub mod __private {
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
