//! # Seraph
//!
//! A minimal reactive state library with DOM bindings and a client-side
//! router, for Rust compiled to WebAssembly.
//!
//! ## Feature Flags
//!
//! - `core` - signals, derivation combinators and reducers ([`core`])
//! - `pages` (default) - DOM binding, element builder, router and SSR props
//!   ([`pages`]); implies `core`
//! - `debug-hooks` - verbose `debug_log!` output for subscriptions and bindings
//! - `console_error_panic_hook` - readable panics in the browser console,
//!   installed by [`pages::init`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use seraph::prelude::*;
//!
//! let count = Signal::new(0);
//! let doubled = from(count.clone(), |n| n * 2);
//!
//! let app = div()
//!     .child(p().text(doubled.map(|n| format!("Doubled: {n}"))))
//!     .child(button().text("+1").on_click(move |_| count.update(|n| *n += 1)))
//!     .build();
//!
//! mount(&app, &document().body()?);
//! ```

#![warn(missing_docs)]

#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "core")]
pub use seraph_core::{
	Bindable, Computed, IntoBindable, Memo, Observable, ObservableExt, ReadSignal, Reducer, Signal,
	SignalError, Subscription, Transition, Writable, all, computed, debug_log, derive, effect,
	error_log, info_log, memo, s, transition, warn_log, zip,
};
#[cfg(feature = "core")]
pub use seraph_core::reactive::from;

#[cfg(feature = "pages")]
pub use seraph_pages::{
	Component, Element, Props, Router, Routes, document, hydrate, init, load, mount, render,
	unmount,
};

/// Everything needed to write an app in one import.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use seraph_core::prelude::*;
	#[cfg(feature = "core")]
	pub use seraph_core::reactive::from;
	#[cfg(feature = "pages")]
	pub use seraph_pages::prelude::*;
}
