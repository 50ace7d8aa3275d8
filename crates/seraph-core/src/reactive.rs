//! Reactive core: signals and derivation combinators.
//!
//! - [`Signal`]: mutable root value with synchronous fan-out
//! - [`computed`] / [`memo`]: single-source derived signals
//! - [`zip`] / [`all`]: multi-source derived signals
//! - [`derive`]: two-way lens onto a writable signal
//! - [`Bindable`]: a value that may be static or reactive
//! - [`transition`]: a pending flag for slow actions
//! - [`s!`](crate::s): string templates over signals
//!
//! Everything here is single-threaded (`!Send`). Notification is synchronous
//! and re-entrant: a listener may write to any signal, including its own
//! source, and the nested pass completes before the outer write returns.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, ObservableExt};
//!
//! let count = Signal::new(0);
//! let doubled = count.clone().map(|n| n * 2);
//!
//! let _sub = doubled.watch(|n| println!("{n}")); // prints 0
//! count.set(5);                                 // prints 10
//! ```

mod bindable;
mod combine;
mod computed;
mod effect;
mod equality;
mod lens;
mod memo;
mod observable;
mod signal;
mod subscription;
mod template;
mod transition;

pub use bindable::{Bindable, IntoBindable};
pub use combine::{All, Zip, ZipSources, all, zip};
pub use computed::{Computed, computed};
pub use effect::{Reducer, effect};
pub use equality::SameValue;
pub use lens::{Lens, derive};
pub use memo::{Memo, memo};
pub use observable::{Listener, Observable, ObservableExt, ReadSignal, Writable};
pub use signal::{DEFAULT_MAX_NOTIFY_DEPTH, Signal, SignalOptions};
pub use subscription::Subscription;
pub use transition::{Transition, TransitionGuard, transition};

/// Alias of [`computed`] under its short name.
pub use computed::computed as from;
