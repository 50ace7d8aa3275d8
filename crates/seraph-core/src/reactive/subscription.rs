//! Subscription - Listener Registration Handle
//!
//! Every `subscribe` call hands back a `Subscription`. Dropping it or calling
//! [`Subscription::unsubscribe`] removes the listener from its source exactly
//! once; repeated calls are no-ops and never touch other listeners.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{ObservableExt, Signal};
//!
//! let count = Signal::new(0);
//! let subscription = count.watch(|n| println!("count = {n}"));
//!
//! count.set(1); // prints "count = 1"
//! subscription.unsubscribe();
//! subscription.unsubscribe(); // no-op
//! count.set(2); // prints nothing
//! ```

use core::cell::RefCell;
use core::fmt;

type Cancel = Box<dyn FnOnce() + 'static>;

/// Handle to a registered listener.
///
/// The handle owns the registration: dropping it unsubscribes. Use
/// [`Subscription::detach`] to keep the listener alive for as long as the
/// source itself lives.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
	cancel: RefCell<Option<Cancel>>,
}

impl Subscription {
	/// Wraps a cancellation closure that deregisters the listener.
	pub fn new<F>(cancel: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			cancel: RefCell::new(Some(Box::new(cancel))),
		}
	}

	/// A subscription with nothing to release.
	///
	/// Returned when a static value was applied instead of a signal.
	pub fn empty() -> Self {
		Self {
			cancel: RefCell::new(None),
		}
	}

	/// Groups several subscriptions so they are released together.
	pub fn merge<I>(subscriptions: I) -> Self
	where
		I: IntoIterator<Item = Subscription>,
	{
		let subscriptions: Vec<Subscription> = subscriptions.into_iter().collect();
		Self::new(move || {
			for subscription in &subscriptions {
				subscription.unsubscribe();
			}
		})
	}

	/// Removes the listener from its source.
	///
	/// Idempotent: only the first call has an effect.
	pub fn unsubscribe(&self) {
		// Release the borrow before running the closure, it may re-enter.
		let cancel = self.cancel.borrow_mut().take();
		if let Some(cancel) = cancel {
			cancel();
		}
	}

	/// Returns `true` until the subscription has been released.
	pub fn is_active(&self) -> bool {
		self.cancel.borrow().is_some()
	}

	/// Keeps the listener registered for the lifetime of its source.
	///
	/// The cancellation handle is leaked on purpose, so grouped child
	/// subscriptions are not released either.
	pub fn detach(self) {
		if let Some(cancel) = self.cancel.borrow_mut().take() {
			core::mem::forget(cancel);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.unsubscribe();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.is_active())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use core::cell::Cell;
	use rstest::rstest;
	use std::rc::Rc;

	fn counting() -> (Rc<Cell<usize>>, Subscription) {
		let calls = Rc::new(Cell::new(0));
		let calls_clone = calls.clone();
		let subscription = Subscription::new(move || calls_clone.set(calls_clone.get() + 1));
		(calls, subscription)
	}

	#[rstest]
	fn test_unsubscribe_runs_once() {
		let (calls, subscription) = counting();

		subscription.unsubscribe();
		subscription.unsubscribe();

		assert_eq!(calls.get(), 1);
		assert!(!subscription.is_active());
	}

	#[rstest]
	fn test_drop_unsubscribes() {
		let (calls, subscription) = counting();
		drop(subscription);
		assert_eq!(calls.get(), 1);
	}

	#[rstest]
	fn test_drop_after_unsubscribe_is_noop() {
		let (calls, subscription) = counting();
		subscription.unsubscribe();
		drop(subscription);
		assert_eq!(calls.get(), 1);
	}

	#[rstest]
	fn test_detach_never_cancels() {
		let (calls, subscription) = counting();
		subscription.detach();
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_merge_releases_all() {
		let (first_calls, first) = counting();
		let (second_calls, second) = counting();

		let merged = Subscription::merge([first, second]);
		assert!(merged.is_active());

		merged.unsubscribe();
		assert_eq!(first_calls.get(), 1);
		assert_eq!(second_calls.get(), 1);
	}

	#[rstest]
	fn test_empty_is_inactive() {
		let subscription = Subscription::empty();
		assert!(!subscription.is_active());
		subscription.unsubscribe();
	}
}
