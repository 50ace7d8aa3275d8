//! Pending-state tracking for slow actions.
//!
//! A [`Transition`] is a boolean signal that reads `true` while at least one
//! [`TransitionGuard`] is alive. Start work with [`Transition::start`] and
//! keep the guard until the work completes; dropping it (also by unwinding)
//! ends that piece of work.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::transition;
//!
//! let saving = transition();
//! saving.start(|done| {
//!     api::save(form, move |_result| drop(done));
//! });
//! assert!(saving.is_pending());
//! ```

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use super::observable::{Listener, Observable};
use super::signal::Signal;
use super::subscription::Subscription;

/// A boolean signal that is `true` while work is in flight.
#[derive(Clone)]
pub struct Transition {
	pending: Signal<bool>,
	active: Rc<Cell<usize>>,
}

/// Keeps its [`Transition`] pending until dropped.
#[must_use = "the transition ends as soon as the guard is dropped"]
pub struct TransitionGuard {
	pending: Signal<bool>,
	active: Rc<Cell<usize>>,
}

/// Creates an idle transition.
pub fn transition() -> Transition {
	Transition {
		pending: Signal::new(false),
		active: Rc::new(Cell::new(0)),
	}
}

impl Transition {
	/// Whether any work is in flight.
	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}

	/// Marks one piece of work as started.
	///
	/// Only the first of several overlapping guards emits `true`, and only the
	/// last one dropped emits `false`.
	pub fn begin(&self) -> TransitionGuard {
		let previous = self.active.get();
		self.active.set(previous + 1);
		if previous == 0 {
			self.pending.set(true);
		}
		TransitionGuard {
			pending: self.pending.clone(),
			active: Rc::clone(&self.active),
		}
	}

	/// Begins work and hands its guard to `action`.
	///
	/// The transition stays pending for as long as `action` keeps the guard,
	/// typically by moving it into a completion callback.
	pub fn start<F>(&self, action: F)
	where
		F: FnOnce(TransitionGuard),
	{
		action(self.begin());
	}

	/// Runs `action` as a browser task, pending until it resolves.
	#[cfg(target_arch = "wasm32")]
	pub fn start_async<F>(&self, action: F)
	where
		F: core::future::Future<Output = ()> + 'static,
	{
		let guard = self.begin();
		wasm_bindgen_futures::spawn_local(async move {
			action.await;
			drop(guard);
		});
	}
}

impl Drop for TransitionGuard {
	fn drop(&mut self) {
		let remaining = self.active.get().saturating_sub(1);
		self.active.set(remaining);
		if remaining == 0 {
			self.pending.set(false);
		}
	}
}

impl Observable for Transition {
	type Value = bool;

	fn current(&self) -> bool {
		self.pending.get()
	}

	fn subscribe(&self, listener: Listener<bool>) -> Subscription {
		self.pending.subscribe(listener)
	}
}

impl fmt::Debug for Transition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Transition")
			.field("pending", &self.pending.get())
			.field("active", &self.active.get())
			.finish()
	}
}

impl fmt::Debug for TransitionGuard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TransitionGuard").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::ObservableExt;
	use core::cell::RefCell;
	use rstest::rstest;
	use std::panic::{self, AssertUnwindSafe};

	fn record(transition: &Transition) -> (Rc<RefCell<Vec<bool>>>, Subscription) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let sub = transition.watch(move |pending: &bool| sink.borrow_mut().push(*pending));
		(seen, sub)
	}

	#[rstest]
	fn test_synchronous_action_ends_immediately() {
		let loading = transition();
		let (seen, _sub) = record(&loading);

		loading.start(|_done| {});

		assert!(!loading.is_pending());
		assert_eq!(*seen.borrow(), vec![false, true, false]);
	}

	#[rstest]
	fn test_pending_until_guard_dropped() {
		let loading = transition();
		let parked: Rc<RefCell<Option<TransitionGuard>>> = Rc::new(RefCell::new(None));

		let slot = parked.clone();
		loading.start(move |done| *slot.borrow_mut() = Some(done));
		assert!(loading.is_pending());

		drop(parked.borrow_mut().take());
		assert!(!loading.is_pending());
	}

	#[rstest]
	fn test_overlapping_work_emits_once_each_way() {
		let loading = transition();
		let (seen, _sub) = record(&loading);

		let first = loading.begin();
		let second = loading.begin();
		drop(first);
		assert!(loading.is_pending());
		drop(second);

		assert_eq!(*seen.borrow(), vec![false, true, false]);
	}

	#[rstest]
	fn test_panicking_action_still_ends() {
		let loading = transition();

		let result = panic::catch_unwind(AssertUnwindSafe(|| {
			loading.start(|_done| panic!("request failed"));
		}));

		assert!(result.is_err());
		assert!(!loading.is_pending());
	}
}
