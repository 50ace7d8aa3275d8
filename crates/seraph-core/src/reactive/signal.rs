//! Signal - The Root Reactive Primitive
//!
//! A [`Signal`] holds a single mutable value and a list of listeners. Writing
//! stores the value and then calls every listener synchronously, in
//! registration order, before `set` returns.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, ObservableExt};
//!
//! let count = Signal::new(0);
//! let _sub = count.watch(|n| println!("count = {}", n));
//! // prints "count = 0"
//!
//! count.set(1);
//! // prints "count = 1"
//!
//! count.update(|n| *n += 1);
//! // prints "count = 2"
//! ```
//!
//! ## Fan-out rules
//!
//! - Listeners are snapshotted before each notification pass. A listener added
//!   during a pass is not called in that pass.
//! - A listener removed during a pass is skipped if it has not run yet.
//! - A panicking listener does not stop the pass. The first panic is re-raised
//!   after every other listener has been called.
//! - Writes nested deeper than [`SignalOptions::max_notify_depth`] are rejected.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use super::observable::{Listener, Observable, Writable};
use super::subscription::Subscription;
use crate::error::{SignalError, SignalResult};
use crate::error_log;

/// Default nesting limit for writes issued from inside listeners.
pub const DEFAULT_MAX_NOTIFY_DEPTH: usize = 64;

/// Per-signal configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalOptions {
	/// How many notification passes may be nested on one signal before a
	/// further write is rejected.
	pub max_notify_depth: usize,
	/// Name used in log lines and errors.
	pub label: Option<&'static str>,
}

impl Default for SignalOptions {
	fn default() -> Self {
		Self {
			max_notify_depth: DEFAULT_MAX_NOTIFY_DEPTH,
			label: None,
		}
	}
}

impl SignalOptions {
	/// Sets the signal label.
	pub fn label(mut self, label: &'static str) -> Self {
		self.label = Some(label);
		self
	}

	/// Sets the nesting limit.
	pub fn max_notify_depth(mut self, depth: usize) -> Self {
		self.max_notify_depth = depth;
		self
	}
}

struct Slot<T> {
	active: Cell<bool>,
	listener: Listener<T>,
}

struct Inner<T> {
	value: RefCell<T>,
	slots: RefCell<Vec<Rc<Slot<T>>>>,
	depth: Cell<usize>,
	options: SignalOptions,
}

/// Decrements the notification depth when a pass ends, even by unwinding.
struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
	fn enter(depth: &'a Cell<usize>) -> Self {
		depth.set(depth.get() + 1);
		Self(depth)
	}
}

impl Drop for DepthGuard<'_> {
	fn drop(&mut self) {
		self.0.set(self.0.get().saturating_sub(1));
	}
}

/// A mutable reactive value.
///
/// Cloning a `Signal` produces another handle to the same value.
pub struct Signal<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Signal<T> {
	/// Creates a signal with default options.
	pub fn new(value: T) -> Self {
		Self::with_options(value, SignalOptions::default())
	}

	/// Creates a signal with explicit options.
	pub fn with_options(value: T, options: SignalOptions) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				slots: RefCell::new(Vec::new()),
				depth: Cell::new(0),
				options,
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T {
		self.inner.value.borrow().clone()
	}

	/// Calls `f` with a snapshot of the current value.
	///
	/// `f` may write to this signal; the write is not visible through the
	/// snapshot.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		let value = self.get();
		f(&value)
	}

	/// Stores a value and notifies every listener.
	///
	/// A rejected write is logged; use [`Signal::try_set`] to observe it.
	pub fn set(&self, value: T) {
		Writable::set(self, value);
	}

	/// Stores a value and notifies every listener.
	///
	/// # Errors
	///
	/// Returns [`SignalError::ReentrantWrite`] if this write happens inside
	/// more nested notification passes than the signal allows. The value is
	/// left untouched in that case.
	pub fn try_set(&self, value: T) -> SignalResult {
		self.check_depth()?;
		self.store(value);
		self.notify();
		Ok(())
	}

	/// Mutates the value in place and notifies listeners.
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		if let Err(_error) = self.try_update(f) {
			error_log!("{}", _error);
		}
	}

	/// Mutates a copy of the value, stores it and notifies listeners.
	///
	/// Writes made to this signal from inside `f` are overwritten by the
	/// mutated copy.
	///
	/// # Errors
	///
	/// Same conditions as [`Signal::try_set`].
	pub fn try_update(&self, f: impl FnOnce(&mut T)) -> SignalResult {
		self.check_depth()?;
		let mut value = self.get();
		f(&mut value);
		self.check_depth()?;
		self.store(value);
		self.notify();
		Ok(())
	}

	/// Stores a value, notifies listeners and returns the previous value.
	///
	/// A rejected write is logged and hands the argument back.
	pub fn replace(&self, value: T) -> T {
		if let Err(_error) = self.check_depth() {
			error_log!("{}", _error);
			return value;
		}
		let previous = self.store(value);
		self.notify();
		previous
	}

	/// Re-emits the current value without changing it.
	pub fn trigger(&self) {
		if let Err(_error) = self.check_depth() {
			error_log!("{}", _error);
			return;
		}
		self.notify();
	}

	/// Number of live listeners.
	pub fn listener_count(&self) -> usize {
		self.inner.slots.borrow().len()
	}

	/// Label configured through [`SignalOptions::label`].
	pub fn label(&self) -> Option<&'static str> {
		self.inner.options.label
	}

	// The old value is dropped by the caller, after the borrow ends.
	fn store(&self, value: T) -> T {
		core::mem::replace(&mut *self.inner.value.borrow_mut(), value)
	}

	fn check_depth(&self) -> SignalResult {
		let depth = self.inner.depth.get();
		if depth >= self.inner.options.max_notify_depth {
			return Err(SignalError::ReentrantWrite {
				depth,
				label: self.inner.options.label.unwrap_or("<unnamed>"),
			});
		}
		Ok(())
	}

	fn notify(&self) {
		let _guard = DepthGuard::enter(&self.inner.depth);
		let value = self.get();
		let slots: Vec<Rc<Slot<T>>> = self.inner.slots.borrow().clone();

		let mut first_panic: Option<Box<dyn Any + Send>> = None;
		for slot in slots {
			if !slot.active.get() {
				continue;
			}
			let listener = Rc::clone(&slot.listener);
			let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(&value)));
			if let Err(payload) = outcome {
				error_log!(
					"listener on signal {} panicked: {}",
					self.inner.options.label.unwrap_or("<unnamed>"),
					panic_message(payload.as_ref())
				);
				if first_panic.is_none() {
					first_panic = Some(payload);
				}
			}
		}

		if let Some(payload) = first_panic {
			drop(_guard);
			panic::resume_unwind(payload);
		}
	}
}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.as_str()
	} else {
		"<non-string panic payload>"
	}
}

impl<T: Clone + 'static> Observable for Signal<T> {
	type Value = T;

	fn current(&self) -> T {
		self.get()
	}

	fn subscribe(&self, listener: Listener<T>) -> Subscription {
		let slot = Rc::new(Slot {
			active: Cell::new(true),
			listener,
		});

		let value = self.get();
		(slot.listener)(&value);

		self.inner.slots.borrow_mut().push(Rc::clone(&slot));

		let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			slot.active.set(false);
			if let Some(inner) = weak.upgrade() {
				inner
					.slots
					.borrow_mut()
					.retain(|other| !Rc::ptr_eq(other, &slot));
			}
		})
	}
}

impl<T: Clone + 'static> Writable for Signal<T> {
	fn try_set(&self, value: T) -> SignalResult {
		Signal::try_set(self, value)
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Default + Clone + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.inner.value.borrow())
			.field("listeners", &self.inner.slots.borrow().len())
			.field("label", &self.inner.options.label)
			.finish()
	}
}
