//! Observable - The Shared Signal Contract
//!
//! Every reactive value in Seraph, root or derived, implements [`Observable`]:
//! it can be read (`current`) and subscribed to (`subscribe`). Signals that
//! accept writes additionally implement [`Writable`].
//!
//! Subscribing always replays the current value to the new listener before
//! `subscribe` returns, then delivers every later emission synchronously.

use core::fmt;
use std::rc::Rc;

use super::computed::{Computed, computed};
use super::equality::SameValue;
use super::memo::{Memo, memo};
use super::subscription::Subscription;
use crate::error::SignalResult;

/// A listener receives each emitted value by reference.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// A readable, subscribable reactive value.
pub trait Observable {
	/// The value type emitted to listeners.
	type Value: Clone + 'static;

	/// Returns the current value.
	///
	/// Derived signals compute it from their sources at read time.
	fn current(&self) -> Self::Value;

	/// Registers a listener.
	///
	/// The listener is invoked once with the current value before this call
	/// returns, then on every subsequent emission.
	fn subscribe(&self, listener: Listener<Self::Value>) -> Subscription;
}

/// An observable that accepts writes.
pub trait Writable: Observable {
	/// Writes a new value and notifies listeners synchronously.
	///
	/// # Errors
	///
	/// Returns [`SignalError::ReentrantWrite`](crate::SignalError::ReentrantWrite)
	/// when the write would exceed the source's nesting limit.
	fn try_set(&self, value: Self::Value) -> SignalResult;

	/// Writes a new value, logging instead of returning a rejected write.
	fn set(&self, value: Self::Value) {
		if let Err(_error) = self.try_set(value) {
			crate::error_log!("{}", _error);
		}
	}
}

/// Convenience methods available on every observable.
pub trait ObservableExt: Observable + Sized + 'static {
	/// Subscribes a closure without wrapping it in an `Rc` first.
	fn watch<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&Self::Value) + 'static,
	{
		self.subscribe(Rc::new(listener))
	}

	/// Derives an eager, uncached signal. See [`computed`].
	fn map<K, F>(self, compute: F) -> Computed<Self::Value, K>
	where
		K: Clone + 'static,
		F: Fn(&Self::Value) -> K + 'static,
	{
		computed(self, compute)
	}

	/// Derives a cached signal. See [`memo`].
	fn memo<K, F>(self, compute: F) -> Memo<Self::Value, K>
	where
		Self::Value: SameValue,
		K: Clone + 'static,
		F: Fn(&Self::Value) -> K + 'static,
	{
		memo(self, compute)
	}

	/// Erases the concrete signal type.
	fn read_only(self) -> ReadSignal<Self::Value> {
		ReadSignal::new(self)
	}
}

impl<S> ObservableExt for S where S: Observable + 'static {}

/// A cloneable, type-erased handle to any observable.
pub struct ReadSignal<T: 'static> {
	inner: Rc<dyn Observable<Value = T>>,
}

impl<T: Clone + 'static> ReadSignal<T> {
	/// Wraps any observable producing `T`.
	pub fn new<S>(source: S) -> Self
	where
		S: Observable<Value = T> + 'static,
	{
		Self {
			inner: Rc::new(source),
		}
	}

	/// Alias for [`Observable::current`].
	pub fn get(&self) -> T {
		self.inner.current()
	}
}

impl<T: 'static> Clone for ReadSignal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Clone + 'static> Observable for ReadSignal<T> {
	type Value = T;

	fn current(&self) -> T {
		self.inner.current()
	}

	fn subscribe(&self, listener: Listener<T>) -> Subscription {
		self.inner.subscribe(listener)
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for ReadSignal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReadSignal")
			.field("current", &self.current())
			.finish()
	}
}
