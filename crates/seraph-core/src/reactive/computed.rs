//! Computed - Eager Derived Signals
//!
//! A [`Computed`] maps one source through a pure function. It stores nothing:
//! every read recomputes from the source, and every source emission is mapped
//! and forwarded to the subscriber.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, ObservableExt};
//!
//! let count = Signal::new(2);
//! let doubled = count.clone().map(|n| n * 2);
//!
//! assert_eq!(doubled.current(), 4);
//! count.set(5);
//! assert_eq!(doubled.current(), 10);
//! ```

use std::rc::Rc;

use super::observable::{Listener, Observable, ReadSignal};
use super::subscription::Subscription;

/// A read-only signal derived from one source.
pub struct Computed<T: 'static, K: 'static> {
	source: ReadSignal<T>,
	compute: Rc<dyn Fn(&T) -> K>,
}

/// Derives a signal whose value is `compute(source)`.
///
/// The function runs on every read and once per source emission for each
/// subscriber. Use [`memo`](super::memo::memo) when that is too expensive.
pub fn computed<S, K, F>(source: S, compute: F) -> Computed<S::Value, K>
where
	S: Observable + 'static,
	K: Clone + 'static,
	F: Fn(&S::Value) -> K + 'static,
{
	Computed {
		source: ReadSignal::new(source),
		compute: Rc::new(compute),
	}
}

impl<T: Clone + 'static, K: Clone + 'static> Computed<T, K> {
	/// Alias for [`Observable::current`].
	pub fn get(&self) -> K {
		self.current()
	}
}

impl<T: Clone + 'static, K: Clone + 'static> Observable for Computed<T, K> {
	type Value = K;

	fn current(&self) -> K {
		(self.compute)(&self.source.current())
	}

	fn subscribe(&self, listener: Listener<K>) -> Subscription {
		let compute = Rc::clone(&self.compute);
		self.source
			.subscribe(Rc::new(move |value: &T| listener(&compute(value))))
	}
}

impl<T: 'static, K: 'static> Clone for Computed<T, K> {
	fn clone(&self) -> Self {
		Self {
			source: self.source.clone(),
			compute: Rc::clone(&self.compute),
		}
	}
}
