//! Memo - Cached Derived Signals
//!
//! A [`Memo`] caches its last computed value together with the source value
//! it was computed from. Reads recompute only when the source value changed
//! identity (see [`SameValue`]), and subscribers are not called again for an
//! emission whose source value equals the one they last saw.
//!
//! All subscribers of one memo share the same cache, so an expensive
//! computation runs once per distinct source value no matter how many
//! listeners are attached.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, ObservableExt};
//!
//! let query = Signal::new("rust".to_string());
//! let upper = query.clone().memo(|q| q.to_uppercase());
//!
//! let _sub = upper.watch(|q| println!("{q}")); // prints "RUST"
//! query.set("rust".to_string());                // suppressed
//! query.set("wasm".to_string());                // prints "WASM"
//! ```

use core::cell::RefCell;
use std::rc::Rc;

use super::equality::SameValue;
use super::observable::{Listener, Observable, ReadSignal};
use super::subscription::Subscription;

struct Cache<T, K> {
	input: Option<T>,
	output: Option<K>,
}

type Compute<T, K> = Rc<dyn Fn(&T) -> K>;

/// A read-only signal that caches `compute(source)`.
pub struct Memo<T: 'static, K: 'static> {
	source: ReadSignal<T>,
	compute: Compute<T, K>,
	cache: Rc<RefCell<Cache<T, K>>>,
}

/// Derives a cached signal whose value is `compute(source)`.
pub fn memo<S, K, F>(source: S, compute: F) -> Memo<S::Value, K>
where
	S: Observable + 'static,
	S::Value: SameValue,
	K: Clone + 'static,
	F: Fn(&S::Value) -> K + 'static,
{
	Memo {
		source: ReadSignal::new(source),
		compute: Rc::new(compute),
		cache: Rc::new(RefCell::new(Cache {
			input: None,
			output: None,
		})),
	}
}

fn cached<T, K>(cache: &RefCell<Cache<T, K>>, compute: &Compute<T, K>, input: &T) -> K
where
	T: SameValue + Clone,
	K: Clone,
{
	{
		let cache = cache.borrow();
		if let (Some(previous), Some(output)) = (&cache.input, &cache.output) {
			if previous.same_value(input) {
				return output.clone();
			}
		}
	}

	// The borrow is released so `compute` may read this memo again.
	let output = compute(input);
	let mut cache = cache.borrow_mut();
	cache.input = Some(input.clone());
	cache.output = Some(output.clone());
	output
}

impl<T, K> Memo<T, K>
where
	T: SameValue + Clone + 'static,
	K: Clone + 'static,
{
	/// Alias for [`Observable::current`].
	pub fn get(&self) -> K {
		self.current()
	}
}

impl<T, K> Observable for Memo<T, K>
where
	T: SameValue + Clone + 'static,
	K: Clone + 'static,
{
	type Value = K;

	fn current(&self) -> K {
		cached(&self.cache, &self.compute, &self.source.current())
	}

	fn subscribe(&self, listener: Listener<K>) -> Subscription {
		let cache = Rc::clone(&self.cache);
		let compute = Rc::clone(&self.compute);
		let seen: RefCell<Option<T>> = RefCell::new(None);

		self.source.subscribe(Rc::new(move |input: &T| {
			if seen
				.borrow()
				.as_ref()
				.is_some_and(|previous| previous.same_value(input))
			{
				return;
			}
			*seen.borrow_mut() = Some(input.clone());
			let output = cached(&cache, &compute, input);
			listener(&output);
		}))
	}
}

impl<T: 'static, K: 'static> Clone for Memo<T, K> {
	fn clone(&self) -> Self {
		Self {
			source: self.source.clone(),
			compute: Rc::clone(&self.compute),
			cache: Rc::clone(&self.cache),
		}
	}
}
