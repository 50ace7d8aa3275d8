//! Lens - Two-way Derived Signals
//!
//! [`derive`] focuses a writable source through a `get`/`set` pair. Reading
//! projects the source value; writing builds a new source value from the
//! written one and the source's current value, then writes it to the source.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, Writable, derive};
//!
//! #[derive(Clone)]
//! struct Form { email: String, remember: bool }
//!
//! let form = Signal::new(Form { email: String::new(), remember: false });
//! let email = derive(
//!     form.clone(),
//!     |f: &Form| f.email.clone(),
//!     |email: String, f: &Form| Form { email, ..f.clone() },
//! );
//!
//! email.set("ada@example.com".to_string());
//! assert_eq!(form.get().email, "ada@example.com");
//! ```

use std::rc::Rc;

use super::observable::{Listener, Observable, Writable};
use super::subscription::Subscription;
use crate::error::SignalResult;

/// A writable view onto part of another writable signal.
pub struct Lens<T: 'static, K: 'static> {
	source: Rc<dyn Writable<Value = T>>,
	get: Rc<dyn Fn(&T) -> K>,
	set: Rc<dyn Fn(K, &T) -> T>,
}

/// Derives a two-way signal from a writable source.
///
/// `set` receives the written value and the source's current value and
/// returns the next source value. Nothing checks that `get` and `set` are
/// inverses of each other.
pub fn derive<S, K, G, W>(source: S, get: G, set: W) -> Lens<S::Value, K>
where
	S: Writable + 'static,
	K: Clone + 'static,
	G: Fn(&S::Value) -> K + 'static,
	W: Fn(K, &S::Value) -> S::Value + 'static,
{
	Lens {
		source: Rc::new(source),
		get: Rc::new(get),
		set: Rc::new(set),
	}
}

impl<T: Clone + 'static, K: Clone + 'static> Lens<T, K> {
	/// Alias for [`Observable::current`].
	pub fn get(&self) -> K {
		self.current()
	}

	/// Alias for [`Writable::set`].
	pub fn set(&self, value: K) {
		Writable::set(self, value);
	}
}

impl<T: Clone + 'static, K: Clone + 'static> Observable for Lens<T, K> {
	type Value = K;

	fn current(&self) -> K {
		(self.get)(&self.source.current())
	}

	fn subscribe(&self, listener: Listener<K>) -> Subscription {
		let get = Rc::clone(&self.get);
		self.source
			.subscribe(Rc::new(move |value: &T| listener(&get(value))))
	}
}

impl<T: Clone + 'static, K: Clone + 'static> Writable for Lens<T, K> {
	fn try_set(&self, value: K) -> SignalResult {
		let next = (self.set)(value, &self.source.current());
		self.source.try_set(next)
	}
}

impl<T: 'static, K: 'static> Clone for Lens<T, K> {
	fn clone(&self) -> Self {
		Self {
			source: Rc::clone(&self.source),
			get: Rc::clone(&self.get),
			set: Rc::clone(&self.set),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{ObservableExt, Signal};
	use core::cell::RefCell;
	use rstest::rstest;

	#[derive(Debug, Clone, PartialEq)]
	struct Point {
		x: i32,
		y: i32,
	}

	fn x_of(source: &Signal<Point>) -> Lens<Point, i32> {
		derive(source.clone(), |p: &Point| p.x, |x, p: &Point| Point { x, ..p.clone() })
	}

	#[rstest]
	fn test_lens_reads_projection() {
		let point = Signal::new(Point { x: 1, y: 2 });
		assert_eq!(x_of(&point).get(), 1);
	}

	#[rstest]
	fn test_lens_write_updates_source() {
		let point = Signal::new(Point { x: 1, y: 2 });
		let x = x_of(&point);

		x.set(9);

		assert_eq!(point.get(), Point { x: 9, y: 2 });
		assert_eq!(x.get(), 9);
	}

	#[rstest]
	fn test_lens_emits_on_any_source_write() {
		let point = Signal::new(Point { x: 1, y: 2 });
		let x = x_of(&point);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let _sub = x.watch(move |n| sink.borrow_mut().push(*n));

		point.update(|p| p.y = 5);
		x.set(3);

		assert_eq!(*seen.borrow(), vec![1, 1, 3]);
	}

	#[rstest]
	fn test_lens_of_lens() {
		let point = Signal::new(Point { x: 4, y: 0 });
		let x = x_of(&point);
		let label = derive(
			x.clone(),
			|n: &i32| n.to_string(),
			|s: String, current: &i32| s.parse().unwrap_or(*current),
		);

		label.set("12".to_string());
		assert_eq!(point.get().x, 12);

		label.set("oops".to_string());
		assert_eq!(point.get().x, 12);
	}
}
