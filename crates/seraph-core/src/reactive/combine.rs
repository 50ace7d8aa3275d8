//! Multi-source combinators: [`zip`] and [`all`].
//!
//! Both read every source freshly on `current()`. A subscriber receives one
//! initial emission when it subscribes, then one complete, freshly read
//! tuple (or record) each time any single source emits. Emissions from
//! different sources are never coalesced.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Signal, zip, all};
//!
//! let first = Signal::new("Ada".to_string());
//! let age = Signal::new(36);
//!
//! let pair = zip((first.clone(), age.clone()));
//! assert_eq!(pair.current(), ("Ada".to_string(), 36));
//!
//! let record = all([("x", Signal::new(1)), ("y", Signal::new(2))]);
//! assert_eq!(record.current()["y"], 2);
//! ```

use core::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::observable::{Listener, Observable, ReadSignal};
use super::subscription::Subscription;

/// A fixed group of sources that can be read and watched together.
///
/// Implemented for tuples of two to six observables and for `Vec<S>`.
pub trait ZipSources: Clone + 'static {
	/// Combined value, one element per source.
	type Output: Clone + 'static;

	/// Reads every source.
	fn read_all(&self) -> Self::Output;

	/// Subscribes `notify` to every source, returning one handle per source.
	fn watch_each(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription>;
}

fn forward<V>(notify: &Rc<dyn Fn()>) -> Listener<V> {
	let notify = Rc::clone(notify);
	Rc::new(move |_: &V| notify())
}

macro_rules! zip_tuple {
	($($name:ident : $idx:tt),+) => {
		impl<$($name),+> ZipSources for ($($name,)+)
		where
			$($name: Observable + Clone + 'static,)+
		{
			type Output = ($($name::Value,)+);

			fn read_all(&self) -> Self::Output {
				($(self.$idx.current(),)+)
			}

			fn watch_each(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription> {
				vec![$(self.$idx.subscribe(forward::<$name::Value>(&notify)),)+]
			}
		}
	};
}

zip_tuple!(A: 0, B: 1);
zip_tuple!(A: 0, B: 1, C: 2);
zip_tuple!(A: 0, B: 1, C: 2, D: 3);
zip_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
zip_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

impl<S> ZipSources for Vec<S>
where
	S: Observable + Clone + 'static,
{
	type Output = Vec<S::Value>;

	fn read_all(&self) -> Self::Output {
		self.iter().map(Observable::current).collect()
	}

	fn watch_each(&self, notify: Rc<dyn Fn()>) -> Vec<Subscription> {
		self.iter()
			.map(|source| source.subscribe(forward::<S::Value>(&notify)))
			.collect()
	}
}

/// Subscribes `listener` to a group of sources with a single initial replay.
fn subscribe_group<O: 'static>(
	read: Rc<dyn Fn() -> O>,
	watch: impl FnOnce(Rc<dyn Fn()>) -> Vec<Subscription>,
	listener: Listener<O>,
) -> Subscription {
	let ready = Rc::new(Cell::new(false));

	let notify: Rc<dyn Fn()> = {
		let ready = Rc::clone(&ready);
		let read = Rc::clone(&read);
		let listener = Rc::clone(&listener);
		Rc::new(move || {
			if ready.get() {
				listener(&read());
			}
		})
	};

	let subscriptions = watch(notify);
	ready.set(true);
	listener(&read());

	Subscription::merge(subscriptions)
}

/// Combines several sources into one tuple-valued signal.
#[derive(Clone)]
pub struct Zip<S> {
	sources: S,
}

/// Zips a tuple (or `Vec`) of observables.
pub fn zip<S: ZipSources>(sources: S) -> Zip<S> {
	Zip { sources }
}

impl<S: ZipSources> Zip<S> {
	/// Alias for [`Observable::current`].
	pub fn get(&self) -> S::Output {
		self.sources.read_all()
	}
}

impl<S: ZipSources> Observable for Zip<S> {
	type Value = S::Output;

	fn current(&self) -> S::Output {
		self.sources.read_all()
	}

	fn subscribe(&self, listener: Listener<S::Output>) -> Subscription {
		let sources = self.sources.clone();
		let read: Rc<dyn Fn() -> S::Output> = Rc::new(move || sources.read_all());
		subscribe_group(read, |notify| self.sources.watch_each(notify), listener)
	}
}

/// Combines keyed sources of one value type into a record signal.
pub struct All<T: 'static> {
	entries: Rc<BTreeMap<String, ReadSignal<T>>>,
}

/// Builds a record signal from `(key, source)` pairs.
///
/// Keys are kept sorted; a repeated key keeps the last source given for it
/// and the earlier ones are never subscribed to.
pub fn all<I, K, S>(entries: I) -> All<S::Value>
where
	I: IntoIterator<Item = (K, S)>,
	K: Into<String>,
	S: Observable + 'static,
{
	All {
		entries: Rc::new(
			entries
				.into_iter()
				.map(|(key, source)| (key.into(), ReadSignal::new(source)))
				.collect(),
		),
	}
}

fn read_record<T: Clone + 'static>(entries: &BTreeMap<String, ReadSignal<T>>) -> BTreeMap<String, T> {
	entries
		.iter()
		.map(|(key, source)| (key.clone(), source.current()))
		.collect()
}

impl<T: Clone + 'static> All<T> {
	/// Alias for [`Observable::current`].
	pub fn get(&self) -> BTreeMap<String, T> {
		read_record(&self.entries)
	}

	/// Keys in iteration order of the record.
	pub fn keys(&self) -> Vec<String> {
		self.entries.keys().cloned().collect()
	}
}

impl<T: Clone + 'static> Observable for All<T> {
	type Value = BTreeMap<String, T>;

	fn current(&self) -> Self::Value {
		read_record(&self.entries)
	}

	fn subscribe(&self, listener: Listener<Self::Value>) -> Subscription {
		let entries = Rc::clone(&self.entries);
		let read: Rc<dyn Fn() -> Self::Value> = Rc::new(move || read_record(&entries));
		subscribe_group(
			read,
			|notify| {
				self.entries
					.values()
					.map(|source| source.subscribe(forward::<T>(&notify)))
					.collect()
			},
			listener,
		)
	}
}

impl<T: 'static> Clone for All<T> {
	fn clone(&self) -> Self {
		Self {
			entries: Rc::clone(&self.entries),
		}
	}
}
