//! Bindable - Static or Reactive Values
//!
//! Binding APIs accept either a plain value or a signal for every facet.
//! [`Bindable`] makes that choice explicit, and [`IntoBindable`] lets callers
//! pass either form directly.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::reactive::{Bindable, IntoBindable, Signal};
//!
//! let fixed: Bindable<String> = "card".into_bindable();
//! let live: Bindable<String> = Signal::new("card".to_string()).into_bindable();
//!
//! assert!(!fixed.is_reactive());
//! assert!(live.is_reactive());
//! ```

use core::fmt;
use std::rc::Rc;

use super::combine::{All, Zip, ZipSources};
use super::computed::{Computed, computed};
use super::effect::Reducer;
use super::equality::SameValue;
use super::lens::Lens;
use super::memo::Memo;
use super::observable::{Observable, ReadSignal};
use super::signal::Signal;
use super::subscription::Subscription;

/// A value that is either fixed or follows a signal.
pub enum Bindable<T: 'static> {
	/// Applied once.
	Static(T),
	/// Applied now and after every emission.
	Reactive(ReadSignal<T>),
}

impl<T: Clone + 'static> Bindable<T> {
	/// Returns the value right now.
	pub fn current(&self) -> T {
		match self {
			Self::Static(value) => value.clone(),
			Self::Reactive(signal) => signal.current(),
		}
	}

	/// Returns `true` for the `Reactive` variant.
	pub fn is_reactive(&self) -> bool {
		matches!(self, Self::Reactive(_))
	}

	/// Applies `apply` to the value.
	///
	/// Static values are applied once and `None` is returned. Reactive values
	/// are applied immediately and on every emission for as long as the
	/// returned subscription lives.
	pub fn bind<F>(&self, apply: F) -> Option<Subscription>
	where
		F: Fn(&T) + 'static,
	{
		match self {
			Self::Static(value) => {
				apply(value);
				None
			}
			Self::Reactive(signal) => Some(signal.subscribe(Rc::new(apply))),
		}
	}

	/// Transforms the value, keeping it static or reactive.
	pub fn map<K, F>(self, f: F) -> Bindable<K>
	where
		K: Clone + 'static,
		F: Fn(&T) -> K + 'static,
	{
		match self {
			Self::Static(value) => Bindable::Static(f(&value)),
			Self::Reactive(signal) => Bindable::Reactive(ReadSignal::new(computed(signal, f))),
		}
	}
}

impl<T: Clone + 'static> Clone for Bindable<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Static(value) => Self::Static(value.clone()),
			Self::Reactive(signal) => Self::Reactive(signal.clone()),
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Bindable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
			Self::Reactive(signal) => f.debug_tuple("Reactive").field(signal).finish(),
		}
	}
}

impl<T: Default + Clone + 'static> Default for Bindable<T> {
	fn default() -> Self {
		Self::Static(T::default())
	}
}

/// Conversion into a [`Bindable`].
///
/// Every signal type converts into a reactive binding of any type its values
/// convert into. Plain values convert into static bindings.
pub trait IntoBindable<T: 'static> {
	/// Performs the conversion.
	fn into_bindable(self) -> Bindable<T>;
}

impl<T: 'static> IntoBindable<T> for Bindable<T> {
	fn into_bindable(self) -> Bindable<T> {
		self
	}
}

fn reactive<S, T>(source: S) -> Bindable<T>
where
	S: Observable + 'static,
	S::Value: Into<T>,
	T: Clone + 'static,
{
	Bindable::Reactive(ReadSignal::new(computed(source, |value: &S::Value| {
		value.clone().into()
	})))
}

impl<T, U> IntoBindable<U> for Signal<T>
where
	T: Clone + Into<U> + 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, U> IntoBindable<U> for ReadSignal<T>
where
	T: Clone + Into<U> + 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, K, U> IntoBindable<U> for Computed<T, K>
where
	T: Clone + 'static,
	K: Clone + Into<U> + 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, K, U> IntoBindable<U> for Memo<T, K>
where
	T: SameValue + Clone + 'static,
	K: Clone + Into<U> + 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, K, U> IntoBindable<U> for Lens<T, K>
where
	T: Clone + 'static,
	K: Clone + Into<U> + 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, A, U> IntoBindable<U> for Reducer<T, A>
where
	T: Clone + Into<U> + 'static,
	A: 'static,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<S, U> IntoBindable<U> for Zip<S>
where
	S: ZipSources,
	S::Output: Into<U>,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

impl<T, U> IntoBindable<U> for All<T>
where
	T: Clone + 'static,
	std::collections::BTreeMap<String, T>: Into<U>,
	U: Clone + 'static,
{
	fn into_bindable(self) -> Bindable<U> {
		reactive(self)
	}
}

macro_rules! static_bindable {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoBindable<$ty> for $ty {
				fn into_bindable(self) -> Bindable<$ty> {
					Bindable::Static(self)
				}
			}
		)*
	};
}

static_bindable!(
	bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String,
	Option<String>,
);

impl IntoBindable<String> for &str {
	fn into_bindable(self) -> Bindable<String> {
		Bindable::Static(self.to_string())
	}
}

impl IntoBindable<Option<String>> for &str {
	fn into_bindable(self) -> Bindable<Option<String>> {
		Bindable::Static(Some(self.to_string()))
	}
}

impl IntoBindable<Option<String>> for String {
	fn into_bindable(self) -> Bindable<Option<String>> {
		Bindable::Static(Some(self))
	}
}

impl IntoBindable<Option<String>> for Option<&str> {
	fn into_bindable(self) -> Bindable<Option<String>> {
		Bindable::Static(self.map(str::to_string))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::ObservableExt;
	use core::cell::RefCell;
	use rstest::rstest;

	#[rstest]
	fn test_static_binding_applies_once() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let bindable: Bindable<String> = "fixed".into_bindable();

		let subscription = bindable.bind(move |s| sink.borrow_mut().push(s.clone()));

		assert!(subscription.is_none());
		assert_eq!(*seen.borrow(), vec!["fixed".to_string()]);
	}

	#[rstest]
	fn test_reactive_binding_follows_signal() {
		let source = Signal::new("a".to_string());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let bindable: Bindable<String> = source.clone().into_bindable();

		let subscription = bindable.bind(move |s| sink.borrow_mut().push(s.clone()));
		source.set("b".to_string());
		drop(subscription);
		source.set("c".to_string());

		assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
	}

	#[rstest]
	fn test_signal_values_convert_through_into() {
		let source = Signal::new(7_i32);
		let widened: Bindable<i64> = source.clone().into_bindable();

		source.set(8);
		assert_eq!(widened.current(), 8_i64);
	}

	#[rstest]
	fn test_derived_signals_are_bindable() {
		let source = Signal::new(2);
		let doubled: Bindable<i32> = source.clone().map(|n| n * 2).into_bindable();
		let cached: Bindable<i32> = source.clone().memo(|n| n + 1).into_bindable();

		source.set(5);
		assert_eq!(doubled.current(), 10);
		assert_eq!(cached.current(), 6);
		assert!(doubled.is_reactive());
	}

	#[rstest]
	fn test_map_keeps_variant() {
		let fixed = Bindable::Static(3).map(|n| n.to_string());
		assert!(!fixed.is_reactive());
		assert_eq!(fixed.current(), "3");

		let source = Signal::new(3);
		let live = Bindable::Reactive(source.clone().read_only()).map(|n| n * 10);
		source.set(4);
		assert_eq!(live.current(), 40);
	}

	#[rstest]
	fn test_optional_string_conversions() {
		let some: Bindable<Option<String>> = "red".into_bindable();
		let none: Bindable<Option<String>> = None::<&str>.into_bindable();

		assert_eq!(some.current(), Some("red".to_string()));
		assert_eq!(none.current(), None);
	}
}
