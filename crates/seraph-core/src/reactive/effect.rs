//! Effects and reducers.
//!
//! [`effect`] runs a side effect now and after every emission of a source.
//! [`Reducer`] is a signal whose writes go through a reducer function.

use core::fmt;
use std::rc::Rc;

use super::observable::{Listener, Observable};
use super::signal::Signal;
use super::subscription::Subscription;

/// Runs `f` with the current value of `source`, then on every emission.
///
/// The effect stays registered while the returned handle is alive.
///
/// # Example
///
/// ```ignore
/// let title = Signal::new("Home".to_string());
/// let _effect = effect(title.clone(), |t| set_document_title(t));
/// ```
pub fn effect<S, F>(source: S, f: F) -> Subscription
where
	S: Observable,
	F: Fn(&S::Value) + 'static,
{
	source.subscribe(Rc::new(f))
}

/// State that changes only by dispatching actions.
///
/// # Example
///
/// ```ignore
/// enum Action { Increment, Reset }
///
/// let counter = Reducer::new(|n: &i32, action: Action| match action {
///     Action::Increment => n + 1,
///     Action::Reset => 0,
/// }, 0);
///
/// counter.dispatch(Action::Increment);
/// assert_eq!(counter.current(), 1);
/// ```
pub struct Reducer<T: 'static, A: 'static> {
	state: Signal<T>,
	reducer: Rc<dyn Fn(&T, A) -> T>,
}

impl<T: Clone + 'static, A: 'static> Reducer<T, A> {
	/// Creates a reducer with an initial state.
	pub fn new<F>(reducer: F, initial: T) -> Self
	where
		F: Fn(&T, A) -> T + 'static,
	{
		Self {
			state: Signal::new(initial),
			reducer: Rc::new(reducer),
		}
	}

	/// Applies `action` to the current state and stores the result.
	///
	/// The reducer sees a snapshot, so it may trigger further dispatches.
	pub fn dispatch(&self, action: A) {
		let state = self.state.get();
		let next = (self.reducer)(&state, action);
		self.state.set(next);
	}

	/// Returns the current state.
	pub fn get(&self) -> T {
		self.state.get()
	}

	/// A callback that dispatches its argument, for event handlers.
	pub fn dispatcher(&self) -> Rc<dyn Fn(A)> {
		let this = self.clone();
		Rc::new(move |action| this.dispatch(action))
	}
}

impl<T: Clone + 'static, A: 'static> Observable for Reducer<T, A> {
	type Value = T;

	fn current(&self) -> T {
		self.state.get()
	}

	fn subscribe(&self, listener: Listener<T>) -> Subscription {
		self.state.subscribe(listener)
	}
}

impl<T: 'static, A: 'static> Clone for Reducer<T, A> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
			reducer: Rc::clone(&self.reducer),
		}
	}
}

impl<T: fmt::Debug + 'static, A: 'static> fmt::Debug for Reducer<T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reducer").field("state", &self.state).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::ObservableExt;
	use core::cell::RefCell;
	use rstest::rstest;

	enum Action {
		Add(i32),
		Reset,
	}

	fn counter() -> Reducer<i32, Action> {
		Reducer::new(
			|n: &i32, action| match action {
				Action::Add(by) => n + by,
				Action::Reset => 0,
			},
			0,
		)
	}

	#[rstest]
	fn test_effect_runs_immediately_and_on_change() {
		let source = Signal::new(1);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();

		let handle = effect(source.clone(), move |n| sink.borrow_mut().push(*n));
		source.set(2);
		drop(handle);
		source.set(3);

		assert_eq!(*seen.borrow(), vec![1, 2]);
	}

	#[rstest]
	fn test_reducer_dispatch() {
		let state = counter();
		state.dispatch(Action::Add(5));
		state.dispatch(Action::Add(2));
		assert_eq!(state.get(), 7);

		state.dispatch(Action::Reset);
		assert_eq!(state.current(), 0);
	}

	#[rstest]
	fn test_reducer_nested_dispatch() {
		let slot: Rc<RefCell<Option<Reducer<i32, i32>>>> = Rc::new(RefCell::new(None));
		let audit = Signal::new(0);

		let handle = slot.clone();
		let _reset = audit.watch(move |by| {
			if *by > 0 {
				if let Some(state) = handle.borrow().as_ref() {
					state.dispatch(0);
				}
			}
		});

		let log = audit.clone();
		let state = Reducer::new(
			move |n: &i32, by: i32| {
				if by > 0 {
					log.set(by);
				}
				n + by
			},
			1,
		);
		*slot.borrow_mut() = Some(state.clone());

		state.dispatch(5);

		assert_eq!(state.get(), 6);
		assert_eq!(audit.get(), 5);
	}

	#[rstest]
	fn test_reducer_notifies_subscribers() {
		let state = counter();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let _sub = effect(state.clone(), move |n| sink.borrow_mut().push(*n));

		let dispatch = state.dispatcher();
		dispatch(Action::Add(3));

		assert_eq!(*seen.borrow(), vec![0, 3]);
	}
}
