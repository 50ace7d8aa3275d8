//! Deferred tasks
//!
//! [`spawn_deferred`] runs a closure after the current synchronous pass. In
//! the browser it goes through `wasm_bindgen_futures::spawn_local`, so it runs
//! on the next microtask. Elsewhere tasks wait in a thread-local queue until
//! [`run_deferred`] drains it.
//!
//! Navigation triggered while a route is being rendered uses this so the
//! outlet is not re-entered mid-render.
//!
//! [`spawn_transition`] does the same while keeping a
//! [`Transition`] pending until the task has run.

use seraph_core::reactive::Transition;

#[cfg(not(target_arch = "wasm32"))]
use core::cell::RefCell;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::VecDeque;

#[cfg(not(target_arch = "wasm32"))]
type Task = Box<dyn FnOnce() + 'static>;

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
	static QUEUE: RefCell<VecDeque<Task>> = const { RefCell::new(VecDeque::new()) };
}

/// Schedules `task` to run after the current synchronous pass.
#[cfg(target_arch = "wasm32")]
pub fn spawn_deferred<F>(task: F)
where
	F: FnOnce() + 'static,
{
	wasm_bindgen_futures::spawn_local(async move { task() });
}

/// Schedules `task` to run on the next [`run_deferred`] call.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_deferred<F>(task: F)
where
	F: FnOnce() + 'static,
{
	QUEUE.with(|queue| queue.borrow_mut().push_back(Box::new(task)));
}

/// Schedules `task` like [`spawn_deferred`], keeping `transition` pending
/// until it has run.
pub fn spawn_transition<F>(transition: &Transition, task: F)
where
	F: FnOnce() + 'static,
{
	let guard = transition.begin();
	spawn_deferred(move || {
		task();
		drop(guard);
	});
}

/// Runs queued tasks until the queue is empty, including tasks queued by the
/// tasks themselves. Returns how many ran.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_deferred() -> usize {
	let mut ran = 0;
	while let Some(task) = QUEUE.with(|queue| queue.borrow_mut().pop_front()) {
		task();
		ran += 1;
	}
	ran
}

/// Number of tasks waiting in the queue.
#[cfg(not(target_arch = "wasm32"))]
pub fn pending_deferred() -> usize {
	QUEUE.with(|queue| queue.borrow().len())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;
	use seraph_core::reactive::{Signal, transition};
	use serial_test::serial;

	#[rstest]
	#[serial(deferred)]
	fn test_tasks_wait_for_run_deferred() {
		run_deferred();
		let log = Signal::new(Vec::<u8>::new());

		let sink = log.clone();
		spawn_deferred(move || sink.update(|log| log.push(1)));
		assert_eq!(pending_deferred(), 1);
		assert!(log.get().is_empty());

		assert_eq!(run_deferred(), 1);
		assert_eq!(log.get(), vec![1]);
	}

	#[rstest]
	#[serial(deferred)]
	fn test_nested_tasks_run_in_same_drain() {
		run_deferred();
		let log = Signal::new(Vec::<u8>::new());

		let outer = log.clone();
		spawn_deferred(move || {
			outer.update(|log| log.push(1));
			let inner = outer.clone();
			spawn_deferred(move || inner.update(|log| log.push(2)));
		});

		assert_eq!(run_deferred(), 2);
		assert_eq!(log.get(), vec![1, 2]);
	}

	#[rstest]
	#[serial(deferred)]
	fn test_transition_pending_until_task_runs() {
		run_deferred();
		let saving = transition();
		let saved = Signal::new(false);

		let sink = saved.clone();
		spawn_transition(&saving, move || sink.set(true));
		assert!(saving.is_pending());
		assert!(!saved.get());

		run_deferred();
		assert!(!saving.is_pending());
		assert!(saved.get());
	}
}
