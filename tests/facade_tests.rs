#![cfg(not(target_arch = "wasm32"))]

//! Smoke tests for the `seraph` facade re-exports.

use rstest::rstest;
use seraph::prelude::*;

#[rstest]
fn test_prelude_covers_signals_and_elements() {
	let count = Signal::new(1);
	let doubled = from(count.clone(), |n: &i32| n * 2);
	let label = doubled.map(|n: &i32| format!("Doubled: {n}"));

	let view = p().text(label).build();
	count.set(4);

	assert_eq!(view.to_html(), "<p>Doubled: 8</p>");
}

#[rstest]
fn test_module_paths_resolve() {
	let path = seraph::pages::router::compile("/users/:id");
	assert!(path.matches("/users/3").is_matched());

	let signal = seraph::core::reactive::Signal::new("a");
	assert_eq!(signal.get(), "a");
}

#[rstest]
fn test_prelude_covers_template_and_transition() {
	let name = Signal::new("Ada");
	let greeting = s!("Hello, {}", name.clone());
	let saving = transition();

	let view = p().text(greeting).build();
	let guard = saving.begin();
	name.set("Grace");

	assert!(saving.is_pending());
	assert_eq!(view.to_html(), "<p>Hello, Grace</p>");
	drop(guard);
	assert!(!saving.is_pending());
}
