//! Browser tests for the DOM binding layer.
//!
//! Run with `wasm-pack test --headless --chrome crates/seraph-pages`.

#![cfg(target_arch = "wasm32")]

use seraph_pages::prelude::*;
use seraph_pages::router::History;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn scratch(id: &str) -> Element {
	let body = document().body().unwrap();
	let root = div().id(id.to_string()).build();
	mount(&root, &body);
	root
}

#[wasm_bindgen_test]
fn test_text_binding_updates_live_node() {
	let root = scratch("text-binding");
	let name = Signal::new("world".to_string());
	let greeting = name.clone().map(|name: &String| format!("Hello, {name}!"));

	mount(&p().text(greeting).build(), &root);
	assert_eq!(root.text_content(), "Hello, world!");

	name.set("seraph".to_string());
	assert_eq!(root.text_content(), "Hello, seraph!");

	unmount(&root);
	assert_eq!(root.child_count(), 0);
}

#[wasm_bindgen_test]
fn test_click_handler_runs() {
	let root = scratch("click-handler");
	let count = Signal::new(0);
	let increment = count.clone();
	let button = button()
		.text("+1")
		.on_click(move |_| increment.update(|n| *n += 1))
		.build();
	mount(&button, &root);

	button.html_element().click();
	button.html_element().click();

	assert_eq!(count.get(), 2);
	unmount(&root);
}

#[wasm_bindgen_test]
fn test_style_and_property_binding() {
	let root = scratch("style-binding");
	let checked = Signal::new(false);
	let color = checked
		.clone()
		.map(|on: &bool| on.then(|| "green".to_string()));
	let field = input()
		.attr("type", "checkbox")
		.attr("checked", checked.clone())
		.style("color", color)
		.build();
	mount(&field, &root);

	assert_eq!(field.style("color"), None);
	checked.set(true);
	assert_eq!(field.style("color").as_deref(), Some("green"));

	unmount(&root);
}

#[wasm_bindgen_test]
fn test_history_tracks_push_state() {
	let history = History::browser().unwrap();
	let before = history.len();

	history.navigate("/seraph-wasm-test", false).unwrap();

	assert_eq!(history.len(), before + 1);
	assert_eq!(history.url().path(), "/seraph-wasm-test");
	history.back();
}
