#![cfg(not(target_arch = "wasm32"))]

//! Integration tests for server-rendered props
//!
//! A server writes `sr-props` with [`props_attribute`], the client reads it
//! back with `load` and hydrates the mount point.

use rstest::rstest;
use serde::{Deserialize, Serialize};
use seraph_pages::prelude::*;
use seraph_pages::ssr::{SsrError, hydrate, load, props_attribute, resource};
use serial_test::serial;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Todo {
	title: String,
	done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TodoProps {
	owner: String,
	todos: Vec<Todo>,
}

fn sample() -> TodoProps {
	TodoProps {
		owner: "Ada \"Countess\" <Lovelace>".to_string(),
		todos: vec![
			Todo {
				title: "write notes".to_string(),
				done: true,
			},
			Todo {
				title: "engine & tables".to_string(),
				done: false,
			},
		],
	}
}

fn unescape(value: &str) -> String {
	value
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&")
}

/// Builds a mount point the way a browser would parse server output.
fn server_mount(id: &str, props: &TodoProps) -> Element {
	let attribute = props_attribute(props).unwrap();
	let quoted = attribute
		.strip_prefix("sr-props=\"")
		.and_then(|rest| rest.strip_suffix('"'))
		.unwrap();

	let target = div().id(id.to_string()).build();
	target.set_attribute("sr-props", &unescape(quoted)).unwrap();
	mount(&target, &document().body().unwrap());
	target
}

fn todo_list(props: Signal<TodoProps>) -> Element {
	let items = props.clone().map(|props: &TodoProps| {
		props
			.todos
			.iter()
			.map(|todo| {
				li()
					.class(if todo.done { "done" } else { "open" })
					.text(todo.title.clone())
					.build()
			})
			.collect::<Vec<_>>()
	});
	ul().children(items).build()
}

#[rstest]
#[serial(dom)]
fn test_props_survive_server_round_trip() {
	document().reset();
	server_mount("todos", &sample());

	assert_eq!(load::<TodoProps>("todos").unwrap().get(), sample());
}

#[rstest]
#[serial(dom)]
fn test_hydrated_list_stays_reactive() {
	document().reset();
	let target = server_mount("todos", &sample());
	let mut props = None;

	let list = hydrate("todos", |signal: Signal<TodoProps>| {
		props = Some(signal.clone());
		todo_list(signal)
	})
	.unwrap();

	assert_eq!(target.child_count(), 1);
	assert_eq!(
		list.to_html(),
		r#"<ul><li class="done">write notes</li><li class="open">engine &amp; tables</li></ul>"#
	);

	let props = props.unwrap();
	props.update(|props| props.todos[1].done = true);
	assert_eq!(list.child_elements()[1].class_name(), "done");
}

#[rstest]
#[serial(dom)]
fn test_resource_from_script_block() {
	document().reset();
	let script = create("template", seraph_pages::Props::new());
	script.set_attribute("id", "initial-data").unwrap();
	script.append_text(r#"[{"title":"a","done":false}]"#);
	mount(&script, &document().body().unwrap());

	let todos = resource::<Vec<Todo>>("initial-data").unwrap();
	assert_eq!(todos.get().len(), 1);
	assert_eq!(todos.get()[0].title, "a");
}

#[rstest]
#[serial(dom)]
fn test_wrong_shape_is_reported() {
	document().reset();
	let target = div().id("todos").build();
	target.set_attribute("sr-props", r#"{"owner":1}"#).unwrap();
	mount(&target, &document().body().unwrap());

	let error = load::<TodoProps>("todos").unwrap_err();
	assert!(matches!(error, SsrError::Json { ref id, .. } if id == "todos"));
	assert!(error.to_string().starts_with("invalid JSON in #todos"));
}
