//! Rendering a component into a server-rendered mount point.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use seraph_core::info_log;
use seraph_core::reactive::Signal;

use super::SsrError;
use super::props::{find, parse_custom, parse_json, raw_props};
use crate::dom::{Element, render};

/// Loads the JSON props of element `into`, renders `component` with them and
/// replaces the element's children with the result.
///
/// # Errors
///
/// See [`load`](super::load).
pub fn hydrate<P, C>(into: &str, component: C) -> Result<Element, SsrError>
where
	P: DeserializeOwned + Clone + 'static,
	C: FnOnce(Signal<P>) -> Element,
{
	let target = find(into)?;
	let props = parse_json(into, &raw_props(&target))?;
	Ok(mount_into(into, &target, component(Signal::new(props))))
}

/// Like [`hydrate`] with a custom props parser.
///
/// # Errors
///
/// See [`load_with`](super::load_with).
pub fn hydrate_with<P, E, F, C>(into: &str, parser: F, component: C) -> Result<Element, SsrError>
where
	P: Clone + 'static,
	F: FnOnce(&str) -> Result<P, E>,
	E: Display,
	C: FnOnce(Signal<P>) -> Element,
{
	let target = find(into)?;
	let props = parse_custom(into, &raw_props(&target), parser)?;
	Ok(mount_into(into, &target, component(Signal::new(props))))
}

fn mount_into(_id: &str, target: &Element, child: Element) -> Element {
	render(&child, target);
	info_log!("hydrated #{} with <{}>", _id, child.tag_name());
	child
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::binding::Props;
	use crate::builder::html::{button, div};
	use crate::dom::{document, mount};
	use crate::ssr::PROPS_ATTRIBUTE;
	use rstest::rstest;
	use serde::Deserialize;
	use seraph_core::reactive::ObservableExt;
	use serial_test::serial;

	#[derive(Debug, Clone, Deserialize)]
	struct Counter {
		count: i32,
	}

	fn counter(props: Signal<Counter>) -> Element {
		let label = props.clone().map(|p: &Counter| format!("Count: {}", p.count));
		div()
			.child(button().text(label).on_click(move |_| props.update(|p| p.count += 1)))
			.build()
	}

	fn server_markup(id: &str, props: &str) -> Element {
		let doc = document();
		let target = doc.create_element("section").unwrap();
		target.set_attribute("id", id).unwrap();
		target.set_attribute(PROPS_ATTRIBUTE, props).unwrap();
		target.append_text("server-rendered placeholder");
		mount(&target, &doc.body().unwrap());
		target
	}

	#[rstest]
	#[serial(dom)]
	fn test_hydrate_replaces_server_markup() {
		document().reset();
		let target = server_markup("app", r#"{"count":2}"#);

		let app = hydrate("app", counter).unwrap();

		assert_eq!(target.child_count(), 1);
		assert_eq!(app.text_content(), "Count: 2");
		app.child_elements()[0].click();
		assert_eq!(app.text_content(), "Count: 3");
	}

	#[rstest]
	#[serial(dom)]
	fn test_hydrate_with_parser() {
		document().reset();
		server_markup("app", "7");

		let app = hydrate_with(
			"app",
			|raw| raw.parse::<i32>(),
			|count: Signal<i32>| crate::builder::html::create("p", Props::new().text(count.get().to_string())),
		)
		.unwrap();

		assert_eq!(app.to_html(), "<p>7</p>");
	}

	#[rstest]
	#[serial(dom)]
	fn test_hydrate_missing_target() {
		document().reset();
		let result = hydrate("missing", counter);
		assert!(matches!(result, Err(SsrError::ElementNotFound(_))));
	}
}
