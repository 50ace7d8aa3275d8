//! Reading and writing `sr-props`.

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;
use seraph_core::reactive::Signal;
use seraph_core::warn_log;

use super::SsrError;
use crate::dom::{Element, document, escape_attribute};

/// Attribute holding a mount point's serialized props.
pub const PROPS_ATTRIBUTE: &str = "sr-props";

pub(super) fn find(id: &str) -> Result<Element, SsrError> {
	document().get_element_by_id(id).ok_or_else(|| {
		warn_log!("no element #{} to load data from", id);
		SsrError::ElementNotFound(id.to_string())
	})
}

/// Raw `sr-props` of `element`, `"{}"` when absent.
pub(super) fn raw_props(element: &Element) -> String {
	element
		.attribute(PROPS_ATTRIBUTE)
		.unwrap_or_else(|| "{}".to_string())
}

pub(super) fn parse_json<P: DeserializeOwned>(id: &str, raw: &str) -> Result<P, SsrError> {
	serde_json::from_str(raw).map_err(|source| {
		warn_log!("invalid JSON in #{}: {}", id, source);
		SsrError::Json {
			id: id.to_string(),
			source,
		}
	})
}

pub(super) fn parse_custom<P, E, F>(id: &str, raw: &str, parser: F) -> Result<P, SsrError>
where
	F: FnOnce(&str) -> Result<P, E>,
	E: Display,
{
	parser(raw).map_err(|error| {
		warn_log!("cannot parse data of #{}: {}", id, error);
		SsrError::Parse {
			id: id.to_string(),
			message: error.to_string(),
		}
	})
}

/// Loads the JSON props of element `id` into a signal.
///
/// A missing `sr-props` attribute reads as `{}`.
///
/// # Errors
///
/// Returns [`SsrError::ElementNotFound`] if there is no such element and
/// [`SsrError::Json`] if the props do not decode into `P`.
pub fn load<P>(id: &str) -> Result<Signal<P>, SsrError>
where
	P: DeserializeOwned + Clone + 'static,
{
	let element = find(id)?;
	parse_json(id, &raw_props(&element)).map(Signal::new)
}

/// Loads the props of element `id` with a custom parser.
///
/// # Errors
///
/// Returns [`SsrError::ElementNotFound`] if there is no such element and
/// [`SsrError::Parse`] if `parser` fails.
pub fn load_with<P, E, F>(id: &str, parser: F) -> Result<Signal<P>, SsrError>
where
	P: Clone + 'static,
	F: FnOnce(&str) -> Result<P, E>,
	E: Display,
{
	let element = find(id)?;
	parse_custom(id, &raw_props(&element), parser).map(Signal::new)
}

/// Loads JSON from the text content of element `id`, typically a
/// `<script type="application/json">` block.
///
/// # Errors
///
/// Same as [`load`].
pub fn resource<R>(id: &str) -> Result<Signal<R>, SsrError>
where
	R: DeserializeOwned + Clone + 'static,
{
	let element = find(id)?;
	parse_json(id, &element.text_content()).map(Signal::new)
}

/// Loads the text content of element `id` with a custom parser.
///
/// # Errors
///
/// Same as [`load_with`].
pub fn resource_with<R, E, F>(id: &str, parser: F) -> Result<Signal<R>, SsrError>
where
	R: Clone + 'static,
	F: FnOnce(&str) -> Result<R, E>,
	E: Display,
{
	let element = find(id)?;
	parse_custom(id, &element.text_content(), parser).map(Signal::new)
}

/// Renders `props` as an escaped `sr-props="…"` attribute for server output.
///
/// # Errors
///
/// Returns [`SsrError::Serialize`] if `props` cannot be serialized.
pub fn props_attribute<P: Serialize>(props: &P) -> Result<String, SsrError> {
	let json = serde_json::to_string(props)?;
	Ok(format!("{PROPS_ATTRIBUTE}=\"{}\"", escape_attribute(&json)))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::dom::mount;
	use rstest::rstest;
	use serde::Deserialize;
	use serial_test::serial;

	#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
	struct Counter {
		#[serde(default)]
		count: i32,
	}

	fn mount_point(id: &str, props: Option<&str>) -> Element {
		let doc = document();
		let element = doc.create_element("div").unwrap();
		element.set_attribute("id", id).unwrap();
		if let Some(props) = props {
			element.set_attribute(PROPS_ATTRIBUTE, props).unwrap();
		}
		mount(&element, &doc.body().unwrap());
		element
	}

	#[rstest]
	#[serial(dom)]
	fn test_load_reads_attribute() {
		document().reset();
		mount_point("app", Some(r#"{"count":3}"#));

		let props = load::<Counter>("app").unwrap();
		assert_eq!(props.get(), Counter { count: 3 });
	}

	#[rstest]
	#[serial(dom)]
	fn test_load_missing_attribute_reads_empty_object() {
		document().reset();
		mount_point("app", None);

		assert_eq!(load::<Counter>("app").unwrap().get(), Counter { count: 0 });
	}

	#[rstest]
	#[serial(dom)]
	fn test_load_missing_element() {
		document().reset();
		assert!(matches!(load::<Counter>("nope"), Err(SsrError::ElementNotFound(id)) if id == "nope"));
	}

	#[rstest]
	#[serial(dom)]
	fn test_load_invalid_json() {
		document().reset();
		mount_point("app", Some("{not json"));

		assert!(matches!(load::<Counter>("app"), Err(SsrError::Json { .. })));
	}

	#[rstest]
	#[serial(dom)]
	fn test_load_with_custom_parser() {
		document().reset();
		mount_point("app", Some("42"));

		let value = load_with("app", |raw| raw.parse::<u8>()).unwrap();
		assert_eq!(value.get(), 42);

		let error = load_with("app", |raw| raw.parse::<bool>()).unwrap_err();
		assert!(matches!(error, SsrError::Parse { .. }));
	}

	#[rstest]
	#[serial(dom)]
	fn test_resource_reads_text_content() {
		document().reset();
		let script = mount_point("data", None);
		script.append_text(r#"{"count":9}"#);

		assert_eq!(resource::<Counter>("data").unwrap().get(), Counter { count: 9 });
	}

	#[rstest]
	fn test_props_attribute_is_escaped() {
		let attribute = props_attribute(&Counter { count: 5 }).unwrap();
		assert_eq!(attribute, "sr-props=\"{&quot;count&quot;:5}\"");
	}
}
