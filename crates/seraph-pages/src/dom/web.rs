//! Browser DOM backend built on `web-sys`.

use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::DomError;
use super::element::AttrValue;

pub use web_sys::Event;

/// Property used to tag DOM nodes with their owner key.
const KEY_PROPERTY: &str = "__seraphKey";

thread_local! {
	static NEXT_KEY: core::cell::Cell<u64> = const { core::cell::Cell::new(1) };
}

fn js_error(value: JsValue) -> DomError {
	DomError::Js(
		value
			.as_string()
			.unwrap_or_else(|| format!("{value:?}")),
	)
}

/// Logs a failed DOM call. Callers have no way to recover, so the error stops here.
fn warn_on_error<T>(result: Result<T, JsValue>, _action: &str) {
	if let Err(_error) = result {
		seraph_core::warn_log!("{} failed: {}", _action, js_error(_error));
	}
}

pub(crate) fn document() -> Result<web_sys::Document, DomError> {
	web_sys::window()
		.ok_or_else(|| DomError::Unavailable("no global `window`".to_string()))?
		.document()
		.ok_or_else(|| DomError::Unavailable("window has no document".to_string()))
}

/// Removes its listener when dropped.
pub struct EventHandle {
	target: web_sys::EventTarget,
	event: String,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		warn_on_error(
			self.target
				.remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref()),
			"removeEventListener",
		);
	}
}

/// A browser element. Clones refer to the same node.
#[derive(Clone)]
pub struct RawElement(web_sys::HtmlElement);

impl RawElement {
	pub(crate) fn create(tag: &str) -> Result<Self, DomError> {
		let element = document()?.create_element(tag).map_err(js_error)?;
		Self::from_element(element)
	}

	pub(crate) fn from_element(element: web_sys::Element) -> Result<Self, DomError> {
		element
			.dyn_into::<web_sys::HtmlElement>()
			.map(Self)
			.map_err(|_| DomError::Js("element is not an HTMLElement".to_string()))
	}

	pub(crate) fn key(&self) -> u64 {
		let name = JsValue::from_str(KEY_PROPERTY);
		if let Some(key) = Reflect::get(&self.0, &name).ok().and_then(|v| v.as_f64()) {
			return key as u64;
		}
		let key = NEXT_KEY.with(|next| {
			let key = next.get();
			next.set(key + 1);
			key
		});
		warn_on_error(Reflect::set(&self.0, &name, &JsValue::from_f64(key as f64)), "tagging node key");
		key
	}

	pub(crate) fn same_node(&self, other: &Self) -> bool {
		self.0 == other.0
	}

	pub(crate) fn tag_name(&self) -> String {
		self.0.tag_name().to_ascii_lowercase()
	}

	pub(crate) fn set_class_name(&self, class_name: &str) {
		self.0.set_class_name(class_name);
	}

	pub(crate) fn class_name(&self) -> String {
		self.0.class_name()
	}

	pub(crate) fn set_style(&self, name: &str, value: Option<&str>) {
		let style = self.0.style();
		let result = match value {
			Some(value) => style.set_property(name, value),
			None => style.remove_property(name).map(|_| ()),
		};
		warn_on_error(result, "style update");
	}

	pub(crate) fn style(&self, name: &str) -> Option<String> {
		self.0
			.style()
			.get_property_value(name)
			.ok()
			.filter(|value| !value.is_empty())
	}

	pub(crate) fn clear_style(&self) {
		self.0.style().set_css_text("");
	}

	pub(crate) fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		self.0
			.set_attribute(name, value)
			.map_err(|_| DomError::InvalidAttribute(name.to_string()))
	}

	pub(crate) fn remove_attribute(&self, name: &str) {
		warn_on_error(self.0.remove_attribute(name), "removeAttribute");
	}

	pub(crate) fn attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}

	pub(crate) fn has_property(&self, name: &str) -> bool {
		Reflect::has(&self.0, &JsValue::from_str(name)).unwrap_or(false)
	}

	pub(crate) fn set_property(&self, name: &str, value: &AttrValue) {
		let js = match value {
			AttrValue::Absent => JsValue::UNDEFINED,
			AttrValue::Text(text) => JsValue::from_str(text),
			AttrValue::Bool(flag) => JsValue::from_bool(*flag),
			AttrValue::Number(number) => JsValue::from_f64(*number),
		};
		warn_on_error(Reflect::set(&self.0, &JsValue::from_str(name), &js), "property write");
	}

	pub(crate) fn property(&self, name: &str) -> Option<AttrValue> {
		let value = Reflect::get(&self.0, &JsValue::from_str(name)).ok()?;
		if let Some(flag) = value.as_bool() {
			Some(AttrValue::Bool(flag))
		} else if let Some(number) = value.as_f64() {
			Some(AttrValue::Number(number))
		} else {
			value.as_string().map(AttrValue::Text)
		}
	}

	pub(crate) fn clear_children(&self) {
		self.0.set_text_content(None);
	}

	pub(crate) fn append_element(&self, child: &RawElement) {
		warn_on_error(self.0.append_child(&child.0), "appendChild");
	}

	pub(crate) fn append_text(&self, text: &str) {
		if let Some(document) = self.0.owner_document() {
			let node = document.create_text_node(text);
			warn_on_error(self.0.append_child(&node), "appendChild");
		}
	}

	pub(crate) fn child_count(&self) -> usize {
		self.0.child_nodes().length() as usize
	}

	pub(crate) fn text_content(&self) -> String {
		self.0.text_content().unwrap_or_default()
	}

	pub(crate) fn listen(&self, event: &str, handler: Rc<dyn Fn(&Event)>) -> EventHandle {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| handler(&event))
			as Box<dyn FnMut(web_sys::Event)>);
		let target: web_sys::EventTarget = self.0.clone().into();
		warn_on_error(
			target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
			"addEventListener",
		);
		EventHandle {
			target,
			event: event.to_string(),
			closure,
		}
	}

	pub(crate) fn html_element(&self) -> &web_sys::HtmlElement {
		&self.0
	}
}

/// Returns the document body.
pub(crate) fn body() -> Result<RawElement, DomError> {
	let body = document()?
		.body()
		.ok_or_else(|| DomError::Unavailable("document has no body".to_string()))?;
	Ok(RawElement(body))
}

/// Looks up an element by id.
pub(crate) fn find_by_id(id: &str) -> Option<RawElement> {
	document()
		.ok()?
		.get_element_by_id(id)
		.and_then(|element| RawElement::from_element(element).ok())
}
