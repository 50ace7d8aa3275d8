//! In-memory DOM used outside the browser.
//!
//! Server-side rendering and native tests run against this tree. It models
//! the parts of the DOM the binding layer touches: class name, inline style,
//! attributes, a handful of live properties, child nodes and event listeners.

use core::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::DomError;
use super::element::AttrValue;
use super::escape::{escape_attribute, escape_text};

/// Live JS properties in a browser, with the elements that carry them.
///
/// An empty tag list means every HTML element. Attribute writes with these
/// names go to the property instead, on matching elements only.
const LIVE_PROPERTIES: &[(&str, &[&str])] = &[
	(
		"value",
		&[
			"input", "textarea", "select", "option", "button", "output", "li", "meter", "progress",
			"param", "data",
		],
	),
	("checked", &["input"]),
	("indeterminate", &["input"]),
	("selected", &["option"]),
	(
		"disabled",
		&["button", "input", "select", "textarea", "option", "optgroup", "fieldset", "link"],
	),
	("multiple", &["input", "select"]),
	("required", &["input", "select", "textarea"]),
	("hidden", &[]),
];

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

fn next_key() -> u64 {
	NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

type Handler = Rc<dyn Fn(&Event)>;

struct ListenerEntry {
	id: u64,
	event: String,
	handler: Handler,
}

enum ChildNode {
	Element(RawElement),
	Text(String),
}

struct ElementData {
	tag: String,
	key: u64,
	class_name: String,
	style: Vec<(String, String)>,
	attributes: Vec<(String, String)>,
	properties: Vec<(String, AttrValue)>,
	children: Vec<ChildNode>,
	listeners: Vec<ListenerEntry>,
}

/// A DOM event dispatched through the in-memory tree.
#[derive(Debug)]
pub struct Event {
	event_type: String,
	default_prevented: Cell<bool>,
}

impl Event {
	/// Creates an event of the given type, e.g. `"click"`.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			default_prevented: Cell::new(false),
		}
	}

	/// The event type.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// Marks the default action as cancelled.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Whether a handler called [`Event::prevent_default`].
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

/// Removes its listener when dropped.
pub struct EventHandle {
	target: Weak<RefCell<ElementData>>,
	id: u64,
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(target) = self.target.upgrade() {
			target
				.borrow_mut()
				.listeners
				.retain(|entry| entry.id != self.id);
		}
	}
}

/// A node in the in-memory tree. Clones share the node.
#[derive(Clone)]
pub struct RawElement(Rc<RefCell<ElementData>>);

impl RawElement {
	pub(crate) fn create(tag: &str) -> Result<Self, DomError> {
		Ok(Self::node(tag))
	}

	fn node(tag: &str) -> Self {
		Self(Rc::new(RefCell::new(ElementData {
			tag: tag.to_ascii_lowercase(),
			key: next_key(),
			class_name: String::new(),
			style: Vec::new(),
			attributes: Vec::new(),
			properties: Vec::new(),
			children: Vec::new(),
			listeners: Vec::new(),
		})))
	}

	pub(crate) fn key(&self) -> u64 {
		self.0.borrow().key
	}

	pub(crate) fn same_node(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	pub(crate) fn tag_name(&self) -> String {
		self.0.borrow().tag.clone()
	}

	pub(crate) fn set_class_name(&self, class_name: &str) {
		self.0.borrow_mut().class_name = class_name.to_string();
	}

	pub(crate) fn class_name(&self) -> String {
		self.0.borrow().class_name.clone()
	}

	pub(crate) fn set_style(&self, name: &str, value: Option<&str>) {
		let mut data = self.0.borrow_mut();
		let position = data.style.iter().position(|(key, _)| key == name);
		match (position, value) {
			(Some(index), Some(value)) => data.style[index].1 = value.to_string(),
			(None, Some(value)) => data.style.push((name.to_string(), value.to_string())),
			(Some(index), None) => {
				data.style.remove(index);
			}
			(None, None) => {}
		}
	}

	pub(crate) fn style(&self, name: &str) -> Option<String> {
		self.0
			.borrow()
			.style
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
	}

	pub(crate) fn style_text(&self) -> String {
		self.0
			.borrow()
			.style
			.iter()
			.map(|(key, value)| format!("{key}: {value};"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	pub(crate) fn clear_style(&self) {
		self.0.borrow_mut().style.clear();
	}

	pub(crate) fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '"' || c == '=') {
			return Err(DomError::InvalidAttribute(name.to_string()));
		}
		let mut data = self.0.borrow_mut();
		match data.attributes.iter_mut().find(|(key, _)| key == name) {
			Some(entry) => entry.1 = value.to_string(),
			None => data.attributes.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	pub(crate) fn remove_attribute(&self, name: &str) {
		self.0.borrow_mut().attributes.retain(|(key, _)| key != name);
	}

	pub(crate) fn attribute(&self, name: &str) -> Option<String> {
		self.0
			.borrow()
			.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
	}

	pub(crate) fn has_property(&self, name: &str) -> bool {
		let data = self.0.borrow();
		LIVE_PROPERTIES
			.iter()
			.find(|(property, _)| *property == name)
			.is_some_and(|(_, tags)| tags.is_empty() || tags.contains(&data.tag.as_str()))
	}

	pub(crate) fn set_property(&self, name: &str, value: &AttrValue) {
		let mut data = self.0.borrow_mut();
		match data.properties.iter_mut().find(|(key, _)| key == name) {
			Some(entry) => entry.1 = value.clone(),
			None => data.properties.push((name.to_string(), value.clone())),
		}
	}

	pub(crate) fn property(&self, name: &str) -> Option<AttrValue> {
		self.0
			.borrow()
			.properties
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
	}

	pub(crate) fn clear_children(&self) {
		// Detach outside the borrow so dropped nodes cannot observe it.
		let removed = core::mem::take(&mut self.0.borrow_mut().children);
		drop(removed);
	}

	pub(crate) fn append_element(&self, child: &RawElement) {
		self.0
			.borrow_mut()
			.children
			.push(ChildNode::Element(child.clone()));
	}

	pub(crate) fn append_text(&self, text: &str) {
		self.0
			.borrow_mut()
			.children
			.push(ChildNode::Text(text.to_string()));
	}

	pub(crate) fn child_count(&self) -> usize {
		self.0.borrow().children.len()
	}

	pub(crate) fn child_elements(&self) -> Vec<RawElement> {
		self.0
			.borrow()
			.children
			.iter()
			.filter_map(|child| match child {
				ChildNode::Element(element) => Some(element.clone()),
				ChildNode::Text(_) => None,
			})
			.collect()
	}

	pub(crate) fn text_content(&self) -> String {
		let data = self.0.borrow();
		let mut text = String::new();
		for child in &data.children {
			match child {
				ChildNode::Element(element) => text.push_str(&element.text_content()),
				ChildNode::Text(value) => text.push_str(value),
			}
		}
		text
	}

	pub(crate) fn listen(&self, event: &str, handler: Handler) -> EventHandle {
		let id = next_key();
		self.0.borrow_mut().listeners.push(ListenerEntry {
			id,
			event: event.to_string(),
			handler,
		});
		EventHandle {
			target: Rc::downgrade(&self.0),
			id,
		}
	}

	pub(crate) fn listener_count(&self) -> usize {
		self.0.borrow().listeners.len()
	}

	/// Calls every listener registered for the event type, in order.
	pub(crate) fn dispatch(&self, event: &Event) {
		let handlers: Vec<Handler> = self
			.0
			.borrow()
			.listeners
			.iter()
			.filter(|entry| entry.event == event.event_type())
			.map(|entry| Rc::clone(&entry.handler))
			.collect();
		for handler in handlers {
			handler(event);
		}
	}

	/// Depth-first search for an element with the given `id` attribute.
	pub(crate) fn find_by_id(&self, id: &str) -> Option<RawElement> {
		if self.attribute("id").as_deref() == Some(id) {
			return Some(self.clone());
		}
		self.child_elements()
			.iter()
			.find_map(|child| child.find_by_id(id))
	}

	pub(crate) fn to_html(&self) -> String {
		let data = self.0.borrow();
		let mut html = format!("<{}", data.tag);

		if !data.class_name.is_empty() {
			html.push_str(&format!(" class=\"{}\"", escape_attribute(&data.class_name)));
		}
		let style = self.style_text();
		if !style.is_empty() {
			html.push_str(&format!(" style=\"{}\"", escape_attribute(&style)));
		}
		for (name, value) in &data.attributes {
			html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
		}
		for (name, value) in &data.properties {
			if data.attributes.iter().any(|(key, _)| key == name) {
				continue;
			}
			match value {
				AttrValue::Bool(true) => html.push_str(&format!(" {name}")),
				AttrValue::Bool(false) | AttrValue::Absent => {}
				AttrValue::Text(text) => {
					html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(text)))
				}
				AttrValue::Number(number) => {
					html.push_str(&format!(" {}=\"{}\"", name, AttrValue::format_number(*number)))
				}
			}
		}
		html.push('>');

		if VOID_ELEMENTS.contains(&data.tag.as_str()) {
			return html;
		}

		for child in &data.children {
			match child {
				ChildNode::Element(element) => html.push_str(&element.to_html()),
				ChildNode::Text(text) => html.push_str(&escape_text(text)),
			}
		}
		html.push_str(&format!("</{}>", data.tag));
		html
	}
}

thread_local! {
	static BODY: RefCell<Option<RawElement>> = const { RefCell::new(None) };
}

/// Returns the document body, creating it on first use.
pub(crate) fn body() -> RawElement {
	BODY.with(|body| {
		body.borrow_mut()
			.get_or_insert_with(|| RawElement::node("body"))
			.clone()
	})
}

/// Replaces the document body with a fresh, empty one.
pub(crate) fn reset() {
	BODY.with(|body| body.borrow_mut().take());
}
