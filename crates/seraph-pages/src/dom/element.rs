//! Element - DOM Nodes That Own Their Bindings
//!
//! An [`Element`] wraps a backend node together with an owner record. The
//! owner keeps, for that node:
//!
//! - at most one live subscription per [`Facet`] (class list, whole style,
//!   one style property, the child list, one attribute),
//! - the event listeners attached through [`Element::on`],
//! - the child elements appended through the binding layer.
//!
//! [`Element::dispose`] releases all of them, recursively through children.
//! Every wrapper of the same node shares one owner, so re-binding a facet
//! through a second handle still releases the first subscription.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use seraph_core::debug_log;
use seraph_core::reactive::{Bindable, Subscription};

use super::DomError;
use super::backend::{Event, EventHandle, RawElement};

/// One independently bound aspect of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Facet {
	/// The full `className`.
	Class,
	/// The whole inline style.
	Style,
	/// One inline style property.
	StyleProperty(String),
	/// The full child list.
	Children,
	/// One attribute or live property.
	Attribute(String),
}

/// Value written to an attribute or live property.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	/// Removes the attribute.
	Absent,
	/// A string value.
	Text(String),
	/// A boolean, written as a property when one exists.
	Bool(bool),
	/// A number, written as a property when one exists.
	Number(f64),
}

impl AttrValue {
	/// String form used for `setAttribute`. `None` for [`AttrValue::Absent`].
	pub fn as_attribute(&self) -> Option<String> {
		match self {
			Self::Absent => None,
			Self::Text(text) => Some(text.clone()),
			Self::Bool(flag) => Some(flag.to_string()),
			Self::Number(number) => Some(Self::format_number(*number)),
		}
	}

	pub(crate) fn format_number(number: f64) -> String {
		if number.fract() == 0.0 && number.abs() < 1e15 {
			format!("{}", number as i64)
		} else {
			number.to_string()
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! attr_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for AttrValue {
				fn from(value: $ty) -> Self {
					Self::Number(f64::from(value))
				}
			}
		)*
	};
}

attr_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Absent, Into::into)
	}
}

/// A child of an element: another element or a text node.
#[derive(Clone)]
pub enum Node {
	/// An element child.
	Element(Element),
	/// A text child.
	Text(String),
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<&Element> for Node {
	fn from(element: &Element) -> Self {
		Self::Element(element.clone())
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
		}
	}
}

/// An ordered child list.
///
/// When a reactive child list changes, elements missing from the new list are
/// disposed for good. Putting one back in a later list shows the node again,
/// but its bindings and owned listeners stay released. Keep an element in
/// every list, or build a fresh one, when it has to stay reactive.
#[derive(Debug, Clone, Default)]
pub struct Children(Vec<Node>);

impl Children {
	/// An empty child list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a child.
	pub fn push(&mut self, node: impl Into<Node>) {
		self.0.push(node.into());
	}

	/// Number of children.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the children.
	pub fn iter(&self) -> std::slice::Iter<'_, Node> {
		self.0.iter()
	}

	fn contains_element(&self, element: &Element) -> bool {
		self.0.iter().any(|node| match node {
			Node::Element(child) => child.same_node(element),
			Node::Text(_) => false,
		})
	}
}

impl<N: Into<Node>> FromIterator<N> for Children {
	fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl IntoIterator for Children {
	type Item = Node;
	type IntoIter = std::vec::IntoIter<Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl From<Node> for Children {
	fn from(node: Node) -> Self {
		Self(vec![node])
	}
}

impl From<Element> for Children {
	fn from(element: Element) -> Self {
		Self(vec![Node::Element(element)])
	}
}

impl From<&str> for Children {
	fn from(text: &str) -> Self {
		Self(vec![Node::Text(text.to_string())])
	}
}

impl From<String> for Children {
	fn from(text: String) -> Self {
		Self(vec![Node::Text(text)])
	}
}

impl From<Vec<Node>> for Children {
	fn from(nodes: Vec<Node>) -> Self {
		Self(nodes)
	}
}

impl From<Vec<Element>> for Children {
	fn from(elements: Vec<Element>) -> Self {
		elements.into_iter().collect()
	}
}

impl From<Vec<String>> for Children {
	fn from(texts: Vec<String>) -> Self {
		texts.into_iter().collect()
	}
}

impl From<Option<Element>> for Children {
	fn from(element: Option<Element>) -> Self {
		element.into_iter().collect()
	}
}

struct Owner {
	key: u64,
	facets: RefCell<HashMap<Facet, Subscription>>,
	events: RefCell<Vec<EventHandle>>,
	children: RefCell<Vec<Element>>,
	disposed: Cell<bool>,
}

impl Owner {
	fn new(key: u64) -> Self {
		Self {
			key,
			facets: RefCell::new(HashMap::new()),
			events: RefCell::new(Vec::new()),
			children: RefCell::new(Vec::new()),
			disposed: Cell::new(false),
		}
	}
}

impl Drop for Owner {
	fn drop(&mut self) {
		let key = self.key;
		let _ = OWNERS.try_with(|owners| {
			if let Ok(mut owners) = owners.try_borrow_mut() {
				owners.remove(&key);
			}
		});
	}
}

thread_local! {
	static OWNERS: RefCell<HashMap<u64, Weak<Owner>>> = RefCell::new(HashMap::new());
}

/// A DOM element and the bindings it owns. Clones refer to the same node.
#[derive(Clone)]
pub struct Element {
	raw: RawElement,
	owner: Rc<Owner>,
}

/// Non-owning handle used inside listeners to avoid reference cycles.
#[derive(Clone)]
pub struct WeakElement {
	raw: RawElement,
	owner: Weak<Owner>,
}

impl WeakElement {
	/// Returns the element if its owner is still alive.
	pub fn upgrade(&self) -> Option<Element> {
		self.owner.upgrade().map(|owner| Element {
			raw: self.raw.clone(),
			owner,
		})
	}
}

impl Element {
	pub(crate) fn from_raw(raw: RawElement) -> Self {
		let key = raw.key();
		OWNERS.with(|owners| {
			let mut owners = owners.borrow_mut();
			if let Some(owner) = owners.get(&key).and_then(Weak::upgrade) {
				return Self { raw, owner };
			}
			let owner = Rc::new(Owner::new(key));
			owners.insert(key, Rc::downgrade(&owner));
			Self { raw, owner }
		})
	}

	/// Lower-case tag name.
	pub fn tag_name(&self) -> String {
		self.raw.tag_name()
	}

	/// Whether both handles refer to the same node.
	pub fn same_node(&self, other: &Element) -> bool {
		self.raw.same_node(&other.raw)
	}

	/// Creates a non-owning handle.
	pub fn downgrade(&self) -> WeakElement {
		WeakElement {
			raw: self.raw.clone(),
			owner: Rc::downgrade(&self.owner),
		}
	}

	/// The current `className`.
	pub fn class_name(&self) -> String {
		self.raw.class_name()
	}

	/// Overwrites `className`.
	pub fn set_class_name(&self, class_name: &str) {
		self.raw.set_class_name(class_name);
	}

	/// Reads one inline style property.
	pub fn style(&self, name: &str) -> Option<String> {
		self.raw.style(name)
	}

	/// Sets (`Some`) or removes (`None`) one inline style property.
	pub fn set_style(&self, name: &str, value: Option<&str>) {
		self.raw.set_style(name, value);
	}

	/// Removes every inline style property.
	pub fn clear_style(&self) {
		self.raw.clear_style();
	}

	/// Reads an attribute.
	pub fn attribute(&self, name: &str) -> Option<String> {
		self.raw.attribute(name)
	}

	/// Sets an attribute.
	///
	/// # Errors
	///
	/// Returns [`DomError::InvalidAttribute`] if the name is not a valid
	/// attribute name.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		self.raw.set_attribute(name, value)
	}

	/// Removes an attribute.
	pub fn remove_attribute(&self, name: &str) {
		self.raw.remove_attribute(name);
	}

	/// Reads a live property such as `value` or `checked`.
	pub fn property(&self, name: &str) -> Option<AttrValue> {
		self.raw.property(name)
	}

	/// Writes an attribute the way the binding layer does.
	///
	/// The attribute is removed first. [`AttrValue::Absent`] stops there.
	/// Otherwise the value goes to the live property of the same name when
	/// the element has one, and to `setAttribute` when it does not.
	pub fn apply_attribute(&self, name: &str, value: &AttrValue) {
		self.raw.remove_attribute(name);
		if matches!(value, AttrValue::Absent) {
			return;
		}
		if self.raw.has_property(name) {
			self.raw.set_property(name, value);
			return;
		}
		if let Some(text) = value.as_attribute() {
			if let Err(_error) = self.raw.set_attribute(name, &text) {
				seraph_core::warn_log!("attribute not applied: {}", _error);
			}
		}
	}

	/// Appends a child element and takes ownership of its bindings.
	pub fn append_child(&self, child: &Element) {
		self.raw.append_element(&child.raw);
		self.owner.children.borrow_mut().push(child.clone());
	}

	/// Appends a text node.
	pub fn append_text(&self, text: &str) {
		self.raw.append_text(text);
	}

	/// Clears the child list and appends `children` in order.
	///
	/// Previous children that are not part of the new list are disposed.
	/// Disposal is permanent, see [`Children`].
	pub fn replace_children(&self, children: &Children) {
		let previous = core::mem::take(&mut *self.owner.children.borrow_mut());
		for old in &previous {
			if !children.contains_element(old) {
				old.dispose();
			}
		}
		drop(previous);

		self.raw.clear_children();
		for node in children.iter() {
			match node {
				Node::Element(child) => self.append_child(child),
				Node::Text(text) => self.raw.append_text(text),
			}
		}
	}

	/// Number of child nodes, text included.
	pub fn child_count(&self) -> usize {
		self.raw.child_count()
	}

	/// Concatenated text of all descendants.
	pub fn text_content(&self) -> String {
		self.raw.text_content()
	}

	/// Attaches an event listener whose lifetime is tied to the returned handle.
	pub fn add_event_listener<F>(&self, event: &str, handler: F) -> EventHandle
	where
		F: Fn(&Event) + 'static,
	{
		self.raw.listen(event, Rc::new(handler))
	}

	/// Attaches an event listener owned by this element.
	///
	/// Listeners accumulate; they are removed by [`Element::dispose`].
	pub fn on<F>(&self, event: &str, handler: F)
	where
		F: Fn(&Event) + 'static,
	{
		let handle = self.raw.listen(event, Rc::new(handler));
		self.owner.events.borrow_mut().push(handle);
		self.owner.disposed.set(false);
	}

	/// Binds one facet to a static or reactive value.
	///
	/// Any subscription previously bound to the same facet is released first.
	/// `apply` runs now and, for reactive values, after every emission.
	pub fn bind<T, F>(&self, facet: Facet, value: Bindable<T>, apply: F)
	where
		T: Clone + 'static,
		F: Fn(&Element, &T) + 'static,
	{
		self.release(&facet);
		self.owner.disposed.set(false);

		let weak = self.downgrade();
		let subscription = value.bind(move |current| {
			if let Some(element) = weak.upgrade() {
				apply(&element, current);
			}
		});

		if let Some(subscription) = subscription {
			self.owner.facets.borrow_mut().insert(facet, subscription);
		}
	}

	/// Releases the subscription bound to `facet`, if any.
	pub fn release(&self, facet: &Facet) -> bool {
		let previous = self.owner.facets.borrow_mut().remove(facet);
		previous.is_some()
	}

	/// Number of facets currently bound to a signal.
	pub fn bound_facets(&self) -> usize {
		self.owner.facets.borrow().len()
	}

	/// Number of listeners attached through [`Element::on`].
	pub fn owned_listeners(&self) -> usize {
		self.owner.events.borrow().len()
	}

	/// Releases every subscription and listener owned by this element and by
	/// its bound children. The node itself stays in the document.
	pub fn dispose(&self) {
		if self.owner.disposed.replace(true) {
			return;
		}
		let facets = core::mem::take(&mut *self.owner.facets.borrow_mut());
		drop(facets);
		let events = core::mem::take(&mut *self.owner.events.borrow_mut());
		drop(events);
		let children = core::mem::take(&mut *self.owner.children.borrow_mut());
		for child in &children {
			child.dispose();
		}
		debug_log!("disposed <{}> with {} children", self.tag_name(), children.len());
	}

	/// Whether [`Element::dispose`] ran since the last binding.
	pub fn is_disposed(&self) -> bool {
		self.owner.disposed.get()
	}

	/// Serializes the subtree to HTML.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn to_html(&self) -> String {
		self.raw.to_html()
	}

	/// Runs the listeners registered for `event.event_type()`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn dispatch_event(&self, event: &Event) {
		self.raw.dispatch(event);
	}

	/// Dispatches a `click` event and reports whether it was cancelled.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn click(&self) -> bool {
		let event = Event::new("click");
		self.raw.dispatch(&event);
		event.default_prevented()
	}

	/// Number of listeners registered on the node, owned or not.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn listener_count(&self) -> usize {
		self.raw.listener_count()
	}

	/// Element children in document order.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn child_elements(&self) -> Vec<Element> {
		self.raw
			.child_elements()
			.into_iter()
			.map(Element::from_raw)
			.collect()
	}

	/// The underlying browser element.
	#[cfg(target_arch = "wasm32")]
	pub fn html_element(&self) -> &web_sys::HtmlElement {
		self.raw.html_element()
	}
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		self.same_node(other)
	}
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag_name())
			.field("key", &self.owner.key)
			.field("bound_facets", &self.bound_facets())
			.finish()
	}
}
