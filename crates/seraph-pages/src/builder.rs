//! HTML Builder API
//!
//! A fluent layer over [`Props`](crate::binding::Props). Every setter accepts
//! a plain value or a signal, and [`ElementBuilder::build`] applies everything
//! to the element in one pass.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::builder::html::{button, div, p};
//! use seraph_pages::Signal;
//!
//! let count = Signal::new(0);
//! let label = count.clone().map(|n| format!("Count: {n}"));
//!
//! let counter = div()
//!     .class("counter")
//!     .child(p().text(label))
//!     .child(
//!         button()
//!             .text("Increment")
//!             .on_click(move |_| count.update(|n| *n += 1)),
//!     )
//!     .build();
//! ```

use seraph_core::reactive::IntoBindable;

use crate::binding::{Classes, Props, StyleMap, apply};
use crate::dom::{AttrValue, Children, Element, Event, Node};

pub mod html;

pub use html::*;

/// HTML element builder with fluent API.
///
/// Nothing is written to the element until [`ElementBuilder::build`].
pub struct ElementBuilder {
	element: Element,
	props: Props,
	text: Option<seraph_core::reactive::Bindable<String>>,
}

impl ElementBuilder {
	/// Wraps an existing element.
	pub fn new(element: Element) -> Self {
		Self {
			element,
			props: Props::new(),
			text: None,
		}
	}

	/// The element being built.
	pub fn element(&self) -> &Element {
		&self.element
	}

	/// Sets the class list.
	///
	/// ```ignore
	/// div().class("container flex-row").build()
	/// ```
	pub fn class(mut self, classes: impl IntoBindable<Classes>) -> Self {
		self.props = self.props.class(classes);
		self
	}

	/// Sets the `id` attribute.
	pub fn id(mut self, id: impl IntoBindable<AttrValue>) -> Self {
		self.props = self.props.id(id);
		self
	}

	/// Binds one inline style property.
	///
	/// ```ignore
	/// div().style("color", color_signal).build()
	/// ```
	pub fn style(mut self, name: &str, value: impl IntoBindable<Option<String>>) -> Self {
		self.props = self.props.style(name, value);
		self
	}

	/// Replaces the whole inline style.
	pub fn styles(mut self, style: impl IntoBindable<StyleMap>) -> Self {
		self.props = self.props.styles(style);
		self
	}

	/// Binds an attribute.
	///
	/// ```ignore
	/// button().attr("disabled", is_busy).build()
	/// ```
	pub fn attr(mut self, name: &str, value: impl IntoBindable<AttrValue>) -> Self {
		self.props = self.props.attr(name, value);
		self
	}

	/// Sets the text content, replacing all children.
	pub fn text(mut self, text: impl IntoBindable<String>) -> Self {
		self.text = Some(text.into_bindable());
		self
	}

	/// Appends a child.
	///
	/// ```ignore
	/// div()
	///     .child(p().text("First paragraph"))
	///     .child(p().text("Second paragraph"))
	///     .build()
	/// ```
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.props = self.props.child(child);
		self
	}

	/// Binds the full child list.
	pub fn children(mut self, children: impl IntoBindable<Children>) -> Self {
		self.props = self.props.children(children);
		self
	}

	/// Adds an event listener for any event type.
	pub fn on<F>(mut self, event_type: &str, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.props = self.props.on(event_type, callback);
		self
	}

	/// Adds a `click` listener.
	#[inline]
	pub fn on_click<F>(self, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("click", callback)
	}

	/// Adds an `input` listener.
	#[inline]
	pub fn on_input<F>(self, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("input", callback)
	}

	/// Adds a `change` listener.
	#[inline]
	pub fn on_change<F>(self, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("change", callback)
	}

	/// Adds a `submit` listener.
	#[inline]
	pub fn on_submit<F>(self, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("submit", callback)
	}

	/// Merges a prepared property set. Later setters win per facet.
	pub fn props(mut self, props: Props) -> Self {
		apply(&self.element, core::mem::take(&mut self.props));
		self.props = props;
		self
	}

	/// Applies everything and returns the element.
	pub fn build(self) -> Element {
		let Self {
			element,
			mut props,
			text,
		} = self;
		if let Some(text) = text {
			props = props.children(text.map(|text: &String| Children::from(text.clone())));
		}
		apply(&element, props);
		element
	}
}

impl From<ElementBuilder> for Node {
	fn from(builder: ElementBuilder) -> Self {
		Node::Element(builder.build())
	}
}

impl From<ElementBuilder> for Element {
	fn from(builder: ElementBuilder) -> Self {
		builder.build()
	}
}
