//! DOM abstraction layer
//!
//! In the browser every [`Element`] wraps a `web_sys::HtmlElement`. Everywhere
//! else the same API runs against a small in-memory tree, which is what
//! server-side rendering and the native test suite use.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::dom::{document, mount};
//!
//! let doc = document();
//! let body = doc.body()?;
//! let greeting = doc.create_element("p")?;
//! greeting.append_text("hello");
//! mount(&greeting, &body);
//! ```

use core::cell::RefCell;

use thiserror::Error;

mod element;
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
mod escape;

#[cfg(not(target_arch = "wasm32"))]
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
use memory as backend;
#[cfg(target_arch = "wasm32")]
use web as backend;

pub use backend::{Event, EventHandle};
pub use element::{AttrValue, Children, Element, Facet, Node, WeakElement};
pub(crate) use escape::escape_attribute;

/// Errors raised by DOM operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// The tag name is empty or contains characters a tag cannot have.
	#[error("invalid tag name: {0:?}")]
	InvalidTag(String),
	/// The attribute name is empty or contains characters an attribute cannot have.
	#[error("invalid attribute name: {0:?}")]
	InvalidAttribute(String),
	/// No document is reachable (for example outside a browser window).
	#[error("DOM unavailable: {0}")]
	Unavailable(String),
	/// A browser API threw.
	#[error("JavaScript error: {0}")]
	Js(String),
}

fn validate_tag(tag: &str) -> Result<(), DomError> {
	let mut chars = tag.chars();
	let valid = chars.next().is_some_and(|first| first.is_ascii_alphabetic())
		&& chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
	if valid {
		Ok(())
	} else {
		Err(DomError::InvalidTag(tag.to_string()))
	}
}

/// Handle to the current document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Document {
	_private: (),
}

/// Returns the current document.
pub fn document() -> Document {
	Document::global()
}

impl Document {
	/// Returns the current document.
	pub fn global() -> Self {
		Self { _private: () }
	}

	/// Creates a detached element.
	///
	/// # Errors
	///
	/// Returns [`DomError::InvalidTag`] for malformed tag names, and
	/// [`DomError::Unavailable`] in the browser when there is no document.
	pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
		validate_tag(tag)?;
		backend::RawElement::create(tag).map(Element::from_raw)
	}

	/// The `<body>` element.
	///
	/// # Errors
	///
	/// Returns [`DomError::Unavailable`] when the document has no body.
	pub fn body(&self) -> Result<Element, DomError> {
		#[cfg(target_arch = "wasm32")]
		{
			backend::body().map(Element::from_raw)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			Ok(Element::from_raw(backend::body()))
		}
	}

	/// Finds an element in the document by its `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
		#[cfg(target_arch = "wasm32")]
		{
			backend::find_by_id(id).map(Element::from_raw)
		}
		#[cfg(not(target_arch = "wasm32"))]
		{
			backend::body().find_by_id(id).map(Element::from_raw)
		}
	}

	/// Drops every mounted tree and starts over with an empty body.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn reset(&self) {
		let roots = ROOTS.with(|roots| core::mem::take(&mut *roots.borrow_mut()));
		for root in &roots {
			root.dispose();
		}
		backend::reset();
	}
}

thread_local! {
	static ROOTS: RefCell<Vec<Element>> = const { RefCell::new(Vec::new()) };
}

fn keep_root(parent: &Element) {
	ROOTS.with(|roots| {
		let mut roots = roots.borrow_mut();
		if !roots.iter().any(|root| root.same_node(parent)) {
			roots.push(parent.clone());
		}
	});
}

/// Appends `child` to `parent`.
///
/// The parent is kept alive as a mount point, so bindings inside the tree
/// stay active until [`unmount`] is called.
pub fn mount(child: &Element, parent: &Element) {
	parent.append_child(child);
	keep_root(parent);
}

/// Replaces all children of `parent` with `child`.
pub fn render(child: &Element, parent: &Element) {
	parent.replace_children(&Children::from(child.clone()));
	keep_root(parent);
}

/// Releases every binding below `parent` and empties it.
pub fn unmount(parent: &Element) {
	ROOTS.with(|roots| roots.borrow_mut().retain(|root| !root.same_node(parent)));
	parent.dispose();
	parent.replace_children(&Children::new());
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[case("div", true)]
	#[case("my-widget", true)]
	#[case("h1", true)]
	#[case("", false)]
	#[case("1div", false)]
	#[case("di v", false)]
	#[case("<script>", false)]
	fn test_validate_tag(#[case] tag: &str, #[case] valid: bool) {
		assert_eq!(validate_tag(tag).is_ok(), valid);
	}

	#[rstest]
	fn test_create_element_rejects_invalid_tag() {
		let error = document().create_element("not a tag").unwrap_err();
		assert_eq!(error, DomError::InvalidTag("not a tag".to_string()));
	}

	#[rstest]
	#[serial(dom)]
	fn test_mount_appends_and_render_replaces() {
		let doc = document();
		doc.reset();
		let body = doc.body().unwrap();
		let first = doc.create_element("p").unwrap();
		let second = doc.create_element("p").unwrap();

		mount(&first, &body);
		mount(&second, &body);
		assert_eq!(body.child_count(), 2);

		let only = doc.create_element("main").unwrap();
		render(&only, &body);
		assert_eq!(body.to_html(), "<body><main></main></body>");
	}

	#[rstest]
	#[serial(dom)]
	fn test_get_element_by_id_searches_body() {
		let doc = document();
		doc.reset();
		let body = doc.body().unwrap();
		let target = doc.create_element("section").unwrap();
		target.set_attribute("id", "app").unwrap();
		mount(&target, &body);

		let found = doc.get_element_by_id("app").unwrap();
		assert!(found.same_node(&target));
		assert!(doc.get_element_by_id("missing").is_none());
	}

	#[rstest]
	#[serial(dom)]
	fn test_unmount_disposes_tree() {
		let doc = document();
		doc.reset();
		let body = doc.body().unwrap();
		let button = doc.create_element("button").unwrap();
		button.on("click", |_| {});
		mount(&button, &body);

		unmount(&body);

		assert_eq!(button.listener_count(), 0);
		assert_eq!(body.child_count(), 0);
	}
}
