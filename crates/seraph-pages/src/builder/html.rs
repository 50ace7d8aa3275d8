//! HTML Element Factory
//!
//! One constructor per common tag, plus [`create`] and [`try_create`] for any
//! tag name and [`factory`] for looking constructors up by name at runtime.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::binding::Props;
//! use seraph_pages::builder::html;
//!
//! let card = html::create("article", Props::new().class("card").text("Hi"));
//! let make = html::factory("section").unwrap();
//! let section = make().child(card).build();
//! ```

use super::ElementBuilder;
use crate::binding::{Props, apply};
use crate::dom::{Document, DomError, Element};

/// Constructor returned by [`factory`].
pub type ElementFactory = fn() -> ElementBuilder;

/// Creates an element of any tag and applies `props`.
///
/// # Errors
///
/// Returns [`DomError::InvalidTag`] for malformed tag names and
/// [`DomError::Unavailable`] when there is no document.
pub fn try_create(tag: &str, props: Props) -> Result<Element, DomError> {
	let element = Document::global().create_element(tag)?;
	apply(&element, props);
	Ok(element)
}

/// Creates an element of any tag and applies `props`.
///
/// # Panics
///
/// Panics if the element cannot be created. See [`try_create`].
pub fn create(tag: &str, props: Props) -> Element {
	try_create(tag, props).unwrap_or_else(|e| panic!("failed to create <{tag}> element: {e}"))
}

/// Like [`create`], but the properties are computed from the new element.
///
/// ```ignore
/// let input = html::create_with("input", |el| {
///     let el = el.downgrade();
///     Props::new().on_input(move |_| {
///         if let Some(el) = el.upgrade() {
///             query.set(el.property("value"));
///         }
///     })
/// });
/// ```
pub fn create_with<F>(tag: &str, props: F) -> Element
where
	F: FnOnce(&Element) -> Props,
{
	let element = create_element_builder(tag).build();
	let props = props(&element);
	apply(&element, props);
	element
}

#[inline]
fn try_create_element_builder(tag: &str) -> Result<ElementBuilder, DomError> {
	let element = Document::global().create_element(tag)?;
	Ok(ElementBuilder::new(element))
}

/// # Panics
///
/// Panics if the DOM is unavailable; standard tags are always valid.
#[inline]
fn create_element_builder(tag: &str) -> ElementBuilder {
	try_create_element_builder(tag)
		.unwrap_or_else(|e| panic!("failed to create <{tag}> element: {e}"))
}

macro_rules! define_elements {
	($($(#[$meta:meta])* $name:ident => $tag:literal),* $(,)?) => {
		$(
			$(#[$meta])*
			pub fn $name() -> ElementBuilder {
				create_element_builder($tag)
			}
		)*

		/// Tag names that have a typed constructor.
		pub const TAGS: &[&str] = &[$($tag),*];

		/// Looks up the constructor for `tag`.
		///
		/// Returns `None` for tags without a typed constructor; use
		/// [`create`] for those.
		pub fn factory(tag: &str) -> Option<ElementFactory> {
			match tag {
				$($tag => Some($name as ElementFactory),)*
				_ => None,
			}
		}
	};
}

define_elements! {
	/// Creates a `<div>` element
	///
	/// ```ignore
	/// let container = div().class("container").child(p().text("Content")).build();
	/// ```
	div => "div",
	/// Creates a `<span>` element
	span => "span",
	/// Creates a `<p>` element
	p => "p",
	/// Creates an `<a>` element
	///
	/// For in-app navigation prefer [`Link`](crate::router::Link).
	a => "a",
	/// Creates a `<button>` element
	///
	/// ```ignore
	/// let button = button().text("Click me").on_click(|_| info_log!("clicked")).build();
	/// ```
	button => "button",
	/// Creates an `<input>` element
	input => "input",
	/// Creates a `<textarea>` element
	textarea => "textarea",
	/// Creates a `<select>` element
	select => "select",
	/// Creates an `<option>` element
	option => "option",
	/// Creates a `<label>` element
	label => "label",
	/// Creates a `<form>` element
	form => "form",
	/// Creates a `<fieldset>` element
	fieldset => "fieldset",
	/// Creates an `<img>` element
	img => "img",
	/// Creates an `<h1>` element
	h1 => "h1",
	/// Creates an `<h2>` element
	h2 => "h2",
	/// Creates an `<h3>` element
	h3 => "h3",
	/// Creates an `<h4>` element
	h4 => "h4",
	/// Creates an `<h5>` element
	h5 => "h5",
	/// Creates an `<h6>` element
	h6 => "h6",
	/// Creates a `<ul>` element
	ul => "ul",
	/// Creates an `<ol>` element
	ol => "ol",
	/// Creates an `<li>` element
	li => "li",
	/// Creates an `<article>` element
	article => "article",
	/// Creates an `<aside>` element
	aside => "aside",
	/// Creates a `<header>` element
	header => "header",
	/// Creates a `<footer>` element
	footer => "footer",
	/// Creates a `<main>` element
	main => "main",
	/// Creates a `<nav>` element
	nav => "nav",
	/// Creates a `<section>` element
	section => "section",
	/// Creates a `<pre>` element
	pre => "pre",
	/// Creates a `<code>` element
	code => "code",
	/// Creates a `<strong>` element
	strong => "strong",
	/// Creates an `<em>` element
	em => "em",
	/// Creates a `<small>` element
	small => "small",
	/// Creates a `<br>` element
	br => "br",
	/// Creates an `<hr>` element
	hr => "hr",
	/// Creates a `<table>` element
	table => "table",
	/// Creates a `<thead>` element
	thead => "thead",
	/// Creates a `<tbody>` element
	tbody => "tbody",
	/// Creates a `<tr>` element
	tr => "tr",
	/// Creates a `<th>` element
	th => "th",
	/// Creates a `<td>` element
	td => "td",
	/// Creates a `<details>` element
	details => "details",
	/// Creates a `<summary>` element
	summary => "summary",
	/// Creates a `<progress>` element
	progress => "progress",
	/// Creates a `<template>` element
	template => "template",
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;
	use seraph_core::reactive::Signal;

	#[rstest]
	#[case("div")]
	#[case("section")]
	#[case("template")]
	fn test_factory_finds_known_tags(#[case] tag: &str) {
		let make = factory(tag).unwrap();
		assert_eq!(make().build().tag_name(), tag);
	}

	#[rstest]
	#[case("marquee")]
	#[case("")]
	fn test_factory_unknown_tag(#[case] tag: &str) {
		assert!(factory(tag).is_none());
	}

	#[rstest]
	fn test_every_tag_has_a_factory() {
		for tag in TAGS {
			assert!(factory(tag).is_some(), "missing factory for {tag}");
		}
	}

	#[rstest]
	fn test_try_create_rejects_invalid_tag() {
		let result = try_create("no spaces", Props::new());
		assert!(matches!(result, Err(DomError::InvalidTag(_))));
	}

	#[rstest]
	fn test_create_any_tag_applies_props() {
		let element = create("my-widget", Props::new().class("fancy").text("x"));
		assert_eq!(element.to_html(), r#"<my-widget class="fancy">x</my-widget>"#);
	}

	#[rstest]
	fn test_create_with_receives_element() {
		let seen = Signal::new(String::new());
		let sink = seen.clone();
		let element = create_with("input", move |el| {
			sink.set(el.tag_name());
			Props::new().attr("value", "typed")
		});

		assert_eq!(seen.get(), "input");
		assert_eq!(element.property("value"), Some(crate::dom::AttrValue::Text("typed".into())));
	}

	#[rstest]
	fn test_builder_text_and_children() {
		let count = Signal::new(1);
		let label = seraph_core::reactive::computed(count.clone(), |n: &i32| format!("n={n}"));
		let element = div().class("counter").child(span().text(label)).build();

		assert_eq!(element.to_html(), r#"<div class="counter"><span>n=1</span></div>"#);
		count.set(2);
		assert_eq!(element.text_content(), "n=2");
	}
}
