//! Binding layer
//!
//! [`Props`] collects what should be applied to an element: class list, inline
//! style, child list, attributes and event listeners. Each of them may be a
//! plain value or any signal, and [`apply`] writes plain values once and keeps
//! reactive ones in sync.
//!
//! Every emission overwrites the whole facet. A class signal replaces the full
//! `className`, a children signal replaces the full child list.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::binding::{Props, apply};
//! use seraph_pages::Signal;
//!
//! let active = Signal::new(false);
//! let classes = active.clone().map(|on| if *on { "tab active" } else { "tab" });
//!
//! apply(&tab, Props::new()
//!     .class(classes)
//!     .attr("aria-selected", active.clone())
//!     .child("Overview")
//!     .on_click(move |_| active.set(true)));
//! ```

use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use seraph_core::reactive::{Bindable, IntoBindable};

use crate::dom::{AttrValue, Children, Element, Event, Facet, Node};

/// Shared event handler.
pub type Handler = Rc<dyn Fn(&Event)>;

/// A class list, rendered space separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classes(Vec<String>);

impl Classes {
	/// Renders the list as a `className`.
	pub fn to_class_name(&self) -> String {
		self.0.join(" ")
	}

	/// The individual class names.
	pub fn names(&self) -> &[String] {
		&self.0
	}
}

impl From<&str> for Classes {
	fn from(value: &str) -> Self {
		Self(value.split_whitespace().map(str::to_string).collect())
	}
}

impl From<String> for Classes {
	fn from(value: String) -> Self {
		Self::from(value.as_str())
	}
}

impl From<Vec<String>> for Classes {
	fn from(value: Vec<String>) -> Self {
		Self(value)
	}
}

impl From<Vec<&str>> for Classes {
	fn from(value: Vec<&str>) -> Self {
		Self(value.into_iter().map(str::to_string).collect())
	}
}

impl<const N: usize> From<[&str; N]> for Classes {
	fn from(value: [&str; N]) -> Self {
		Self(value.into_iter().map(str::to_string).collect())
	}
}

/// A whole inline style. Entries with `None` are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap(BTreeMap<String, Option<String>>);

impl StyleMap {
	/// An empty style.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces one property.
	pub fn set(mut self, name: impl Into<String>, value: impl Into<Option<String>>) -> Self {
		self.0.insert(name.into(), value.into());
		self
	}

	/// Properties that carry a value.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0
			.iter()
			.filter_map(|(name, value)| value.as_deref().map(|value| (name.as_str(), value)))
	}
}

impl From<&str> for StyleMap {
	/// Parses `name: value; name: value` declarations.
	fn from(css: &str) -> Self {
		let entries = css.split(';').filter_map(|declaration| {
			let (name, value) = declaration.split_once(':')?;
			let name = name.trim();
			(!name.is_empty()).then(|| (name.to_string(), Some(value.trim().to_string())))
		});
		Self(entries.collect())
	}
}

impl From<String> for StyleMap {
	fn from(css: String) -> Self {
		Self::from(css.as_str())
	}
}

impl From<Vec<(&str, &str)>> for StyleMap {
	fn from(entries: Vec<(&str, &str)>) -> Self {
		Self(
			entries
				.into_iter()
				.map(|(name, value)| (name.to_string(), Some(value.to_string())))
				.collect(),
		)
	}
}

impl<const N: usize> From<[(&str, &str); N]> for StyleMap {
	fn from(entries: [(&str, &str); N]) -> Self {
		Self::from(entries.to_vec())
	}
}

impl From<BTreeMap<String, String>> for StyleMap {
	fn from(entries: BTreeMap<String, String>) -> Self {
		Self(entries.into_iter().map(|(name, value)| (name, Some(value))).collect())
	}
}

macro_rules! static_into {
	($target:ty => $($source:ty),* $(,)?) => {
		$(
			impl IntoBindable<$target> for $source {
				fn into_bindable(self) -> Bindable<$target> {
					Bindable::Static(self.into())
				}
			}
		)*
	};
}

static_into!(Classes => Classes, &str, String, Vec<String>, Vec<&str>);
static_into!(StyleMap => StyleMap, &str, String, Vec<(&str, &str)>, BTreeMap<String, String>);
static_into!(AttrValue => AttrValue, &str, String, bool, f64, f32, i32, u32, i16, u16, i8, u8);
static_into!(AttrValue => Option<&str>, Option<String>, Option<bool>);
static_into!(Children => Children, Element, Node, &str, String, Vec<Element>, Vec<Node>, Vec<String>, Option<Element>);

impl<const N: usize> IntoBindable<Classes> for [&str; N] {
	fn into_bindable(self) -> Bindable<Classes> {
		Bindable::Static(self.into())
	}
}

impl<const N: usize> IntoBindable<StyleMap> for [(&str, &str); N] {
	fn into_bindable(self) -> Bindable<StyleMap> {
		Bindable::Static(self.into())
	}
}

/// Properties applied to an element by [`apply`].
#[derive(Default)]
pub struct Props {
	classes: Option<Bindable<Classes>>,
	style: Option<Bindable<StyleMap>>,
	style_properties: Vec<(String, Bindable<Option<String>>)>,
	children: Option<Bindable<Children>>,
	static_children: Children,
	attributes: Vec<(String, Bindable<AttrValue>)>,
	events: Vec<(String, Handler)>,
}

impl Props {
	/// An empty property set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the class list. Strings are split on whitespace.
	pub fn class(mut self, classes: impl IntoBindable<Classes>) -> Self {
		self.classes = Some(classes.into_bindable());
		self
	}

	/// Sets the `id` attribute.
	pub fn id(self, id: impl IntoBindable<AttrValue>) -> Self {
		self.attr("id", id)
	}

	/// Binds one inline style property. `None` removes it.
	pub fn style(mut self, name: &str, value: impl IntoBindable<Option<String>>) -> Self {
		self.style_properties.retain(|(existing, _)| existing != name);
		self.style_properties.push((name.to_string(), value.into_bindable()));
		self
	}

	/// Replaces the whole inline style.
	pub fn styles(mut self, style: impl IntoBindable<StyleMap>) -> Self {
		self.style = Some(style.into_bindable());
		self
	}

	/// Binds an attribute. [`AttrValue::Absent`] removes it.
	pub fn attr(mut self, name: &str, value: impl IntoBindable<AttrValue>) -> Self {
		self.attributes.retain(|(existing, _)| existing != name);
		self.attributes.push((name.to_string(), value.into_bindable()));
		self
	}

	/// Appends one static child.
	///
	/// Ignored when [`Props::children`] is also set.
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.static_children.push(child);
		self
	}

	/// Shorthand for a single text child.
	pub fn text(self, text: impl Into<String>) -> Self {
		self.child(Node::Text(text.into()))
	}

	/// Sets the full child list, static or reactive.
	///
	/// On each emission, elements dropped from the list are disposed and do
	/// not rebind if a later list includes them again. See [`Children`].
	pub fn children(mut self, children: impl IntoBindable<Children>) -> Self {
		self.children = Some(children.into_bindable());
		self
	}

	/// Adds an event listener. Listeners accumulate.
	pub fn on<F>(mut self, event: &str, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.events.push((event.to_string(), Rc::new(handler)));
		self
	}

	/// Adds a `click` listener.
	#[inline]
	pub fn on_click<F>(self, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("click", handler)
	}

	/// Adds an `input` listener.
	#[inline]
	pub fn on_input<F>(self, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("input", handler)
	}

	/// Adds a `change` listener.
	#[inline]
	pub fn on_change<F>(self, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("change", handler)
	}

	/// Adds a `submit` listener.
	#[inline]
	pub fn on_submit<F>(self, handler: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.on("submit", handler)
	}

	/// Whether any property has been set.
	pub fn is_empty(&self) -> bool {
		self.classes.is_none()
			&& self.style.is_none()
			&& self.style_properties.is_empty()
			&& self.children.is_none()
			&& self.static_children.is_empty()
			&& self.attributes.is_empty()
			&& self.events.is_empty()
	}
}

impl fmt::Debug for Props {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let attributes: Vec<&str> = self.attributes.iter().map(|(name, _)| name.as_str()).collect();
		let events: Vec<&str> = self.events.iter().map(|(name, _)| name.as_str()).collect();
		f.debug_struct("Props")
			.field("classes", &self.classes)
			.field("style", &self.style)
			.field("children", &(self.children.is_some() || !self.static_children.is_empty()))
			.field("attributes", &attributes)
			.field("events", &events)
			.finish()
	}
}

/// Applies `props` to `element`.
///
/// Facets are written in a fixed order: class list, style, children,
/// attributes, then listeners. Re-applying a facet releases the subscription
/// bound to it by an earlier call.
pub fn apply(element: &Element, props: Props) {
	let Props {
		classes,
		style,
		style_properties,
		children,
		static_children,
		attributes,
		events,
	} = props;

	if let Some(classes) = classes {
		element.bind(Facet::Class, classes, |element, classes: &Classes| {
			element.set_class_name(&classes.to_class_name());
		});
	}

	if let Some(style) = style {
		element.bind(Facet::Style, style, |element, style: &StyleMap| {
			element.clear_style();
			for (name, value) in style.iter() {
				element.set_style(name, Some(value));
			}
		});
	}

	for (name, value) in style_properties {
		let property = name.clone();
		element.bind(Facet::StyleProperty(name), value, move |element, value: &Option<String>| {
			element.set_style(&property, value.as_deref());
		});
	}

	let children = children.or_else(|| {
		(!static_children.is_empty()).then(|| Bindable::Static(static_children))
	});
	if let Some(children) = children {
		element.bind(Facet::Children, children, |element, children: &Children| {
			element.replace_children(children);
		});
	}

	for (name, value) in attributes {
		let attribute = name.clone();
		element.bind(Facet::Attribute(name), value, move |element, value: &AttrValue| {
			element.apply_attribute(&attribute, value);
		});
	}

	for (event, handler) in events {
		element.on(&event, move |e| handler(e));
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::dom::document;
	use rstest::rstest;
	use seraph_core::reactive::{ObservableExt, Signal};

	fn element(tag: &str) -> Element {
		document().create_element(tag).unwrap()
	}

	#[rstest]
	#[case("a b  c", vec!["a", "b", "c"])]
	#[case("", vec![])]
	#[case("  solo ", vec!["solo"])]
	fn test_classes_split_whitespace(#[case] input: &str, #[case] expected: Vec<&str>) {
		assert_eq!(Classes::from(input), Classes::from(expected));
	}

	#[rstest]
	fn test_style_map_parses_declarations() {
		let style = StyleMap::from("color: red; margin : 0 ;;bad");
		let entries: Vec<(&str, &str)> = style.iter().collect();
		assert_eq!(entries, vec![("color", "red"), ("margin", "0")]);
	}

	#[rstest]
	fn test_apply_static_props() {
		let div = element("div");
		apply(
			&div,
			Props::new()
				.class(["card", "wide"])
				.style("color", "red")
				.attr("data-id", 7)
				.child("hello"),
		);

		assert_eq!(div.class_name(), "card wide");
		assert_eq!(div.style("color").as_deref(), Some("red"));
		assert_eq!(div.attribute("data-id").as_deref(), Some("7"));
		assert_eq!(div.text_content(), "hello");
		assert_eq!(div.bound_facets(), 0);
	}

	#[rstest]
	fn test_reactive_class_overwrites_whole_class_name() {
		let div = element("div");
		let active = Signal::new(false);
		let classes = active.clone().map(|on| if *on { "tab active" } else { "tab" });

		apply(&div, Props::new().class(classes));
		assert_eq!(div.class_name(), "tab");

		active.set(true);
		assert_eq!(div.class_name(), "tab active");
		active.set(false);
		assert_eq!(div.class_name(), "tab");
	}

	#[rstest]
	fn test_reactive_style_property_none_removes() {
		let div = element("div");
		let color = Signal::new(Some("red".to_string()));

		apply(&div, Props::new().style("color", color.clone()));
		assert_eq!(div.style("color").as_deref(), Some("red"));

		color.set(None);
		assert_eq!(div.style("color"), None);
	}

	#[rstest]
	fn test_whole_style_replaced_on_emission() {
		let div = element("div");
		let style = Signal::new(StyleMap::new().set("color", "red".to_string()));

		apply(&div, Props::new().styles(style.clone()));
		style.set(StyleMap::new().set("margin", "0".to_string()));

		assert_eq!(div.style("color"), None);
		assert_eq!(div.style("margin").as_deref(), Some("0"));
	}

	#[rstest]
	fn test_reactive_attribute_absent_removes() {
		let link = element("a");
		let title: Signal<Option<String>> = Signal::new(Some("Home".to_string()));

		apply(&link, Props::new().attr("title", title.clone()));
		assert_eq!(link.attribute("title").as_deref(), Some("Home"));

		title.set(None);
		assert_eq!(link.attribute("title"), None);
	}

	#[rstest]
	fn test_checked_goes_to_property() {
		let checkbox = element("input");
		let checked = Signal::new(true);

		apply(&checkbox, Props::new().attr("type", "checkbox").attr("checked", checked.clone()));
		assert_eq!(checkbox.property("checked"), Some(AttrValue::Bool(true)));
		assert_eq!(checkbox.attribute("checked"), None);

		checked.set(false);
		assert_eq!(checkbox.property("checked"), Some(AttrValue::Bool(false)));
	}

	#[rstest]
	fn test_children_signal_replaces_full_list() {
		let list = element("ul");
		let items = Signal::new(vec!["a".to_string(), "b".to_string()]);
		let rows = items.clone().map(|items: &Vec<String>| {
			items
				.iter()
				.map(|item| {
					let li = element("li");
					li.append_text(item);
					li
				})
				.collect::<Vec<Element>>()
		});

		apply(&list, Props::new().children(rows));
		assert_eq!(list.child_count(), 2);

		items.set(vec!["c".to_string()]);
		assert_eq!(list.to_html(), "<ul><li>c</li></ul>");
	}

	#[rstest]
	fn test_reapply_releases_previous_subscription() {
		let div = element("div");
		let first = Signal::new("one".to_string());

		apply(&div, Props::new().class(first.clone()));
		apply(&div, Props::new().class("fixed"));
		first.set("two".to_string());

		assert_eq!(div.class_name(), "fixed");
		assert_eq!(first.listener_count(), 0);
	}

	#[rstest]
	fn test_events_accumulate() {
		let button = element("button");
		let clicks = Signal::new(0);

		let counter = clicks.clone();
		apply(&button, Props::new().on_click(move |_| counter.update(|n| *n += 1)));
		let counter = clicks.clone();
		apply(&button, Props::new().on_click(move |_| counter.update(|n| *n += 10)));

		button.click();
		assert_eq!(clicks.get(), 11);
	}
}
