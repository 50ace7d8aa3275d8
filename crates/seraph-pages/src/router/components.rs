//! Router components for navigation.
//!
//! [`Link`] and [`Redirect`] navigate through a [`Router`]; [`RouterOutlet`]
//! shows whatever a [`Provider`] currently selects.

use seraph_core::reactive::ReadSignal;

use super::core::{Provider, Router, navigate_logged};
use super::history::History;
use crate::builder::html::{a, div, span};
use crate::component::Component;
use crate::dom::{Element, Node};
use crate::spawn::spawn_deferred;

/// An anchor that navigates without a full page reload.
///
/// Clicks are intercepted: the default action is prevented and the router's
/// history is updated instead.
///
/// # Example
///
/// ```ignore
/// let link = router.link("/users/42", "View User").class("nav-link");
/// nav().child(link.render()).build()
/// ```
#[derive(Clone)]
pub struct Link {
	history: History,
	to: String,
	content: Node,
	class: Option<String>,
	replace: bool,
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a new link.
	pub fn new(router: &Router, to: impl Into<String>, content: impl Into<Node>) -> Self {
		Self {
			history: router.history().clone(),
			to: to.into(),
			content: content.into(),
			class: None,
			replace: false,
			attrs: Vec::new(),
		}
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the destination.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}
}

impl Component for Link {
	fn render(&self) -> Element {
		let mut anchor = a().attr("href", self.to.as_str()).attr("data-link", "true");

		if let Some(class) = &self.class {
			anchor = anchor.class(class.as_str());
		}
		if self.replace {
			anchor = anchor.attr("data-replace", "true");
		}
		for (name, value) in &self.attrs {
			anchor = anchor.attr(name, value.as_str());
		}

		let history = self.history.clone();
		let to = self.to.clone();
		let replace = self.replace;
		anchor
			.child(self.content.clone())
			.on_click(move |event| {
				event.prevent_default();
				navigate_logged(&history, &to, replace);
			})
			.build()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// Navigates once rendered.
///
/// The navigation is deferred until the current render pass finishes, and
/// the rendered element is an empty `<span>`.
#[derive(Clone)]
pub struct Redirect {
	history: History,
	to: String,
	replace: bool,
}

impl Redirect {
	/// Creates a new redirect.
	pub fn new(router: &Router, to: impl Into<String>) -> Self {
		Self {
			history: router.history().clone(),
			to: to.into(),
			replace: false,
		}
	}

	/// Sets whether to use replace navigation.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the destination.
	pub fn to(&self) -> &str {
		&self.to
	}
}

impl Component for Redirect {
	fn render(&self) -> Element {
		let history = self.history.clone();
		let to = self.to.clone();
		let replace = self.replace;
		spawn_deferred(move || navigate_logged(&history, &to, replace));
		span().build()
	}

	fn name() -> &'static str {
		"Redirect"
	}
}

/// A `<div data-router-outlet>` whose children follow a provider's outlet.
///
/// # Example
///
/// ```ignore
/// let provider = router.provider(routes);
/// let app = main().child(RouterOutlet::new(&provider).id("app").render()).build();
/// ```
#[derive(Clone)]
pub struct RouterOutlet {
	outlet: ReadSignal<Element>,
	id: Option<String>,
	class: Option<String>,
}

impl RouterOutlet {
	/// Creates an outlet for `provider`.
	pub fn new(provider: &Provider) -> Self {
		Self {
			outlet: provider.outlet.clone(),
			id: None,
			class: None,
		}
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

impl Component for RouterOutlet {
	fn render(&self) -> Element {
		let mut el = div().attr("data-router-outlet", "true");

		if let Some(id) = &self.id {
			el = el.id(id.as_str());
		}
		if let Some(class) = &self.class {
			el = el.class(class.as_str());
		}

		el.children(self.outlet.clone()).build()
	}

	fn name() -> &'static str {
		"RouterOutlet"
	}
}
