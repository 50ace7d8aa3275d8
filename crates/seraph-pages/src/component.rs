//! Component trait definition.

use crate::dom::{Element, Node};

/// Trait for reusable UI components.
///
/// # Example
///
/// ```ignore
/// use seraph_pages::component::Component;
/// use seraph_pages::builder::html::div;
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self) -> Element {
///         div().class("greeting").text(format!("Hello, {}!", self.name)).build()
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component to a fresh element.
	fn render(&self) -> Element;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;

	/// Renders the component as a child node.
	fn into_node(self) -> Node
	where
		Self: Sized,
	{
		Node::Element(self.render())
	}

	/// Renders the component to HTML.
	#[cfg(not(target_arch = "wasm32"))]
	fn render_to_string(&self) -> String {
		self.render().to_html()
	}
}
