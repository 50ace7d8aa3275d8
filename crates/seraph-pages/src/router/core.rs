//! Core Router Implementation.
//!
//! [`Router`] turns a [`History`] into `href`, `path` and `search` signals.
//! [`provider`] turns a path signal and a [`Routes`] table into the signals a
//! page is built from: which route is selected, its parameters, the rendered
//! page and the outlet element (page or fallback).

use std::fmt;
use std::rc::Rc;

use seraph_core::reactive::{Observable, ObservableExt, ReadSignal, computed};
use seraph_core::{error_log, info_log, warn_log};

use super::components::{Link, Redirect};
use super::error::{PathError, RouterError};
use super::history::{History, Location};
use super::params::{FromPath, Params};
use super::path::{MatchResult, Path, match_path};
use crate::builder::html::div;
use crate::dom::{Element, Node};

type Render = Rc<dyn Fn(&Params) -> Option<Element>>;
type Fallback = Rc<dyn Fn() -> Element>;

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	path: Path,
	render: Render,
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route").field("path", &self.path.to_string()).finish()
	}
}

impl Route {
	/// Creates a route whose component receives the raw captures.
	pub fn new<F>(path: &str, component: F) -> Self
	where
		F: Fn(&Params) -> Element + 'static,
	{
		Self {
			path: Path::compile(path),
			render: Rc::new(move |params| Some(component(params))),
		}
	}

	/// Creates a route that parses its captures before rendering.
	///
	/// When `parser` fails the error is logged and the outlet shows the
	/// not-found fallback instead.
	pub fn parsed<P, Parse, C>(path: &str, parser: Parse, component: C) -> Self
	where
		Parse: Fn(&Params) -> Result<P, PathError> + 'static,
		C: Fn(P) -> Element + 'static,
	{
		let pattern = path.to_string();
		Self {
			path: Path::compile(path),
			render: Rc::new(move |params| match parser(params) {
				Ok(props) => Some(component(props)),
				Err(_error) => {
					warn_log!("route {} rejected its parameters: {}", pattern, _error);
					None
				}
			}),
		}
	}

	/// Creates a route whose captures are extracted with [`FromPath`].
	///
	/// ```ignore
	/// Route::typed("/users/:id/posts/:post", |(user, post): (u64, u32)| {
	///     p().text(format!("{user}/{post}")).build()
	/// })
	/// ```
	pub fn typed<P, C>(path: &str, component: C) -> Self
	where
		P: FromPath + 'static,
		C: Fn(P) -> Element + 'static,
	{
		Self::parsed(path, P::from_path, component)
	}

	/// The compiled path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Renders the component, or `None` if the captures were rejected.
	pub fn render(&self, params: &Params) -> Option<Element> {
		(self.render)(params)
	}
}

/// Route table, matched in registration order.
#[derive(Clone, Default)]
pub struct Routes {
	routes: Vec<Route>,
	not_found: Option<Fallback>,
}

impl fmt::Debug for Routes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Routes")
			.field("routes", &self.routes)
			.field("has_not_found", &self.not_found.is_some())
			.finish()
	}
}

/// The route chosen for a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
	/// Position in the route table.
	pub index: usize,
	/// The matching route path.
	pub path: Path,
	/// Captured parameters.
	pub params: Params,
}

impl Routes {
	/// An empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a route built from a path and a component.
	pub fn route<F>(self, path: &str, component: F) -> Self
	where
		F: Fn(&Params) -> Element + 'static,
	{
		self.add(Route::new(path, component))
	}

	/// Adds a prepared route.
	pub fn add(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Sets the component shown when nothing matches.
	pub fn not_found<F>(mut self, component: F) -> Self
	where
		F: Fn() -> Element + 'static,
	{
		self.not_found = Some(Rc::new(component));
		self
	}

	/// Registered routes in order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether no routes are registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Finds the first route matching `href`.
	pub fn select(&self, href: &str) -> Option<Selected> {
		self.routes
			.iter()
			.enumerate()
			.find_map(|(index, route)| match match_path(&route.path, href) {
				MatchResult::Matched(params) => Some(Selected {
					index,
					path: route.path.clone(),
					params,
				}),
				MatchResult::Unmatched => None,
			})
	}

	/// Fallback used when nothing matches: the explicit not-found component,
	/// else a lone `*` route, else a plain "Not found..." message.
	fn fallback(&self) -> Fallback {
		if let Some(not_found) = &self.not_found {
			return Rc::clone(not_found);
		}
		if let Some(catch_all) = self.routes.iter().find(|route| route.path.is_catch_all()).cloned() {
			return Rc::new(move || {
				catch_all
					.render(&Params::default())
					.unwrap_or_else(default_not_found)
			});
		}
		Rc::new(default_not_found)
	}
}

fn default_not_found() -> Element {
	div().text("Not found...").build()
}

/// Signals derived from a route table.
///
/// `page` and `outlet` re-render the route component on every emission, and
/// separately for each subscriber.
#[derive(Clone)]
pub struct Provider {
	/// The matched route, if any.
	pub selected: ReadSignal<Option<Selected>>,
	/// Captures of the matched route, empty when nothing matched.
	pub params: ReadSignal<Params>,
	/// The matched route's element, if any route matched and rendered.
	pub page: ReadSignal<Option<Element>>,
	/// The page, or the not-found fallback.
	pub outlet: ReadSignal<Element>,
	routes: Rc<Routes>,
}

impl Provider {
	/// The route table this provider matches against.
	pub fn routes(&self) -> &Routes {
		&self.routes
	}
}

impl fmt::Debug for Provider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Provider")
			.field("routes", &self.routes)
			.field("selected", &self.selected.get())
			.finish()
	}
}

/// Builds the route signals for `path`.
pub fn provider<S>(path: S, routes: Routes) -> Provider
where
	S: Observable<Value = String> + 'static,
{
	let routes = Rc::new(routes);

	let table = Rc::clone(&routes);
	let selected = computed(path, move |href: &String| {
		let selected = table.select(href);
		match &selected {
			Some(_route) => info_log!("route matched: {} -> {}", href, _route.path),
			None => info_log!("no route matched {}", href),
		}
		selected
	})
	.read_only();

	let params = selected
		.clone()
		.map(|selected: &Option<Selected>| {
			selected
				.as_ref()
				.map(|selected| selected.params.clone())
				.unwrap_or_default()
		})
		.read_only();

	let table = Rc::clone(&routes);
	let page = selected
		.clone()
		.map(move |selected: &Option<Selected>| {
			let selected = selected.as_ref()?;
			table.routes[selected.index].render(&selected.params)
		})
		.read_only();

	let fallback = routes.fallback();
	let outlet = page
		.clone()
		.map(move |page: &Option<Element>| match page {
			Some(page) => page.clone(),
			None => fallback(),
		})
		.read_only();

	Provider {
		selected,
		params,
		page,
		outlet,
		routes,
	}
}

/// Client-side router over a [`History`].
#[derive(Clone)]
pub struct Router {
	history: History,
	href: ReadSignal<String>,
	path: ReadSignal<String>,
	search: ReadSignal<Vec<(String, String)>>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("href", &self.href.get())
			.field("history", &self.history)
			.finish()
	}
}

impl Router {
	/// Router over the page's history. See [`History::browser`].
	///
	/// # Errors
	///
	/// Propagates the [`History::browser`] error.
	pub fn browser() -> Result<Self, RouterError> {
		History::browser().map(Self::with_history)
	}

	/// Router over an existing history.
	pub fn with_history(history: History) -> Self {
		let href = history
			.clone()
			.map(|location: &Location| location.url.as_str().to_string())
			.read_only();
		let path = history
			.clone()
			.map(|location: &Location| location.url.path().to_string())
			.read_only();
		let search = history
			.clone()
			.map(|location: &Location| {
				location
					.url
					.query_pairs()
					.map(|(key, value)| (key.into_owned(), value.into_owned()))
					.collect::<Vec<_>>()
			})
			.read_only();
		Self {
			history,
			href,
			path,
			search,
		}
	}

	/// The underlying history.
	pub fn history(&self) -> &History {
		&self.history
	}

	/// The full current URL.
	pub fn href(&self) -> &ReadSignal<String> {
		&self.href
	}

	/// The current URL path.
	pub fn path(&self) -> &ReadSignal<String> {
		&self.path
	}

	/// The decoded query pairs of the current URL, in order.
	pub fn search(&self) -> &ReadSignal<Vec<(String, String)>> {
		&self.search
	}

	/// Navigates to `target`, pushing or replacing the current entry.
	///
	/// # Errors
	///
	/// See [`History::navigate`].
	pub fn goto(&self, target: &str, replace: bool) -> Result<(), RouterError> {
		self.history.navigate(target, replace)
	}

	/// Goes back one entry. See [`History::back`].
	pub fn back(&self) {
		self.history.back();
	}

	/// Builds the route signals for this router's path.
	pub fn provider(&self, routes: Routes) -> Provider {
		provider(self.path.clone(), routes)
	}

	/// A link that navigates through this router.
	pub fn link(&self, to: impl Into<String>, content: impl Into<Node>) -> Link {
		Link::new(self, to, content)
	}

	/// A redirect that navigates through this router once rendered.
	pub fn redirect(&self, to: impl Into<String>) -> Redirect {
		Redirect::new(self, to)
	}
}

pub(super) fn navigate_logged(history: &History, target: &str, replace: bool) {
	if let Err(_error) = history.navigate(target, replace) {
		error_log!("navigation to {} failed: {}", target, _error);
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::builder::html::p;

	fn page(text: &str) -> Element {
		p().text(text.to_string()).build()
	}

	fn router() -> Router {
		Router::with_history(History::with_url("http://example.com/").unwrap())
	}

	#[test]
	fn test_router_signals_follow_history() {
		let router = router();
		router.goto("/search?q=rust&page=2", false).unwrap();

		assert_eq!(router.href().get(), "http://example.com/search?q=rust&page=2");
		assert_eq!(router.path().get(), "/search");
		assert_eq!(
			router.search().get(),
			vec![
				("q".to_string(), "rust".to_string()),
				("page".to_string(), "2".to_string())
			]
		);
	}

	#[test]
	fn test_routes_first_match_wins() {
		let routes = Routes::new()
			.route("/users/new", |_| page("new"))
			.route("/users/:id", |_| page("detail"));

		assert_eq!(routes.select("/users/new").unwrap().index, 0);
		let selected = routes.select("/users/42").unwrap();
		assert_eq!(selected.index, 1);
		assert_eq!(selected.params.get("id"), Some("42"));
		assert!(routes.select("/posts").is_none());
	}

	#[test]
	fn test_provider_params_and_outlet() {
		let router = router();
		let provider = router.provider(
			Routes::new()
				.route("/", |_| page("home"))
				.route("/users/:id", |params| page(&format!("user {}", params.get("id").unwrap_or("?")))),
		);

		assert_eq!(provider.outlet.get().text_content(), "home");
		assert!(provider.params.get().is_empty());

		router.goto("/users/7", false).unwrap();
		assert_eq!(provider.params.get().get("id"), Some("7"));
		assert_eq!(provider.outlet.get().text_content(), "user 7");
	}

	#[test]
	fn test_explicit_not_found_wins_over_catch_all() {
		let router = router();
		let provider = router.provider(
			Routes::new()
				.route("*", |_| page("catch-all"))
				.not_found(|| page("404")),
		);

		router.goto("/a/b", false).unwrap();
		assert!(provider.page.get().is_none());
		assert_eq!(provider.outlet.get().text_content(), "404");
	}

	#[test]
	fn test_lone_wildcard_is_fallback() {
		let router = router();
		let provider = router.provider(Routes::new().route("/", |_| page("home")).route("*", |_| page("catch-all")));

		router.goto("/a/b", false).unwrap();
		assert_eq!(provider.outlet.get().text_content(), "catch-all");
	}

	#[test]
	fn test_default_not_found() {
		let router = router();
		let provider = router.provider(Routes::new().route("/", |_| page("home")));

		router.goto("/missing", false).unwrap();
		assert_eq!(provider.outlet.get().to_html(), "<div>Not found...</div>");
	}

	#[test]
	fn test_parsed_route_failure_falls_back() {
		let router = router();
		let provider = router.provider(
			Routes::new()
				.add(Route::typed("/users/:id", |id: u32| page(&format!("user {id}"))))
				.not_found(|| page("404")),
		);

		router.goto("/users/12", false).unwrap();
		assert_eq!(provider.outlet.get().text_content(), "user 12");

		router.goto("/users/abc", false).unwrap();
		assert!(provider.selected.get().is_some());
		assert!(provider.page.get().is_none());
		assert_eq!(provider.outlet.get().text_content(), "404");
	}
}
