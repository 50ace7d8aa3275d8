//! Navigation history.
//!
//! [`History`] is an observable [`Location`]: the current URL plus every URL
//! before it. It is backed by a signal holding the URL stack, so anything
//! derived from it re-runs on every navigation.
//!
//! In the browser, [`History::navigate`] and [`History::back`] also drive
//! `window.history`, and `popstate` events (the browser's own back and forward
//! buttons) are folded back into the stack. Elsewhere the stack lives only in
//! memory.

use std::fmt;
use std::rc::Rc;

use seraph_core::info_log;
use seraph_core::reactive::{Computed, Listener, Observable, Signal, Subscription, computed};
use url::Url;

use super::error::RouterError;

/// URL the in-memory history starts at.
pub const DEFAULT_URL: &str = "http://localhost/";

/// The current URL and the ones visited before it, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Current URL.
	pub url: Url,
	/// Earlier URLs, oldest first.
	pub previous: Vec<Url>,
}

struct Inner {
	urls: Signal<Vec<Url>>,
	location: Computed<Vec<Url>, Location>,
	#[cfg(target_arch = "wasm32")]
	_popstate: Option<browser::PopStateListener>,
}

/// Observable navigation history. Clones share the same stack.
#[derive(Clone)]
pub struct History {
	inner: Rc<Inner>,
}

fn location_of(initial: Url) -> impl Fn(&Vec<Url>) -> Location + 'static {
	move |urls: &Vec<Url>| match urls.split_last() {
		Some((url, previous)) => Location {
			url: url.clone(),
			previous: previous.to_vec(),
		},
		None => Location {
			url: initial.clone(),
			previous: Vec::new(),
		},
	}
}

fn parse(url: &str) -> Result<Url, RouterError> {
	Url::parse(url).map_err(|source| RouterError::InvalidUrl {
		url: url.to_string(),
		source,
	})
}

impl History {
	fn from_url(initial: Url) -> Self {
		let urls = Signal::new(vec![initial.clone()]);
		let location = computed(urls.clone(), location_of(initial));
		Self {
			inner: Rc::new(Inner {
				urls,
				location,
				#[cfg(target_arch = "wasm32")]
				_popstate: None,
			}),
		}
	}

	/// History for the current page.
	///
	/// In the browser this starts at `window.location` and listens for
	/// `popstate`. Elsewhere it is an in-memory history at [`DEFAULT_URL`].
	///
	/// # Errors
	///
	/// Returns [`RouterError::Dom`] when there is no window, and
	/// [`RouterError::InvalidUrl`] if the page URL does not parse.
	#[cfg(target_arch = "wasm32")]
	pub fn browser() -> Result<Self, RouterError> {
		let initial = parse(&browser::current_href()?)?;
		let urls = Signal::new(vec![initial.clone()]);
		let location = computed(urls.clone(), location_of(initial));
		let popstate = browser::PopStateListener::attach(urls.clone())?;
		Ok(Self {
			inner: Rc::new(Inner {
				urls,
				location,
				_popstate: Some(popstate),
			}),
		})
	}

	/// History for the current page.
	///
	/// In the browser this starts at `window.location` and listens for
	/// `popstate`. Elsewhere it is an in-memory history at [`DEFAULT_URL`].
	///
	/// # Errors
	///
	/// Returns [`RouterError::Dom`] when there is no window, and
	/// [`RouterError::InvalidUrl`] if the page URL does not parse.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn browser() -> Result<Self, RouterError> {
		Self::with_url(DEFAULT_URL)
	}

	/// In-memory history starting at `url`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidUrl`] if `url` is not absolute.
	pub fn with_url(url: &str) -> Result<Self, RouterError> {
		parse(url).map(Self::from_url)
	}

	/// The current location.
	pub fn location(&self) -> Location {
		self.inner.location.current()
	}

	/// The current URL.
	pub fn url(&self) -> Url {
		self.location().url
	}

	/// Number of entries, the current one included.
	pub fn len(&self) -> usize {
		self.inner.urls.with(Vec::len)
	}

	/// Always `false`; a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Resolves `target` against the site origin.
	///
	/// Absolute URLs are kept as-is; paths are taken from the origin root.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidUrl`] if `target` cannot be resolved.
	pub fn resolve(&self, target: &str) -> Result<Url, RouterError> {
		let invalid = |source| RouterError::InvalidUrl {
			url: target.to_string(),
			source,
		};
		self.url()
			.join("/")
			.and_then(|origin| origin.join(target))
			.map_err(invalid)
	}

	/// Navigates to `target`.
	///
	/// With `replace` the current entry is swapped for the new one; otherwise
	/// the new entry is pushed.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidUrl`] if `target` cannot be resolved, and
	/// [`RouterError::NavigationFailed`] if the browser refuses the change.
	pub fn navigate(&self, target: &str, replace: bool) -> Result<(), RouterError> {
		let url = self.resolve(target)?;

		#[cfg(target_arch = "wasm32")]
		browser::write_state(&url, target, replace)?;

		info_log!("navigate to {} (replace: {})", url, replace);
		self.inner.urls.update(|urls| {
			if replace {
				urls.pop();
			}
			urls.push(url);
		});
		Ok(())
	}

	/// Goes back one entry.
	///
	/// The stack is popped right away rather than waiting for the browser.
	/// The initial entry is never popped.
	pub fn back(&self) {
		#[cfg(target_arch = "wasm32")]
		browser::go_back();

		if self.len() > 1 {
			self.inner.urls.update(|urls| {
				urls.pop();
			});
		}
	}

	/// Re-emits the current location without changing it.
	pub fn reload(&self) {
		self.inner.urls.trigger();
	}
}

impl Observable for History {
	type Value = Location;

	fn current(&self) -> Location {
		self.location()
	}

	fn subscribe(&self, listener: Listener<Location>) -> Subscription {
		self.inner.location.subscribe(listener)
	}
}

impl fmt::Debug for History {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let urls: Vec<String> = self
			.inner
			.urls
			.with(|urls| urls.iter().map(Url::to_string).collect());
		f.debug_struct("History").field("urls", &urls).finish()
	}
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use seraph_core::reactive::Signal;
	use url::Url;
	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;

	use super::RouterError;
	use crate::dom::DomError;

	fn window() -> Result<web_sys::Window, RouterError> {
		web_sys::window().ok_or_else(|| DomError::Unavailable("no global `window`".to_string()).into())
	}

	fn js_message(value: JsValue) -> String {
		value.as_string().unwrap_or_else(|| format!("{value:?}"))
	}

	pub(super) fn current_href() -> Result<String, RouterError> {
		window()?
			.location()
			.href()
			.map_err(|e| RouterError::NavigationFailed(js_message(e)))
	}

	pub(super) fn write_state(url: &Url, title: &str, replace: bool) -> Result<(), RouterError> {
		let history = window()?
			.history()
			.map_err(|e| RouterError::NavigationFailed(js_message(e)))?;
		let state = js_sys::Object::new();
		js_sys::Reflect::set(&state, &"url".into(), &url.as_str().into())
			.and_then(|_| js_sys::Reflect::set(&state, &"title".into(), &title.into()))
			.map_err(|e| RouterError::NavigationFailed(js_message(e)))?;
		let result = if replace {
			history.replace_state_with_url(&state, title, Some(url.as_str()))
		} else {
			history.push_state_with_url(&state, title, Some(url.as_str()))
		};
		result.map_err(|e| RouterError::NavigationFailed(js_message(e)))
	}

	pub(super) fn go_back() {
		if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
			if let Err(_error) = history.back() {
				seraph_core::warn_log!("history.back() failed: {:?}", _error);
			}
		}
	}

	/// Folds `popstate` into the URL stack. Removed on drop.
	pub(super) struct PopStateListener {
		window: web_sys::Window,
		closure: Closure<dyn FnMut(web_sys::PopStateEvent)>,
	}

	impl PopStateListener {
		pub(super) fn attach(urls: Signal<Vec<Url>>) -> Result<Self, RouterError> {
			let window = window()?;
			let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_event: web_sys::PopStateEvent| {
				let Ok(href) = current_href() else {
					return;
				};
				let Ok(url) = Url::parse(&href) else {
					return;
				};
				reconcile(&urls, url);
			});
			window
				.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
				.map_err(|e| RouterError::NavigationFailed(js_message(e)))?;
			Ok(Self { window, closure })
		}
	}

	impl Drop for PopStateListener {
		fn drop(&mut self) {
			if let Err(_error) = self
				.window
				.remove_event_listener_with_callback("popstate", self.closure.as_ref().unchecked_ref())
			{
				seraph_core::warn_log!("popstate listener not removed: {:?}", _error);
			}
		}
	}

	/// The stack already ends at `url` after an optimistic `back()`. If it is
	/// the entry before that, this was a browser back. Anything else is a
	/// forward move.
	fn reconcile(urls: &Signal<Vec<Url>>, url: Url) {
		let (is_current, is_previous) = urls.with(|urls| {
			let n = urls.len();
			(
				urls.last() == Some(&url),
				n >= 2 && urls.get(n - 2) == Some(&url),
			)
		});
		if is_current {
			return;
		}
		urls.update(|urls| {
			if is_previous {
				urls.pop();
			} else {
				urls.push(url);
			}
		});
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;
	use seraph_core::reactive::ObservableExt;

	fn paths(history: &History) -> Vec<String> {
		let location = history.location();
		location
			.previous
			.iter()
			.chain(std::iter::once(&location.url))
			.map(|url| url.path().to_string())
			.collect()
	}

	#[test]
	fn test_browser_starts_at_default_url() {
		let history = History::browser().unwrap();
		assert_eq!(history.url().as_str(), DEFAULT_URL);
		assert_eq!(history.len(), 1);
		assert!(history.location().previous.is_empty());
	}

	#[test]
	fn test_with_url_rejects_relative() {
		assert!(matches!(History::with_url("/relative"), Err(RouterError::InvalidUrl { .. })));
	}

	#[rstest]
	#[case("/users", "http://example.com/users")]
	#[case("users", "http://example.com/users")]
	#[case("/a?b=1#c", "http://example.com/a?b=1#c")]
	#[case("https://other.org/x", "https://other.org/x")]
	fn test_resolve_against_origin(#[case] target: &str, #[case] expected: &str) {
		let history = History::with_url("http://example.com/deep/page").unwrap();
		assert_eq!(history.resolve(target).unwrap().as_str(), expected);
	}

	#[test]
	fn test_navigate_push_and_replace() {
		let history = History::with_url("http://example.com/").unwrap();
		history.navigate("/a", false).unwrap();
		history.navigate("/b", false).unwrap();
		history.navigate("/c", true).unwrap();

		assert_eq!(paths(&history), vec!["/", "/a", "/c"]);
	}

	#[test]
	fn test_replace_initial_entry() {
		let history = History::with_url("http://example.com/").unwrap();
		history.navigate("/start", true).unwrap();

		assert_eq!(paths(&history), vec!["/start"]);
	}

	#[test]
	fn test_back_never_pops_initial_entry() {
		let history = History::with_url("http://example.com/").unwrap();
		history.navigate("/a", false).unwrap();

		history.back();
		history.back();

		assert_eq!(paths(&history), vec!["/"]);
	}

	#[test]
	fn test_subscribers_see_every_navigation_and_reload() {
		let history = History::with_url("http://example.com/").unwrap();
		let seen = Signal::new(Vec::<String>::new());
		let sink = seen.clone();
		let _subscription = history.watch(move |location: &Location| {
			let path = location.url.path().to_string();
			sink.update(|seen| seen.push(path));
		});

		history.navigate("/a", false).unwrap();
		history.reload();
		history.back();

		assert_eq!(seen.get(), vec!["/", "/a", "/a", "/"]);
	}
}
