//! Path compilation and matching.
//!
//! A route path is split on `/` into components:
//!
//! | Segment | Component | Matches |
//! |---------|-----------|---------|
//! | `users` | [`PathComponent::Exact`] | the same segment |
//! | `:id` | [`PathComponent::Param`] | any one segment, captured as `id` |
//! | `*` | [`PathComponent::Wildcard`] | any one segment |
//! | `**` | [`PathComponent::Any`] | everything from here on |
//!
//! Empty segments are ignored, so `/users/`, `users` and `//users` compile to
//! the same path.

use std::fmt;

use super::params::Params;

/// One compiled path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
	/// Matches exactly this segment.
	Exact(String),
	/// Matches one segment and captures it.
	Param(String),
	/// Matches one segment without capturing it.
	Wildcard,
	/// Matches the rest of the path, including nothing.
	Any,
}

/// A compiled route path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
	components: Vec<PathComponent>,
}

/// Outcome of [`match_path`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
	/// The path does not match.
	Unmatched,
	/// The path matches with these captures.
	Matched(Params),
}

impl MatchResult {
	/// Returns `true` for [`MatchResult::Matched`].
	pub fn is_matched(&self) -> bool {
		matches!(self, Self::Matched(_))
	}

	/// The captured parameters, if matched.
	pub fn params(self) -> Option<Params> {
		match self {
			Self::Matched(params) => Some(params),
			Self::Unmatched => None,
		}
	}
}

fn segments(href: &str) -> impl Iterator<Item = &str> {
	href.split('/').filter(|segment| !segment.is_empty())
}

impl Path {
	/// Compiles a route path.
	pub fn compile(path: &str) -> Self {
		let components = segments(path)
			.map(|segment| match segment {
				"*" => PathComponent::Wildcard,
				"**" => PathComponent::Any,
				_ => match segment.strip_prefix(':') {
					Some(name) => PathComponent::Param(name.to_string()),
					None => PathComponent::Exact(segment.to_string()),
				},
			})
			.collect();
		Self { components }
	}

	/// The compiled components in order.
	pub fn components(&self) -> &[PathComponent] {
		&self.components
	}

	/// Number of components.
	pub fn len(&self) -> usize {
		self.components.len()
	}

	/// Whether the path is the root path.
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}

	/// Whether this path is a lone `*`.
	pub fn is_catch_all(&self) -> bool {
		self.components == [PathComponent::Wildcard]
	}

	/// Names of the captured parameters in order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.components.iter().filter_map(|component| match component {
			PathComponent::Param(name) => Some(name.as_str()),
			_ => None,
		})
	}

	/// Matches `href` against this path. See [`match_path`].
	pub fn matches(&self, href: &str) -> MatchResult {
		match_path(self, href)
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.components.is_empty() {
			return f.write_str("/");
		}
		for component in &self.components {
			f.write_str("/")?;
			match component {
				PathComponent::Exact(value) => f.write_str(value)?,
				PathComponent::Param(name) => write!(f, ":{name}")?,
				PathComponent::Wildcard => f.write_str("*")?,
				PathComponent::Any => f.write_str("**")?,
			}
		}
		Ok(())
	}
}

/// Compiles a route path.
pub fn compile(path: &str) -> Path {
	Path::compile(path)
}

/// Matches `href` against a compiled path.
///
/// Only the path part of `href` is considered, and empty segments are ignored.
/// Parameters are captured raw; use [`Params::get_decoded`] for the
/// percent-decoded value.
pub fn match_path(path: &Path, href: &str) -> MatchResult {
	let parts: Vec<&str> = segments(href).collect();

	let required = path
		.components
		.iter()
		.filter(|component| !matches!(component, PathComponent::Any))
		.count();
	if required > parts.len() {
		return MatchResult::Unmatched;
	}
	if path.components.is_empty() && !parts.is_empty() {
		return MatchResult::Unmatched;
	}

	let mut params = Params::default();
	for (index, component) in path.components.iter().enumerate() {
		let Some(part) = parts.get(index) else {
			// only reachable once every remaining component is `**`
			return MatchResult::Matched(params);
		};
		match component {
			PathComponent::Exact(value) => {
				if value != part {
					return MatchResult::Unmatched;
				}
			}
			PathComponent::Param(name) => params.insert(name, part),
			PathComponent::Wildcard => {}
			PathComponent::Any => return MatchResult::Matched(params),
		}
	}

	if parts.len() > path.components.len() {
		return MatchResult::Unmatched;
	}
	MatchResult::Matched(params)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_compile_components() {
		let path = compile("/users/:id/*/**");
		assert_eq!(
			path.components(),
			&[
				PathComponent::Exact("users".to_string()),
				PathComponent::Param("id".to_string()),
				PathComponent::Wildcard,
				PathComponent::Any,
			]
		);
	}

	#[rstest]
	#[case("/users/", "users")]
	#[case("//users//", "users")]
	#[case("users", "users")]
	fn test_compile_ignores_empty_segments(#[case] left: &str, #[case] right: &str) {
		assert_eq!(compile(left), compile(right));
	}

	#[test]
	fn test_compile_root_is_empty() {
		assert!(compile("/").is_empty());
		assert!(compile("").is_empty());
	}

	#[rstest]
	#[case("/", "/", true)]
	#[case("/", "/users", false)]
	#[case("/users", "/users", true)]
	#[case("/users", "/users/", true)]
	#[case("/users", "/posts", false)]
	#[case("/users", "/users/42", false)]
	#[case("/users/:id", "/users", false)]
	#[case("/users/*", "/users/anything", true)]
	#[case("/users/*", "/users", false)]
	#[case("/files/**", "/files/a/b/c", true)]
	#[case("/files/**", "/files", true)]
	#[case("/files/**", "/other/a", false)]
	#[case("/**", "/", true)]
	#[case("*", "/anything", true)]
	#[case("*", "/a/b", false)]
	fn test_match_path(#[case] path: &str, #[case] href: &str, #[case] matched: bool) {
		assert_eq!(match_path(&compile(path), href).is_matched(), matched);
	}

	#[test]
	fn test_match_captures_params() {
		let params = match_path(&compile("/users/:id/posts/:post"), "/users/42/posts/7")
			.params()
			.unwrap();
		assert_eq!(params.get("id"), Some("42"));
		assert_eq!(params.get("post"), Some("7"));
		assert_eq!(params.len(), 2);
	}

	#[test]
	fn test_any_keeps_params_before_it() {
		let params = match_path(&compile("/u/:name/**"), "/u/ann/x/y").params().unwrap();
		assert_eq!(params.get("name"), Some("ann"));
	}

	#[test]
	fn test_params_are_raw() {
		let params = match_path(&compile("/tag/:name"), "/tag/rust%20lang").params().unwrap();
		assert_eq!(params.get("name"), Some("rust%20lang"));
		assert_eq!(params.get_decoded("name").as_deref(), Some("rust lang"));
	}

	#[rstest]
	#[case("/users/:id/**")]
	#[case("/")]
	#[case("/*")]
	fn test_display_round_trips(#[case] source: &str) {
		let path = compile(source);
		assert_eq!(compile(&path.to_string()), path);
	}

	#[test]
	fn test_param_names() {
		let path = compile("/a/:x/b/:y");
		assert_eq!(path.param_names().collect::<Vec<_>>(), vec!["x", "y"]);
	}
}
