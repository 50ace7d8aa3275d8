//! Router error types.

use thiserror::Error;

use crate::dom::DomError;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The navigation target could not be resolved to a URL.
	#[error("Invalid URL {url:?}: {source}")]
	InvalidUrl {
		/// The target as given.
		url: String,
		/// Why it did not parse.
		#[source]
		source: url::ParseError,
	},
	/// The browser rejected the navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// The document or window is not reachable.
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Error raised while turning path parameters into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	/// The route captured a different number of parameters than expected.
	#[error("Expected {expected} path parameters, found {actual}")]
	CountMismatch {
		/// Number the target type needs.
		expected: usize,
		/// Number the route captured.
		actual: usize,
	},
	/// A named parameter was not captured.
	#[error("Missing path parameter: {0}")]
	Missing(String),
	/// A parameter did not parse into the target type.
	#[error("Failed to parse {raw_value:?} as {param_type}: {reason}")]
	ParseError {
		/// Position of the parameter, when known.
		param_index: Option<usize>,
		/// Name of the target type.
		param_type: &'static str,
		/// The captured value.
		raw_value: String,
		/// The parser's message.
		reason: String,
	},
}
