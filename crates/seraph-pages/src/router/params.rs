//! Path parameters captured by a route match.
//!
//! [`Params`] keeps captures in the order they appear in the route path.
//! Values are stored raw; [`Params::get_decoded`] percent-decodes on demand.
//! [`FromPath`] turns the whole capture list into a typed value, which is what
//! [`Route::typed`](super::Route::typed) uses.
//!
//! # Example
//!
//! ```ignore
//! use seraph_pages::router::{PathParams, Route};
//!
//! let route = Route::typed("/users/:id", |PathParams(id): PathParams<u64>| {
//!     p().text(format!("User ID: {id}")).build()
//! });
//! ```

use std::ops::Deref;
use std::str::FromStr;

use super::error::PathError;

/// Parameters captured by a route match, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	entries: Vec<(String, String)>,
}

impl Params {
	/// Creates parameters from `(name, value)` pairs.
	pub fn new<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut params = Self::default();
		for (name, value) in entries {
			params.insert(&name.into(), &value.into());
		}
		params
	}

	/// Records a capture. A repeated name keeps its position and takes the
	/// new value.
	pub(crate) fn insert(&mut self, name: &str, value: &str) {
		match self.entries.iter_mut().find(|(existing, _)| existing == name) {
			Some((_, slot)) => *slot = value.to_string(),
			None => self.entries.push((name.to_string(), value.to_string())),
		}
	}

	/// The raw captured value.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value.as_str())
	}

	/// The percent-decoded value. `None` if missing or not valid UTF-8 once
	/// decoded.
	pub fn get_decoded(&self, name: &str) -> Option<String> {
		let raw = self.get(name)?;
		urlencoding::decode(raw).ok().map(|decoded| decoded.into_owned())
	}

	/// Parses the decoded value of `name`.
	///
	/// # Errors
	///
	/// Returns [`PathError::Missing`] if the route did not capture `name`, and
	/// [`PathError::ParseError`] if the value does not parse.
	pub fn parse<T>(&self, name: &str) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let index = self
			.entries
			.iter()
			.position(|(existing, _)| existing == name)
			.ok_or_else(|| PathError::Missing(name.to_string()))?;
		parse_value(&self.entries[index].1, Some(index))
	}

	/// Extracts a typed value from all captures.
	///
	/// # Errors
	///
	/// See [`FromPath::from_path`].
	pub fn extract<T: FromPath>(&self) -> Result<T, PathError> {
		T::from_path(self)
	}

	/// Values in path order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(_, value)| value.as_str())
	}

	/// `(name, value)` pairs in path order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Number of captures.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

fn parse_value<T>(raw: &str, param_index: Option<usize>) -> Result<T, PathError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	let decoded = urlencoding::decode(raw).map_err(|e| PathError::ParseError {
		param_index,
		param_type: std::any::type_name::<T>(),
		raw_value: raw.to_string(),
		reason: e.to_string(),
	})?;
	decoded.parse::<T>().map_err(|e| PathError::ParseError {
		param_index,
		param_type: std::any::type_name::<T>(),
		raw_value: raw.to_string(),
		reason: e.to_string(),
	})
}

/// Trait for extracting typed values from path parameters.
///
/// Single values need exactly one capture; tuples need one capture per
/// element and read them in path order.
///
/// # Example
///
/// ```ignore
/// struct UserId(u64);
///
/// impl FromPath for UserId {
///     fn from_path(params: &Params) -> Result<Self, PathError> {
///         params.parse::<u64>("id").map(UserId)
///     }
/// }
/// ```
pub trait FromPath: Sized {
	/// Extracts `Self` from the captures.
	///
	/// # Errors
	///
	/// Returns [`PathError::CountMismatch`] if the number of captures doesn't
	/// match, and [`PathError::ParseError`] if a value fails to parse.
	fn from_path(params: &Params) -> Result<Self, PathError>;
}

/// Wrapper type for typed path parameters.
///
/// # Example
///
/// ```ignore
/// fn user_detail(PathParams(id): PathParams<u64>) -> Element {
///     p().text(format!("User ID: {id}")).build()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathParams<T>(pub T);

impl<T> PathParams<T> {
	/// Unwraps the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for PathParams<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T: FromPath> FromPath for PathParams<T> {
	fn from_path(params: &Params) -> Result<Self, PathError> {
		T::from_path(params).map(PathParams)
	}
}

impl FromPath for Params {
	fn from_path(params: &Params) -> Result<Self, PathError> {
		Ok(params.clone())
	}
}

fn single(params: &Params) -> Result<&str, PathError> {
	match params.entries.as_slice() {
		[(_, value)] => Ok(value.as_str()),
		entries => Err(PathError::CountMismatch {
			expected: 1,
			actual: entries.len(),
		}),
	}
}

macro_rules! impl_from_path_for_primitive {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromPath for $ty {
				fn from_path(params: &Params) -> Result<Self, PathError> {
					parse_value(single(params)?, Some(0))
				}
			}
		)*
	};
}

impl_from_path_for_primitive!(i32, i64, u32, u64, usize, bool, String);

macro_rules! impl_from_path_for_tuple {
	($($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromPath for ($($ty,)+)
		where
			$($ty: FromStr,)+
			$(<$ty as FromStr>::Err: std::fmt::Display,)+
		{
			fn from_path(params: &Params) -> Result<Self, PathError> {
				let expected = [$($idx),+].len();
				if params.len() != expected {
					return Err(PathError::CountMismatch {
						expected,
						actual: params.len(),
					});
				}

				Ok((
					$(parse_value::<$ty>(&params.entries[$idx].1, Some($idx))?,)+
				))
			}
		}
	};
}

impl_from_path_for_tuple!(0 => A, 1 => B);
impl_from_path_for_tuple!(0 => A, 1 => B, 2 => C);
impl_from_path_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_from_path_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_from_path_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_params_keep_path_order() {
		let params = Params::new([("b", "2"), ("a", "1")]);
		assert_eq!(params.iter().collect::<Vec<_>>(), vec![("b", "2"), ("a", "1")]);
	}

	#[test]
	fn test_repeated_name_takes_last_value() {
		let params = Params::new([("id", "1"), ("id", "2")]);
		assert_eq!(params.len(), 1);
		assert_eq!(params.get("id"), Some("2"));
	}

	#[test]
	fn test_get_decoded() {
		let params = Params::new([("q", "caf%C3%A9"), ("bad", "%FF")]);
		assert_eq!(params.get_decoded("q").as_deref(), Some("café"));
		assert_eq!(params.get_decoded("bad"), None);
		assert_eq!(params.get_decoded("missing"), None);
	}

	#[test]
	fn test_parse_named() {
		let params = Params::new([("id", "42"), ("slug", "hello%20world")]);
		assert_eq!(params.parse::<u32>("id").unwrap(), 42);
		assert_eq!(params.parse::<String>("slug").unwrap(), "hello world");
		assert_eq!(
			params.parse::<u32>("page").unwrap_err(),
			PathError::Missing("page".to_string())
		);
	}

	#[test]
	fn test_parse_named_error_reports_index() {
		let params = Params::new([("slug", "x"), ("id", "abc")]);
		match params.parse::<u32>("id") {
			Err(PathError::ParseError {
				param_index,
				param_type,
				raw_value,
				..
			}) => {
				assert_eq!(param_index, Some(1));
				assert_eq!(param_type, "u32");
				assert_eq!(raw_value, "abc");
			}
			other => panic!("Expected ParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_path_params_deref() {
		let params = PathParams(42i64);
		assert_eq!(*params, 42);
		assert_eq!(params.into_inner(), 42);
	}

	#[test]
	fn test_from_path_primitive() {
		let params = Params::new([("id", "9223372036854775807")]);
		assert_eq!(i64::from_path(&params).unwrap(), i64::MAX);
		assert!(bool::from_path(&Params::new([("flag", "true")])).unwrap());
	}

	#[test]
	fn test_from_path_count_mismatch() {
		let params = Params::new([("a", "1"), ("b", "2")]);
		assert_eq!(
			i32::from_path(&params).unwrap_err(),
			PathError::CountMismatch {
				expected: 1,
				actual: 2
			}
		);
	}

	#[test]
	fn test_from_path_tuple() {
		let params = Params::new([("id", "42"), ("name", "hello"), ("on", "true")]);
		let (id, name, on) = params.extract::<(i32, String, bool)>().unwrap();
		assert_eq!((id, name.as_str(), on), (42, "hello", true));
	}

	#[test]
	fn test_from_path_tuple_parse_error() {
		let params = Params::new([("a", "1"), ("b", "x")]);
		match <(u8, u8)>::from_path(&params) {
			Err(PathError::ParseError {
				param_index,
				raw_value,
				..
			}) => {
				assert_eq!(param_index, Some(1));
				assert_eq!(raw_value, "x");
			}
			other => panic!("Expected ParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_from_path_tuple_6_elements() {
		let params = Params::new((1..=6).map(|n| (format!("p{n}"), n.to_string())));
		let tuple = <(i32, i32, i32, i32, i32, i32)>::from_path(&params).unwrap();
		assert_eq!(tuple, (1, 2, 3, 4, 5, 6));
	}

	#[test]
	fn test_path_params_from_path() {
		let params = Params::new([("id", "7")]);
		let PathParams(id) = params.extract::<PathParams<u64>>().unwrap();
		assert_eq!(id, 7);
	}
}
