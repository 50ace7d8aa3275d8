//! String templates over signals.
//!
//! [`s!`](crate::s) takes a `format!` string and up to six observables. The
//! result is a [`Computed`](super::Computed) string that re-renders whenever
//! any argument emits. Plain values can be interpolated with inline captures
//! (`{unit}`), which are moved into the template once.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_core::s;
//! use seraph_core::reactive::Signal;
//!
//! let name = Signal::new("Ada".to_string());
//! let count = Signal::new(3);
//! let unit = "items";
//!
//! let summary = s!("{} has {} {unit}", name.clone(), count.clone());
//! assert_eq!(summary.current(), "Ada has 3 items");
//! ```

/// Builds a string signal from a format string and observable arguments.
///
/// Each positional `{}` takes the current value of the matching argument,
/// which must implement `Display`. Up to six arguments are supported; more
/// can be grouped with [`zip`](crate::reactive::zip) first.
#[macro_export]
macro_rules! s {
	($fmt:literal $(,)?) => {
		$crate::reactive::computed($crate::reactive::Signal::new(()), move |_: &()| {
			::std::format!($fmt)
		})
	};
	($fmt:literal, $a:expr $(,)?) => {
		$crate::reactive::computed($a, move |a| ::std::format!($fmt, a))
	};
	($fmt:literal, $a:expr, $b:expr $(,)?) => {
		$crate::reactive::computed($crate::reactive::zip(($a, $b)), move |(a, b)| {
			::std::format!($fmt, a, b)
		})
	};
	($fmt:literal, $a:expr, $b:expr, $c:expr $(,)?) => {
		$crate::reactive::computed($crate::reactive::zip(($a, $b, $c)), move |(a, b, c)| {
			::std::format!($fmt, a, b, c)
		})
	};
	($fmt:literal, $a:expr, $b:expr, $c:expr, $d:expr $(,)?) => {
		$crate::reactive::computed(
			$crate::reactive::zip(($a, $b, $c, $d)),
			move |(a, b, c, d)| ::std::format!($fmt, a, b, c, d),
		)
	};
	($fmt:literal, $a:expr, $b:expr, $c:expr, $d:expr, $e:expr $(,)?) => {
		$crate::reactive::computed(
			$crate::reactive::zip(($a, $b, $c, $d, $e)),
			move |(a, b, c, d, e)| ::std::format!($fmt, a, b, c, d, e),
		)
	};
	($fmt:literal, $a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr $(,)?) => {
		$crate::reactive::computed(
			$crate::reactive::zip(($a, $b, $c, $d, $e, $f)),
			move |(a, b, c, d, e, f)| ::std::format!($fmt, a, b, c, d, e, f),
		)
	};
}
