//! Identity comparison used by [`memo`](super::memo::memo).
//!
//! [`SameValue`] answers "is this the same value I saw last time?", which is
//! narrower than `PartialEq`: shared pointers compare by address, and floats
//! compare bitwise with every NaN equal to every other NaN.

use std::rc::Rc;
use std::sync::Arc;

/// Identity equality for memoized sources.
pub trait SameValue {
	/// Returns `true` when `self` and `other` are the same value.
	fn same_value(&self, other: &Self) -> bool;
}

macro_rules! same_value_by_eq {
	($($ty:ty),* $(,)?) => {
		$(
			impl SameValue for $ty {
				#[inline]
				fn same_value(&self, other: &Self) -> bool {
					self == other
				}
			}
		)*
	};
}

same_value_by_eq!(
	i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, (), String, str,
	&'static str,
);

macro_rules! same_value_float {
	($($ty:ty),*) => {
		$(
			impl SameValue for $ty {
				#[inline]
				fn same_value(&self, other: &Self) -> bool {
					(self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
				}
			}
		)*
	};
}

same_value_float!(f32, f64);

impl<T: ?Sized> SameValue for Rc<T> {
	fn same_value(&self, other: &Self) -> bool {
		Rc::ptr_eq(self, other)
	}
}

impl<T: ?Sized> SameValue for Arc<T> {
	fn same_value(&self, other: &Self) -> bool {
		Arc::ptr_eq(self, other)
	}
}

impl<T: SameValue> SameValue for Option<T> {
	fn same_value(&self, other: &Self) -> bool {
		match (self, other) {
			(Some(a), Some(b)) => a.same_value(b),
			(None, None) => true,
			_ => false,
		}
	}
}

macro_rules! same_value_tuple {
	($($name:ident : $idx:tt),+) => {
		impl<$($name: SameValue),+> SameValue for ($($name,)+) {
			fn same_value(&self, other: &Self) -> bool {
				$(self.$idx.same_value(&other.$idx))&&+
			}
		}
	};
}

same_value_tuple!(A: 0);
same_value_tuple!(A: 0, B: 1);
same_value_tuple!(A: 0, B: 1, C: 2);
same_value_tuple!(A: 0, B: 1, C: 2, D: 3);
