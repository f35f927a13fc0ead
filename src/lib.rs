pub mod error;
pub mod handle;
pub mod heap;
pub mod iter;
pub mod select;

use std::cmp::Ordering;

pub use error::HeapViolation;
pub use handle::Handle;
pub use heap::Heap;



/// A total order over `T`, used by [`Heap`] to decide which elements are "smaller".
/// Implemented for any `Fn(&T, &T) -> Ordering`, so a closure can be passed directly.
/// The order must be consistent for as long as an element is stored: mutating an
/// element in a way that changes how it compares requires telling the heap about it
/// (see [`Heap::changed`]).
pub trait Compare<T: ?Sized> {
	fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Compare<T> for F {
	fn compare(&self, a: &T, b: &T) -> Ordering {
		self(a, b)
	}
}

/// Orders elements by their [`Ord`] implementation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
	fn compare(&self, a: &T, b: &T) -> Ordering {
		a.cmp(b)
	}
}

/// Flips another order, so that a min heap ordered by `Reversed(c)` pops the maximum under `c`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
	fn compare(&self, a: &T, b: &T) -> Ordering {
		self.0.compare(b, a)
	}
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering;

	use super::{Compare, Natural, Reversed};

	#[test]
	fn orders() {
		assert_eq!(Natural.compare(&1, &2), Ordering::Less);
		assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
		assert_eq!(Reversed(Natural).compare(&2, &2), Ordering::Equal);
		let by_key = |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0);
		assert_eq!(by_key.compare(&(2, 'a'), &(1, 'z')), Ordering::Greater);
		assert_eq!(Reversed(by_key).compare(&(2, 'a'), &(1, 'z')), Ordering::Less);
	}
}
