use std::{iter::FusedIterator, slice};

use crate::{heap::Heap, Compare};

/// Borrowing iterator over a heap's elements in storage order, which is unspecified
/// beyond the first element being minimal once the heap is built.
/// Created by [`Heap::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
	inner: slice::Iter<'a, T>
}

impl<'a, T> Iter<'a, T> {
	pub(crate) fn new(values: &'a [T]) -> Self {
		Self{inner: values.iter()}
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Removes elements from a heap in ascending order, one [`Heap::take_min`] per item.
/// The heap stays borrowed for as long as this exists, so it cannot be changed mid-drain.
/// Dropping the iterator early keeps the elements not yet yielded in the heap.
/// Created by [`Heap::drain`].
pub struct Drain<'a, T, C: Compare<T>> {
	heap: &'a mut Heap<T, C>
}

impl<'a, T, C: Compare<T>> Drain<'a, T, C> {
	pub(crate) fn new(heap: &'a mut Heap<T, C>) -> Self {
		Self{heap}
	}
}

impl<'a, T, C: Compare<T>> Iterator for Drain<'a, T, C> {
	type Item = T;
	fn next(&mut self) -> Option<T> {
		self.heap.try_take_min()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.heap.len(), Some(self.heap.len()))
	}
}

impl<'a, T, C: Compare<T>> ExactSizeIterator for Drain<'a, T, C> {}

impl<'a, T, C: Compare<T>> FusedIterator for Drain<'a, T, C> {}
