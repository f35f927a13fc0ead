use std::{cmp::Ordering, fmt, mem};

use crate::{error::HeapViolation, handle::Handle, iter::{Drain, Iter}, Compare, Natural};

/// An implicit binary min heap ordered by a [`Compare`] implementation.
/// - Find min: O(1) once built
/// - Take min / change min: O(log(n))
/// - Insert: O(1) while unbuilt, O(log(n)) once built
/// - Bulk insert / build: O(n)
///
/// Heapification is lazy: a fresh heap (or one that was just cleared) only appends on
/// [`Heap::insert`], and the heap property is established the first time it matters
/// (by [`Heap::min`], [`Heap::take_min`], [`Heap::build`], ...).  From then on every
/// operation keeps it.
///
/// A heap created with [`Heap::tracked`] or [`Heap::tracked_with_compare`] additionally
/// keeps a [`Handle`] for every element, which can be used to delete or reposition that
/// element after it has moved around ([`Heap::delete`], [`Heap::changed`], [`Heap::update`]).
/// Handles are invalidated when their element leaves the heap, and using an invalidated
/// handle is a no-op.
pub struct Heap<T, C = Natural> {
	values: Vec<T>,
	handles: Option<Vec<Handle>>,
	cmp: C,
	built: bool
}

impl<T: Ord> Heap<T> {
	/// Create an empty heap ordered by `T`'s [`Ord`] implementation
	pub fn new() -> Self {
		Self::with_compare(Natural)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		let mut res = Self::new();
		res.reserve(capacity);
		res
	}

	/// Create an empty heap ordered by [`Ord`] that hands out [`Handle`]s
	pub fn tracked() -> Self {
		Self::tracked_with_compare(Natural)
	}
}

impl<T: Ord> Default for Heap<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, C: Compare<T>> Heap<T, C> {
	/// Create an empty heap ordered by `cmp`.
	/// To get a max heap, reverse the order, eg with [`Reversed`](crate::Reversed).
	pub fn with_compare(cmp: C) -> Self {
		Self{values: Vec::new(), handles: None, cmp, built: false}
	}

	/// Create an empty heap ordered by `cmp` that hands out [`Handle`]s.
	/// Every element gets its own handle, so elements are distinguished by identity
	/// even if they compare equal.
	pub fn tracked_with_compare(cmp: C) -> Self {
		Self{values: Vec::new(), handles: Some(Vec::new()), cmp, built: false}
	}

	pub fn reserve(&mut self, additional: usize) {
		self.values.reserve(additional);
		if let Some(handles) = self.handles.as_mut() {
			handles.reserve(additional)
		}
	}

	/// Get the number of elements in the heap
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Whether this heap was created with position tracking
	pub fn is_tracked(&self) -> bool {
		self.handles.is_some()
	}

	/// Whether the heap property is currently being maintained.
	/// False for a new or cleared heap until something forces a build.
	pub fn is_built(&self) -> bool {
		self.built
	}

	pub fn comparator(&self) -> &C {
		&self.cmp
	}

	/// The elements in storage order
	pub fn as_slice(&self) -> &[T] {
		&self.values
	}

	/// Iterate over all elements in storage order without removing them
	pub fn iter(&self) -> Iter<'_, T> {
		Iter::new(&self.values)
	}

	/// Insert an element into the heap.
	/// Elements that compare equal are fine, but their order will be unspecified.
	/// In a tracked heap the element still gets a handle, which can be recovered with
	/// [`Heap::handle_at`]; use [`Heap::insert_tracked`] to get it directly.
	pub fn insert(&mut self, value: T) {
		let i = self.values.len();
		if let Some(handles) = self.handles.as_mut() {
			handles.push(Handle::new(i))
		}
		self.values.push(value);
		self.after_push(i)
	}

	/// Insert an element and return its handle.
	/// Panics if the heap is not tracked.
	pub fn insert_tracked(&mut self, value: T) -> Handle {
		let Some(handles) = self.handles.as_mut() else {
			panic!("insert_tracked called on a heap without position tracking")
		};
		let i = self.values.len();
		let handle = Handle::new(i);
		handles.push(handle.clone());
		self.values.push(value);
		self.after_push(i);
		handle
	}

	fn after_push(&mut self, i: usize) {
		if self.built {
			self.sift_up(i)
		}
		self.debug_check()
	}

	/// Append all elements of `iter`, then heapify the whole heap in O(n)
	pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		let start = self.values.len();
		self.values.extend(iter);
		self.track_from(start);
		self.build()
	}

	/// Like [`Heap::insert_all`], returning the new elements' handles in iteration order.
	/// Panics if the heap is not tracked.
	pub fn insert_all_tracked<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Vec<Handle> {
		if !self.is_tracked() {
			panic!("insert_all_tracked called on a heap without position tracking")
		}
		let start = self.values.len();
		self.values.extend(iter);
		self.track_from(start);
		let res = self.handles.as_ref().map_or_else(Vec::new, |handles| handles[start..].to_vec());
		self.build();
		res
	}

	/// Bulk insert that takes over `values`' buffer when the heap is empty instead of copying,
	/// then heapifies
	pub fn insert_vec(&mut self, mut values: Vec<T>) {
		let start = self.values.len();
		if start == 0 {
			mem::swap(&mut self.values, &mut values)
		} else {
			self.values.append(&mut values)
		}
		self.track_from(start);
		self.build()
	}

	fn track_from(&mut self, start: usize) {
		let len = self.values.len();
		if let Some(handles) = self.handles.as_mut() {
			handles.extend((start..len).map(Handle::new))
		}
	}

	/// Establish the heap property over the whole buffer in O(n) and keep maintaining it from
	/// now on.  Calling this on an already built heap is harmless.
	pub fn build(&mut self) {
		for i in (0..self.values.len()/2).rev() {
			self.sift_down(i);
		}
		self.built = true;
		self.debug_check()
	}

	fn ensure_built(&mut self) {
		if !self.built {
			self.build()
		}
	}

	/// Get the minimum element without removing it, building the heap first if needed.
	/// Panics if the heap is empty.
	pub fn min(&mut self) -> &T {
		match self.try_min() {
			Some(res) => res,
			None => panic!("min called on an empty heap")
		}
	}

	pub fn try_min(&mut self) -> Option<&T> {
		self.ensure_built();
		self.values.first()
	}

	/// Remove and return the minimum element.
	/// Panics if the heap is empty.
	pub fn take_min(&mut self) -> T {
		match self.try_take_min() {
			Some(res) => res,
			None => panic!("take_min called on an empty heap")
		}
	}

	pub fn try_take_min(&mut self) -> Option<T> {
		if self.values.is_empty() {
			return None
		}
		self.ensure_built();
		Some(self.remove(0))
	}

	/// Replace the minimum element with `value` and return the old minimum.
	/// Cheaper than [`Heap::take_min`] followed by [`Heap::insert`], and the usual way to keep
	/// a fixed size heap of the k best elements seen so far.
	/// In a tracked heap the old minimum's handle is invalidated and `value` gets a new one.
	/// Panics if the heap is empty.
	pub fn change_min(&mut self, value: T) -> T {
		if self.values.is_empty() {
			panic!("change_min called on an empty heap")
		}
		self.ensure_built();
		let res = mem::replace(&mut self.values[0], value);
		if let Some(handles) = self.handles.as_mut() {
			mem::replace(&mut handles[0], Handle::new(0)).invalidate()
		}
		self.sift_down(0);
		self.debug_check();
		res
	}

	/// Remove all elements, invalidating every handle.
	/// The heap goes back to appending lazily until the next build.
	pub fn clear(&mut self) {
		self.invalidate_all();
		self.values.clear();
		self.built = false
	}

	fn invalidate_all(&mut self) {
		if let Some(handles) = self.handles.as_mut() {
			handles.drain(..).for_each(|h|h.invalidate())
		}
	}

	/// Remove elements in ascending order, see [`Drain`]
	pub fn drain(&mut self) -> Drain<'_, T, C> {
		Drain::new(self)
	}

	/// Get the elements in storage order, invalidating any handles
	pub fn into_vec(mut self) -> Vec<T> {
		self.invalidate_all();
		mem::take(&mut self.values)
	}

	/// Get the elements sorted in ascending order (heapsort), invalidating any handles
	pub fn into_sorted_vec(mut self) -> Vec<T> {
		let mut res = Vec::with_capacity(self.values.len());
		res.extend(self.drain());
		res
	}

	/// The handle of the element currently at `index`, if the heap is tracked and `index` is in range
	pub fn handle_at(&self, index: usize) -> Option<Handle> {
		self.handles.as_ref()?.get(index).cloned()
	}

	/// Resolve a handle to the slot of its element in this heap.
	/// Handles that were invalidated, or that belong to some other heap, resolve to None.
	fn locate(&self, handle: &Handle, op: &str) -> Option<usize> {
		let Some(handles) = self.handles.as_ref() else {
			panic!("{} called on a heap without position tracking", op)
		};
		let i = handle.index()?;
		handles.get(i).filter(|h|h.same(handle)).map(|_|i)
	}

	/// Get the element a handle refers to.
	/// Panics if the heap is not tracked.
	pub fn get(&self, handle: &Handle) -> Option<&T> {
		let i = self.locate(handle, "get")?;
		self.values.get(i)
	}

	/// Remove the element a handle refers to and return it.
	/// Does nothing and returns None if the handle is no longer valid.
	/// Panics if the heap is not tracked.
	pub fn delete(&mut self, handle: &Handle) -> Option<T> {
		let i = self.locate(handle, "delete")?;
		Some(self.remove(i))
	}

	/// Restore the heap property after the element a handle refers to changed how it compares
	/// (through interior mutability, or through data the comparator looks up elsewhere).
	/// Does nothing if the handle is no longer valid.
	/// Panics if the heap is not tracked.
	pub fn changed(&mut self, handle: &Handle) {
		if let Some(i) = self.locate(handle, "changed") {
			self.restore(i)
		}
	}

	/// Modify the element a handle refers to in place and reposition it.
	/// Returns false, without calling `f`, if the handle is no longer valid.
	/// Panics if the heap is not tracked.
	pub fn update(&mut self, handle: &Handle, f: impl FnOnce(&mut T)) -> bool {
		let Some(i) = self.locate(handle, "update") else { return false };
		f(&mut self.values[i]);
		self.restore(i);
		true
	}

	/// Replace the element a handle refers to, keeping the handle, and return the old element.
	/// Panics if the heap is not tracked.
	pub fn replace(&mut self, handle: &Handle, value: T) -> Option<T> {
		let i = self.locate(handle, "replace")?;
		let res = mem::replace(&mut self.values[i], value);
		self.restore(i);
		Some(res)
	}

	/// Remove the element at `index` and return it.
	/// Index 0 is the minimum (the heap is built first); other indices only make sense in a
	/// tracked heap, where they come from [`Handle::index`].
	/// Panics if `index` is out of range, or if it is non-zero and the heap is not tracked.
	pub fn delete_at(&mut self, index: usize) -> T {
		self.check_index(index, "delete_at");
		if index == 0 {
			self.ensure_built()
		}
		self.remove(index)
	}

	/// Restore the heap property after the element at `index` was modified.
	/// Same restrictions on `index` as [`Heap::delete_at`].
	pub fn changed_at(&mut self, index: usize) {
		self.check_index(index, "changed_at");
		self.restore(index)
	}

	fn check_index(&self, index: usize, op: &str) {
		if index >= self.values.len() {
			panic!("{}: index {} out of range for heap of length {}", op, index, self.values.len())
		}
		if index != 0 && self.handles.is_none() {
			panic!("{} called with non-zero index on a heap without position tracking", op)
		}
	}

	/// Remove slot i by moving the last element into it.  i must be in range.
	fn remove(&mut self, i: usize) -> T {
		let res = self.values.swap_remove(i);
		if let Some(handles) = self.handles.as_mut() {
			handles.swap_remove(i).invalidate();
			if let Some(moved) = handles.get(i) {
				moved.set(i)
			}
		}
		if i < self.values.len() {
			self.restore(i)
		} else {
			self.debug_check()
		}
		res
	}

	/// Move the element at i whichever way it needs to go.  Only one direction can be violated,
	/// so sift up is only tried if sift down left it in place.
	/// An unbuilt heap is left alone; the next build puts everything in order anyway.
	fn restore(&mut self, i: usize) {
		if self.built && !self.sift_down(i) {
			self.sift_up(i)
		}
		self.debug_check()
	}

	fn less(&self, i: usize, j: usize) -> bool {
		self.cmp.compare(&self.values[i], &self.values[j]) == Ordering::Less
	}

	fn swap(&mut self, i: usize, j: usize) {
		self.values.swap(i, j);
		if let Some(handles) = self.handles.as_mut() {
			handles.swap(i, j);
			handles[i].set(i);
			handles[j].set(j);
		}
	}

	fn sift_up(&mut self, mut i: usize) {
		while i > 0 {
			let p = (i - 1) >> 1;
			if !self.less(i, p)
				{ break }
			self.swap(i, p);
			i = p
		}
	}

	/// Returns true if the element moved
	fn sift_down(&mut self, i0: usize) -> bool {
		let n = self.values.len();
		let mut i = i0;
		loop {
			let l = 2*i + 1;
			if l >= n
				{ break }
			let child = if l + 1 < n && self.less(l + 1, l) { l + 1 } else { l };
			if !self.less(child, i)
				{ break }
			self.swap(i, child);
			i = child
		}
		i > i0
	}

	/// Verify the heap property (if the heap is built) and that every handle records the slot
	/// of its element, returning the first violation found
	pub fn check(&self) -> Result<(), HeapViolation> {
		if let Some(handles) = self.handles.as_ref() {
			if handles.len() != self.values.len() {
				return Err(HeapViolation::WrongHandleCount{len: self.values.len(), handles: handles.len()})
			}
			for (index, handle) in handles.iter().enumerate() {
				if handle.index() != Some(index) {
					return Err(HeapViolation::BrokenHandle{index, recorded: handle.index()})
				}
			}
		}
		if self.built {
			for index in 1..self.values.len() {
				let parent = (index - 1) >> 1;
				if self.less(index, parent) {
					return Err(HeapViolation::LessThanParent{index, parent})
				}
			}
		}
		Ok(())
	}

	#[inline]
	fn debug_check(&self) {
		#[cfg(all(test, not(feature = "stress_tests")))]{
			assert_eq!(self.check(), Ok(()))
		}
	}
}

impl<T, C> Drop for Heap<T, C> {
	fn drop(&mut self) {
		if let Some(handles) = self.handles.as_ref() {
			handles.iter().for_each(|h|h.invalidate())
		}
	}
}

impl<T: fmt::Debug, C> fmt::Debug for Heap<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Heap")
			.field("values", &self.values)
			.field("tracked", &self.handles.is_some())
			.field("built", &self.built)
			.finish()
	}
}

impl<T, C: Compare<T>> Extend<T> for Heap<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.insert_all(iter)
	}
}

impl<T, C: Compare<T> + Default> FromIterator<T> for Heap<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut res = Self::with_compare(C::default());
		res.insert_vec(iter.into_iter().collect());
		res
	}
}

impl<T, C: Compare<T>> From<Vec<T>> for Heap<T, C> where C: Default {
	fn from(values: Vec<T>) -> Self {
		let mut res = Self::with_compare(C::default());
		res.insert_vec(values);
		res
	}
}

impl<'a, T, C: Compare<T>> IntoIterator for &'a Heap<T, C> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<T, C: Compare<T>> IntoIterator for Heap<T, C> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;
	fn into_iter(self) -> Self::IntoIter {
		self.into_vec().into_iter()
	}
}
