use std::{cell::Cell, fmt, rc::Rc};

/// A reference to one element of a tracked [`Heap`](crate::Heap), valid until that element
/// leaves the heap (by [`Heap::take_min`](crate::Heap::take_min), [`Heap::delete`](crate::Heap::delete),
/// [`Heap::clear`](crate::Heap::clear), ...).
///
/// The heap keeps one clone of every handle in a table parallel to its elements, and rewrites
/// the shared cell whenever an element moves, so [`Handle::index`] is always the element's
/// current slot.  Once the element is gone the cell holds `None` and every heap operation
/// taking the handle does nothing.
///
/// Handles compare equal only if they are clones of each other.
#[derive(Clone)]
pub struct Handle(Rc<Cell<Option<usize>>>);

impl Handle {
	pub(crate) fn new(index: usize) -> Self {
		Self(Rc::new(Cell::new(Some(index))))
	}

	pub(crate) fn set(&self, index: usize) {
		self.0.set(Some(index))
	}

	pub(crate) fn invalidate(&self) {
		self.0.set(None)
	}

	/// The slot currently holding the element, or None if it has been removed
	pub fn index(&self) -> Option<usize> {
		self.0.get()
	}

	pub fn is_valid(&self) -> bool {
		self.0.get().is_some()
	}

	pub(crate) fn same(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Handle {
	fn eq(&self, other: &Self) -> bool {
		self.same(other)
	}
}

impl Eq for Handle {}

impl fmt::Debug for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.index() {
			Some(i) => write!(f, "Handle({})", i),
			None => write!(f, "Handle(removed)")
		}
	}
}
