use thiserror::Error;

/// A broken invariant found by [`Heap::check`](crate::Heap::check).
/// Any of these means either a bug in this crate or a comparator / element that
/// changed how it orders without the heap being told.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HeapViolation {
	/// The element at `index` compares less than its parent
	#[error("element at index {index} is less than its parent at index {parent}")]
	LessThanParent { index: usize, parent: usize },
	/// The position table does not have one handle per stored element
	#[error("{handles} handles tracked for {len} elements")]
	WrongHandleCount { len: usize, handles: usize },
	/// The handle stored beside `index` records some other position
	#[error("handle for index {index} records position {recorded:?}")]
	BrokenHandle { index: usize, recorded: Option<usize> },
}
