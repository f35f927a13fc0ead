//! Counts heap allocations around delete / changed on a tracked heap.
//! Runs without the libtest harness so no other test thread allocates concurrently.

use std::{
	alloc::{GlobalAlloc, Layout, System},
	cell::Cell,
	sync::atomic::{AtomicUsize, Ordering}
};

use lazyheap::Heap;

struct CountingAlloc;

static ALLOCS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAlloc {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		ALLOCS.fetch_add(1, Ordering::Relaxed);
		System.alloc(layout)
	}
	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		System.dealloc(ptr, layout)
	}
	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		ALLOCS.fetch_add(1, Ordering::Relaxed);
		System.realloc(ptr, layout, new_size)
	}
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn allocs_during(f: impl FnOnce()) -> usize {
	let before = ALLOCS.load(Ordering::Relaxed);
	f();
	ALLOCS.load(Ordering::Relaxed) - before
}

fn main() {
	let by_cell = |a: &Cell<i64>, b: &Cell<i64>|a.get().cmp(&b.get());
	let mut heap = Heap::tracked_with_compare(by_cell);
	let handles = heap.insert_all_tracked((0..100).map(Cell::new));

	for round in 0..5 {
		let n = allocs_during(|| {
			for h in handles.iter().skip(round*10).take(10) {
				heap.delete(h);
			}
		});
		assert_eq!(n, 0, "delete allocated {} times", n);

		let n = allocs_during(|| {
			for (k, h) in handles.iter().enumerate().skip(50) {
				if let Some(cell) = heap.get(h) {
					cell.set(1000 - k as i64)
				}
				heap.changed(h);
			}
			for h in handles.iter().skip(50) {
				heap.update(h, |cell|cell.set(-cell.get()));
			}
			heap.changed_at(0);
		});
		assert_eq!(n, 0, "changed allocated {} times", n);
	}

	let mut prev = i64::MIN;
	for cell in heap.drain() {
		assert!(cell.get() >= prev);
		prev = cell.get();
	}
	println!("allocations: delete and changed are allocation free");
}
