use std::cmp::Ordering;

use crate::{heap::Heap, Compare, Natural, Reversed};

/// Return the k smallest elements of `iter` in ascending order.
/// Ties are broken arbitrarily.  If there are fewer than k elements, returns all of them.
pub fn k_smallest<T: Ord>(iter: impl IntoIterator<Item = T>, k: usize) -> Vec<T> {
	k_smallest_by(iter, k, Natural)
}

/// Return the k elements of `iter` that are smallest according to `cmp`, in ascending order.
/// Keeps a max heap of at most k elements, so this takes O(n log(k)) time and O(k) space.
pub fn k_smallest_by<T, C: Compare<T>>(iter: impl IntoIterator<Item = T>, k: usize, cmp: C) -> Vec<T> {
	if k == 0 {
		return Vec::new()
	}
	let mut it = iter.into_iter();
	let mut res = Heap::with_compare(Reversed(cmp));
	res.insert_vec(it.by_ref().take(k).collect());
	for x in it {
		// the root is the largest of the k best so far
		if res.as_slice().first().is_some_and(|top|res.comparator().compare(&x, top) == Ordering::Greater) {
			res.change_min(x);
		}
	}
	let mut sorted = res.into_sorted_vec();
	sorted.reverse();
	sorted
}

/// Sort a vector in ascending order by heapifying it in place and draining it
pub fn heapsort<T: Ord>(values: Vec<T>) -> Vec<T> {
	heapsort_by(values, Natural)
}

pub fn heapsort_by<T, C: Compare<T>>(values: Vec<T>, cmp: C) -> Vec<T> {
	let mut heap = Heap::with_compare(cmp);
	heap.insert_vec(values);
	heap.into_sorted_vec()
}

#[cfg(test)]
mod tests {
	use rand::{distributions::{Distribution, Uniform}, seq::SliceRandom};

	use super::{heapsort, heapsort_by, k_smallest, k_smallest_by};

	const NUM_VALUES: usize = 1000;
	const K_TRIALS: usize = 50;

	#[test]
	fn top_three() {
		assert_eq!(k_smallest([7, 2, 9, 1, 5, 8, 3, 6, 4, 10], 3), [1, 2, 3]);
		assert_eq!(k_smallest_by([7, 2, 9, 1, 5, 8, 3, 6, 4, 10], 3, |a: &i32, b: &i32|b.cmp(a)), [10, 9, 8]);
		assert_eq!(k_smallest([4, 1], 5), [1, 4]);
		assert!(k_smallest([4, 1], 0).is_empty());
	}

	#[test]
	fn random_k_smallest() {
		let mut rng = rand::thread_rng();
		let dist = Uniform::new_inclusive(-500, 500);
		for _ in 0..K_TRIALS {
			let values: Vec<i32> = dist.sample_iter(&mut rng).take(NUM_VALUES).collect();
			let k = *[1, 7, 50, NUM_VALUES].choose(&mut rng).unwrap();
			eprintln!("Getting {} smallest of {} random values", k, NUM_VALUES);
			let mut naive = values.clone();
			naive.sort();
			naive.truncate(k);
			assert_eq!(k_smallest(values, k), naive);
		}
	}

	#[test]
	fn sorts() {
		assert_eq!(heapsort(vec![7, 2, 9, 1, 5]), [1, 2, 5, 7, 9]);
		assert_eq!(heapsort_by(vec!["bb", "a", "ccc"], |a: &&str, b: &&str|b.len().cmp(&a.len())), ["ccc", "bb", "a"]);
		assert!(heapsort(Vec::<u8>::new()).is_empty());
	}
}
