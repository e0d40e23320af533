// Copyright 2024-2025 Irreducible Inc.

use itertools::Itertools;

/// Length of the runs that are insertion sorted before merging starts.
const INSERTION_SORT_BLOCK: usize = 20;

/// Returns whether the given values are sorted in ascending order.
pub fn is_sorted_ascending<T: PartialOrd + Clone>(values: impl Iterator<Item = T>) -> bool {
	!values.tuple_windows().any(|(a, b)| a > b)
}

/// Returns whether the given values are sorted in strictly ascending order, i.e. sorted and free
/// of duplicates.
pub fn is_strictly_ascending<T: PartialOrd + Clone>(values: impl Iterator<Item = T>) -> bool {
	!values.tuple_windows().any(|(a, b)| a >= b)
}

/// Stable sorts a slice in place by a key function without touching the heap.
///
/// `slice::sort_by_key` is stable too, but it requests a scratch buffer from the allocator for
/// all but the shortest inputs. This variant insertion sorts short blocks and then merges them
/// with the rotation-based symmetric merge, so the only extra memory is the recursion stack
/// (logarithmic in the slice length).
///
/// Elements with equal keys keep their original relative order.
pub fn stable_sort_by_key_in_place<T, K: Ord>(values: &mut [T], key: impl Fn(&T) -> K) {
	let len = values.len();
	let less = |values: &[T], i: usize, j: usize| key(&values[i]) < key(&values[j]);

	let mut start = 0;
	while start < len {
		let end = (start + INSERTION_SORT_BLOCK).min(len);
		insertion_sort(values, start, end, &less);
		start = end;
	}

	let mut block = INSERTION_SORT_BLOCK;
	while block < len {
		let mut start = 0;
		while start + 2 * block <= len {
			sym_merge(values, start, start + block, start + 2 * block, &less);
			start += 2 * block;
		}
		if start + block < len {
			sym_merge(values, start, start + block, len, &less);
		}
		block *= 2;
	}
}

fn insertion_sort<T>(
	values: &mut [T],
	start: usize,
	end: usize,
	less: &impl Fn(&[T], usize, usize) -> bool,
) {
	for i in start + 1..end {
		let mut j = i;
		while j > start && less(values, j, j - 1) {
			values.swap(j, j - 1);
			j -= 1;
		}
	}
}

/// Merges the sorted ranges `values[a..m]` and `values[m..b]` in place.
///
/// Both ranges must be non-empty.
fn sym_merge<T>(
	values: &mut [T],
	a: usize,
	m: usize,
	b: usize,
	less: &impl Fn(&[T], usize, usize) -> bool,
) {
	if m - a == 1 {
		// Insert values[a] before the first element of the right run that is not less than it.
		let (mut lo, mut hi) = (m, b);
		while lo < hi {
			let h = lo + (hi - lo) / 2;
			if less(values, h, a) {
				lo = h + 1;
			} else {
				hi = h;
			}
		}
		values[a..lo].rotate_left(1);
		return;
	}
	if b - m == 1 {
		// Insert values[m] after the last element of the left run that is not greater than it.
		let (mut lo, mut hi) = (a, m);
		while lo < hi {
			let h = lo + (hi - lo) / 2;
			if !less(values, m, h) {
				lo = h + 1;
			} else {
				hi = h;
			}
		}
		values[lo..=m].rotate_right(1);
		return;
	}

	let mid = a + (b - a) / 2;
	let n = mid + m;
	let (mut start, mut r) = if m > mid { (n - b, mid) } else { (a, m) };
	let p = n - 1;
	while start < r {
		let c = start + (r - start) / 2;
		if !less(values, p - c, c) {
			start = c + 1;
		} else {
			r = c;
		}
	}
	let end = n - start;
	if start < m && m < end {
		values[start..end].rotate_left(m - start);
	}
	if a < start && start < mid {
		sym_merge(values, a, start, mid, less);
	}
	if mid < end && end < b {
		sym_merge(values, mid, end, b, less);
	}
}

/// Sorts a sequence by key and merges runs of elements with equal keys.
///
/// The sequence is stable sorted in place with [`stable_sort_by_key_in_place`], then scanned
/// once: every run of consecutive elements with the same key is folded left to right with
/// `combine` into the first slot of the run, and the vector is truncated to the number of
/// surviving elements. The fold order is the original insertion order of the run, which makes
/// floating point results reproducible.
///
/// `combine` must preserve the key of its arguments. The vector keeps its capacity and no heap
/// allocation takes place.
pub fn sort_and_combine<T, K: Ord>(
	values: &mut Vec<T>,
	key: impl Fn(&T) -> K,
	mut combine: impl FnMut(&T, &T) -> T,
) {
	if values.is_empty() {
		return;
	}

	stable_sort_by_key_in_place(values, &key);

	let mut write = 0;
	for read in 1..values.len() {
		if key(&values[read]) == key(&values[write]) {
			let merged = combine(&values[write], &values[read]);
			values[write] = merged;
		} else {
			write += 1;
			values.swap(write, read);
		}
	}
	values.truncate(write + 1);
}
