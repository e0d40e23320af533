// Copyright 2025 Irreducible Inc.

//! Buffer reuse primitives.
//!
//! Destinations of the in-place arithmetic are long-lived buffers: the first update sizes them,
//! every later update of the same shape must only overwrite. The helpers below make that
//! contract explicit instead of leaning on the growth policy of `Vec`.

/// Resizes `buffer` to exactly `len` elements, reusing its allocation whenever the capacity
/// suffices.
///
/// Shrinking never releases memory. Growing beyond the capacity reserves exactly the missing
/// amount once and fills the new slots with `fill`. Existing elements below `len` are left
/// untouched, so callers are expected to overwrite the whole returned slice.
pub fn resize_buffer<T: Clone>(buffer: &mut Vec<T>, len: usize, fill: T) -> &mut [T] {
	if len <= buffer.len() {
		buffer.truncate(len);
	} else {
		reserve_total(buffer, len);
		buffer.resize(len, fill);
	}
	buffer.as_mut_slice()
}

/// Appends `additional` slots filled with `fill` to `buffer` and returns them as a slice.
///
/// The buffer grows at most once per call; if the capacity already suffices the call performs
/// no allocation.
pub fn extend_buffer<T: Clone>(buffer: &mut Vec<T>, additional: usize, fill: T) -> &mut [T] {
	let start = buffer.len();
	resize_buffer(buffer, start + additional, fill);
	&mut buffer[start..]
}

fn reserve_total<T>(buffer: &mut Vec<T>, len: usize) {
	if len > buffer.capacity() {
		buffer.reserve_exact(len - buffer.len());
	}
}
