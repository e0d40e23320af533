// Copyright 2024-2025 Irreducible Inc.

use std::ops::Deref;

/// 2D array with row-major layout.
///
/// The storage is generic so that a matrix can either own its elements or borrow them from a
/// buffer the caller refills every iteration (`Array2D<T, &[T]>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T, Data: Deref<Target = [T]> = Vec<T>> {
	data: Data,
	rows: usize,
	cols: usize,
}

impl<T, Data: Deref<Target = [T]>> Array2D<T, Data> {
	/// Wraps row-major `data` as a `rows x cols` array.
	///
	/// Returns `None` if the length of `data` is not `rows * cols`.
	pub fn from_data(rows: usize, cols: usize, data: Data) -> Option<Self> {
		if data.len() != rows * cols {
			return None;
		}
		Some(Self { data, rows, cols })
	}

	/// Returns the number of rows in the array.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Returns the number of columns in the array.
	pub fn cols(&self) -> usize {
		self.cols
	}

	/// Returns the row at the given index.
	pub fn get_row(&self, i: usize) -> &[T] {
		assert!(i < self.rows);
		let start = i * self.cols;
		&self.data[start..start + self.cols]
	}

	/// Returns an iterator over the rows of the array.
	pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
		(0..self.rows).map(move |i| self.get_row(i))
	}

	/// All elements in row-major order.
	pub fn elements(&self) -> &[T] {
		&self.data
	}
}
