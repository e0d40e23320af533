// Copyright 2025 Irreducible Inc.

//! Fused multiply-add of functions.
//!
//! `dest.muladd(&x, &y)` computes `dest += x * y` by appending the terms of the product to the
//! term buffers of `dest`, without materializing `x * y`. The set of supported `(x, y)` pairs is
//! closed: every pair whose product has degree at most one into an [`AffineFunction`], and every
//! pair whose product has degree at most two into a [`QuadraticFunction`].

use linquad_utils::mem::extend_buffer;

use crate::{
	affine::AffineFunction,
	coefficient::{impl_for_numbers, Coefficient, WidenInto},
	operand::{AffineOperand, QuadraticOperand},
	quadratic::QuadraticFunction,
	term::{LinearTerm, QuadraticTerm},
	variable::Variable,
};

/// Function that can be reset to zero without releasing its buffers.
pub trait Accumulator {
	fn zero() -> Self;

	fn set_zero(&mut self) -> &mut Self;
}

impl<T: Coefficient> Accumulator for AffineFunction<T> {
	fn zero() -> Self {
		AffineFunction::zero()
	}

	fn set_zero(&mut self) -> &mut Self {
		AffineFunction::set_zero(self)
	}
}

impl<T: Coefficient> Accumulator for QuadraticFunction<T> {
	fn zero() -> Self {
		QuadraticFunction::zero()
	}

	fn set_zero(&mut self) -> &mut Self {
		QuadraticFunction::set_zero(self)
	}
}

/// In-place `self += x * y`.
pub trait MulAdd<X: ?Sized, Y: ?Sized>: Accumulator {
	fn muladd(&mut self, x: &X, y: &Y) -> &mut Self;

	/// `self = x * y`.
	fn assign_mul(&mut self, x: &X, y: &Y) -> &mut Self {
		self.set_zero();
		self.muladd(x, y)
	}
}

/// Factor of a product of degree at most two: a sequence of linear terms and an optional
/// constant.
///
/// The constant is `None` for pure terms so that multiplying by them does not append terms with
/// a zero coefficient.
pub trait AffineFactor<T: Coefficient> {
	fn linear_len(&self) -> usize;

	/// The `i`-th linear term, widened to `T`.
	fn linear_term(&self, i: usize) -> LinearTerm<T>;

	fn constant_term(&self) -> Option<T>;
}

impl<T: Coefficient> AffineFactor<T> for Variable {
	#[inline]
	fn linear_len(&self) -> usize {
		1
	}

	#[inline]
	fn linear_term(&self, _i: usize) -> LinearTerm<T> {
		LinearTerm::from(*self)
	}

	#[inline]
	fn constant_term(&self) -> Option<T> {
		None
	}
}

impl<T: Coefficient, U: WidenInto<T>> AffineFactor<T> for LinearTerm<U> {
	#[inline]
	fn linear_len(&self) -> usize {
		1
	}

	#[inline]
	fn linear_term(&self, _i: usize) -> LinearTerm<T> {
		self.convert_coeff()
	}

	#[inline]
	fn constant_term(&self) -> Option<T> {
		None
	}
}

impl<T: Coefficient, U: WidenInto<T>> AffineFactor<T> for AffineFunction<U> {
	#[inline]
	fn linear_len(&self) -> usize {
		self.linear.len()
	}

	#[inline]
	fn linear_term(&self, i: usize) -> LinearTerm<T> {
		self.linear[i].convert_coeff()
	}

	#[inline]
	fn constant_term(&self) -> Option<T> {
		Some(self.constant.widen())
	}
}

/// Appends `x * y` to `dest`, growing each term buffer at most once.
fn muladd_product<T, X, Y>(dest: &mut QuadraticFunction<T>, x: &X, y: &Y)
where
	T: Coefficient,
	X: AffineFactor<T> + ?Sized,
	Y: AffineFactor<T> + ?Sized,
{
	let (x_len, y_len) = (x.linear_len(), y.linear_len());
	let (x_constant, y_constant) = (x.constant_term(), y.constant_term());

	let quadratic = extend_buffer(&mut dest.quadratic, x_len * y_len, QuadraticTerm::default());
	for (i, row) in quadratic.chunks_exact_mut(y_len.max(1)).enumerate().take(x_len) {
		let x_term = x.linear_term(i);
		for (j, dest_term) in row.iter_mut().enumerate() {
			*dest_term = x_term * y.linear_term(j);
		}
	}

	let x_scaled_len = if y_constant.is_some() { x_len } else { 0 };
	let y_scaled_len = if x_constant.is_some() { y_len } else { 0 };
	let linear = extend_buffer(
		&mut dest.affine.linear,
		x_scaled_len + y_scaled_len,
		LinearTerm::default(),
	);
	let (x_scaled, y_scaled) = linear.split_at_mut(x_scaled_len);
	if let Some(c) = y_constant {
		for (i, dest_term) in x_scaled.iter_mut().enumerate() {
			*dest_term = x.linear_term(i) * c;
		}
	}
	if let Some(c) = x_constant {
		for (j, dest_term) in y_scaled.iter_mut().enumerate() {
			*dest_term = y.linear_term(j) * c;
		}
	}

	if let (Some(a), Some(b)) = (x_constant, y_constant) {
		dest.affine.constant += a * b;
	}
}

macro_rules! impl_number_muladd {
	($s:ty) => {
		impl<T: Coefficient, Y: AffineOperand<T> + ?Sized> MulAdd<$s, Y> for AffineFunction<T>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn muladd(&mut self, x: &$s, y: &Y) -> &mut Self {
				y.add_scaled_to(self, WidenInto::<T>::widen(*x));
				self
			}
		}

		impl<T: Coefficient> MulAdd<Variable, $s> for AffineFunction<T>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn muladd(&mut self, x: &Variable, y: &$s) -> &mut Self {
				x.add_scaled_to(self, WidenInto::<T>::widen(*y));
				self
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> MulAdd<LinearTerm<U>, $s> for AffineFunction<T>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn muladd(&mut self, x: &LinearTerm<U>, y: &$s) -> &mut Self {
				x.add_scaled_to(self, WidenInto::<T>::widen(*y));
				self
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> MulAdd<AffineFunction<U>, $s> for AffineFunction<T>
		where
			$s: WidenInto<T>,
		{
			fn muladd(&mut self, x: &AffineFunction<U>, y: &$s) -> &mut Self {
				x.add_scaled_to(self, WidenInto::<T>::widen(*y));
				self
			}
		}

		impl<T: Coefficient, Y: QuadraticOperand<T> + ?Sized> MulAdd<$s, Y> for QuadraticFunction<T>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn muladd(&mut self, x: &$s, y: &Y) -> &mut Self {
				y.add_scaled_to_quadratic(self, WidenInto::<T>::widen(*x));
				self
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> MulAdd<QuadraticTerm<U>, $s> for QuadraticFunction<T>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn muladd(&mut self, x: &QuadraticTerm<U>, y: &$s) -> &mut Self {
				x.add_scaled_to_quadratic(self, WidenInto::<T>::widen(*y));
				self
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> MulAdd<QuadraticFunction<U>, $s>
			for QuadraticFunction<T>
		where
			$s: WidenInto<T>,
		{
			fn muladd(&mut self, x: &QuadraticFunction<U>, y: &$s) -> &mut Self {
				x.add_scaled_to_quadratic(self, WidenInto::<T>::widen(*y));
				self
			}
		}
	};
}

impl_for_numbers!(impl_number_muladd);

impl<T: Coefficient, Y: AffineFactor<T> + ?Sized> MulAdd<Variable, Y> for QuadraticFunction<T> {
	fn muladd(&mut self, x: &Variable, y: &Y) -> &mut Self {
		muladd_product(self, x, y);
		self
	}
}

impl<T, U, Y> MulAdd<LinearTerm<U>, Y> for QuadraticFunction<T>
where
	T: Coefficient,
	U: WidenInto<T>,
	Y: AffineFactor<T> + ?Sized,
{
	fn muladd(&mut self, x: &LinearTerm<U>, y: &Y) -> &mut Self {
		muladd_product(self, x, y);
		self
	}
}

impl<T, U, Y> MulAdd<AffineFunction<U>, Y> for QuadraticFunction<T>
where
	T: Coefficient,
	U: WidenInto<T>,
	Y: AffineFactor<T> + ?Sized,
{
	fn muladd(&mut self, x: &AffineFunction<U>, y: &Y) -> &mut Self {
		muladd_product(self, x, y);
		self
	}
}

macro_rules! impl_number_affine_factor {
	($s:ty) => {
		impl<T: Coefficient> AffineFactor<T> for $s
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn linear_len(&self) -> usize {
				0
			}

			fn linear_term(&self, _i: usize) -> LinearTerm<T> {
				unreachable!("numbers have no linear terms")
			}

			#[inline]
			fn constant_term(&self) -> Option<T> {
				Some(WidenInto::<T>::widen(*self))
			}
		}
	};
}

impl_for_numbers!(impl_number_affine_factor);
