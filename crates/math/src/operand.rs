// Copyright 2025 Irreducible Inc.

//! Operands accepted by the in-place addition and subtraction of functions.
//!
//! Every operand knows how to add a scaled copy of itself to a destination function. Numbers of a
//! narrower coefficient type are widened on the way in, so `f64` functions accept `i32` operands
//! but not the other way around.

use linquad_utils::mem::extend_buffer;

use crate::{
	affine::AffineFunction,
	coefficient::{impl_for_numbers, Coefficient, WidenInto},
	quadratic::QuadraticFunction,
	term::{LinearTerm, QuadraticTerm},
	variable::Variable,
};

/// Value that can be accumulated into an [`AffineFunction`].
pub trait AffineOperand<T: Coefficient> {
	/// `dest += scale * self`, appending terms without merging them.
	fn add_scaled_to(&self, dest: &mut AffineFunction<T>, scale: T);

	/// `dest = self`.
	fn assign_to(&self, dest: &mut AffineFunction<T>) {
		dest.set_zero();
		self.add_scaled_to(dest, T::ONE);
	}
}

/// Value that can be accumulated into a [`QuadraticFunction`].
pub trait QuadraticOperand<T: Coefficient> {
	/// `dest += scale * self`, appending terms without merging them.
	fn add_scaled_to_quadratic(&self, dest: &mut QuadraticFunction<T>, scale: T);

	/// `dest = self`.
	fn assign_to_quadratic(&self, dest: &mut QuadraticFunction<T>) {
		dest.set_zero();
		self.add_scaled_to_quadratic(dest, T::ONE);
	}
}

macro_rules! impl_number_operand {
	($s:ty) => {
		impl<T: Coefficient> AffineOperand<T> for $s
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn add_scaled_to(&self, dest: &mut AffineFunction<T>, scale: T) {
				dest.constant += WidenInto::<T>::widen(*self) * scale;
			}
		}

		impl<T: Coefficient> QuadraticOperand<T> for $s
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn add_scaled_to_quadratic(&self, dest: &mut QuadraticFunction<T>, scale: T) {
				self.add_scaled_to(&mut dest.affine, scale);
			}
		}
	};
}

impl_for_numbers!(impl_number_operand);

impl<T: Coefficient> AffineOperand<T> for Variable {
	#[inline]
	fn add_scaled_to(&self, dest: &mut AffineFunction<T>, scale: T) {
		dest.linear.push(LinearTerm::new(scale, *self));
	}
}

impl<T: Coefficient, U: WidenInto<T>> AffineOperand<T> for LinearTerm<U> {
	#[inline]
	fn add_scaled_to(&self, dest: &mut AffineFunction<T>, scale: T) {
		dest.linear.push(LinearTerm::new(self.coeff.widen() * scale, self.var));
	}
}

impl<T: Coefficient, U: WidenInto<T>> AffineOperand<T> for AffineFunction<U> {
	fn add_scaled_to(&self, dest: &mut AffineFunction<T>, scale: T) {
		let tail = extend_buffer(&mut dest.linear, self.linear.len(), LinearTerm::default());
		for (dest_term, term) in tail.iter_mut().zip(&self.linear) {
			*dest_term = LinearTerm::new(term.coeff.widen() * scale, term.var);
		}
		dest.constant += self.constant.widen() * scale;
	}

	fn assign_to(&self, dest: &mut AffineFunction<T>) {
		dest.copy_from(self);
	}
}

macro_rules! impl_affine_quadratic_operand {
	($($generics:ident),* ; $ty:ty) => {
		impl<T: Coefficient $(, $generics: WidenInto<T>)*> QuadraticOperand<T> for $ty {
			#[inline]
			fn add_scaled_to_quadratic(&self, dest: &mut QuadraticFunction<T>, scale: T) {
				self.add_scaled_to(&mut dest.affine, scale);
			}

			fn assign_to_quadratic(&self, dest: &mut QuadraticFunction<T>) {
				dest.quadratic.clear();
				self.assign_to(&mut dest.affine);
			}
		}
	};
}

impl_affine_quadratic_operand!(; Variable);
impl_affine_quadratic_operand!(U; LinearTerm<U>);
impl_affine_quadratic_operand!(U; AffineFunction<U>);

impl<T: Coefficient, U: WidenInto<T>> QuadraticOperand<T> for QuadraticTerm<U> {
	#[inline]
	fn add_scaled_to_quadratic(&self, dest: &mut QuadraticFunction<T>, scale: T) {
		dest.quadratic.push(QuadraticTerm::new(
			self.coeff.widen() * scale,
			self.rowvar,
			self.colvar,
		));
	}
}

impl<T: Coefficient, U: WidenInto<T>> QuadraticOperand<T> for QuadraticFunction<U> {
	fn add_scaled_to_quadratic(&self, dest: &mut QuadraticFunction<T>, scale: T) {
		let tail = extend_buffer(&mut dest.quadratic, self.quadratic.len(), QuadraticTerm::default());
		for (dest_term, term) in tail.iter_mut().zip(&self.quadratic) {
			*dest_term = QuadraticTerm::new(term.coeff.widen() * scale, term.rowvar, term.colvar);
		}
		self.affine.add_scaled_to(&mut dest.affine, scale);
	}

	fn assign_to_quadratic(&self, dest: &mut QuadraticFunction<T>) {
		dest.copy_from(self);
	}
}
