// Copyright 2025 Irreducible Inc.

//! Operator overloads building fresh functions out of the in-place API.
//!
//! These allocate and are meant for model construction. Per-iteration updates use the
//! `&mut self` methods instead.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::{
	affine::AffineFunction,
	coefficient::{Coefficient, WidenInto},
	muladd::MulAdd,
	operand::{AffineOperand, QuadraticOperand},
	quadratic::QuadraticFunction,
	term::{LinearTerm, QuadraticTerm},
};

impl<T: Coefficient, R: AffineOperand<T>> Add<R> for AffineFunction<T> {
	type Output = Self;

	fn add(mut self, rhs: R) -> Self {
		self.add_in_place(&rhs);
		self
	}
}

impl<T: Coefficient, R: AffineOperand<T>> Sub<R> for AffineFunction<T> {
	type Output = Self;

	fn sub(mut self, rhs: R) -> Self {
		self.subtract_in_place(&rhs);
		self
	}
}

impl<T: Coefficient, R: AffineOperand<T>> AddAssign<R> for AffineFunction<T> {
	fn add_assign(&mut self, rhs: R) {
		self.add_in_place(&rhs);
	}
}

impl<T: Coefficient, R: AffineOperand<T>> SubAssign<R> for AffineFunction<T> {
	fn sub_assign(&mut self, rhs: R) {
		self.subtract_in_place(&rhs);
	}
}

impl<T: Coefficient, R: AffineOperand<T>> Add<R> for LinearTerm<T> {
	type Output = AffineFunction<T>;

	fn add(self, rhs: R) -> AffineFunction<T> {
		AffineFunction::<T>::from(self) + rhs
	}
}

impl<T: Coefficient, R: AffineOperand<T>> Sub<R> for LinearTerm<T> {
	type Output = AffineFunction<T>;

	fn sub(self, rhs: R) -> AffineFunction<T> {
		AffineFunction::<T>::from(self) - rhs
	}
}

impl<T: Coefficient> Neg for AffineFunction<T> {
	type Output = Self;

	fn neg(mut self) -> Self {
		for term in &mut self.linear {
			term.coeff = -term.coeff;
		}
		self.constant = -self.constant;
		self
	}
}

impl<T: Coefficient> Mul<T> for AffineFunction<T> {
	type Output = Self;

	fn mul(mut self, rhs: T) -> Self {
		for term in &mut self.linear {
			term.coeff *= rhs;
		}
		self.constant *= rhs;
		self
	}
}

impl<T: Coefficient + WidenInto<T>> Mul<AffineFunction<T>> for AffineFunction<T> {
	type Output = QuadraticFunction<T>;

	fn mul(self, rhs: Self) -> QuadraticFunction<T> {
		let mut result = QuadraticFunction::<T>::zero();
		result.muladd(&self, &rhs);
		result
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> Add<R> for QuadraticFunction<T> {
	type Output = Self;

	fn add(mut self, rhs: R) -> Self {
		self.add_in_place(&rhs);
		self
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> Sub<R> for QuadraticFunction<T> {
	type Output = Self;

	fn sub(mut self, rhs: R) -> Self {
		self.subtract_in_place(&rhs);
		self
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> AddAssign<R> for QuadraticFunction<T> {
	fn add_assign(&mut self, rhs: R) {
		self.add_in_place(&rhs);
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> SubAssign<R> for QuadraticFunction<T> {
	fn sub_assign(&mut self, rhs: R) {
		self.subtract_in_place(&rhs);
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> Add<R> for QuadraticTerm<T> {
	type Output = QuadraticFunction<T>;

	fn add(self, rhs: R) -> QuadraticFunction<T> {
		QuadraticFunction::<T>::from(self) + rhs
	}
}

impl<T: Coefficient, R: QuadraticOperand<T>> Sub<R> for QuadraticTerm<T> {
	type Output = QuadraticFunction<T>;

	fn sub(self, rhs: R) -> QuadraticFunction<T> {
		QuadraticFunction::<T>::from(self) - rhs
	}
}

impl<T: Coefficient> Neg for QuadraticFunction<T> {
	type Output = Self;

	fn neg(mut self) -> Self {
		for term in &mut self.quadratic {
			term.coeff = -term.coeff;
		}
		self.affine = -self.affine;
		self
	}
}

impl<T: Coefficient> Mul<T> for QuadraticFunction<T> {
	type Output = Self;

	fn mul(mut self, rhs: T) -> Self {
		for term in &mut self.quadratic {
			term.coeff *= rhs;
		}
		self.affine = self.affine * rhs;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::variable::Variable;

	const X1: Variable = Variable::new(1);
	const X2: Variable = Variable::new(2);

	#[test]
	fn test_affine_expression() {
		// x1 + x2 - 2 * x2 + 3
		let f = LinearTerm::<i32>::from(X1) + X2 - 2i32 * X2 + 3i32;
		assert_eq!(
			f.canonicalize(),
			AffineFunction::new(vec![LinearTerm::new(1, X1), LinearTerm::new(-1, X2)], 3)
		);

		let mut g = -f.clone() * 2;
		g += f * 2;
		g -= 1i8;
		assert_eq!(g.canonicalize().prune_zeros_in_place(), &AffineFunction::<i32>::from(-1));
	}

	#[test]
	fn test_quadratic_expression() {
		// 2 * x1 * x1 + 3 * x1 * x2 - 2 * x2 + 4
		let g = 2.0f64 * X1 * X1 + 3.0f64 * X1 * X2 - 2.0f64 * X2 + 4.0f64;
		assert_eq!(g.quadratic().len(), 2);
		assert_eq!(g.evaluate(&[0.0, 4.0, -3.0][..]), Ok(6.0));

		let h = -(g.clone() * 0.5);
		assert_eq!(h.evaluate(&[0.0, 4.0, -3.0][..]), Ok(-3.0));
	}

	#[test]
	fn test_product_of_affine_functions() {
		let x = AffineFunction::<i64>::from(LinearTerm::new(1i64, X1)) + 1i64;
		let y = AffineFunction::<i64>::from(LinearTerm::new(1i64, X2)) - 1i64;
		let product = x * y;

		assert_eq!(product.quadratic(), &[QuadraticTerm::new(1, X1, X2)]);
		assert_eq!(product.evaluate(&vec![0i64, 2, 3]), Ok(6));
	}

	fn generic_product<T: Coefficient + WidenInto<T>>(
		x: AffineFunction<T>,
		y: AffineFunction<T>,
	) -> QuadraticFunction<T> {
		x * y
	}

	#[test]
	fn test_product_in_generic_context() {
		let x = AffineFunction::new(vec![LinearTerm::new(2.0f32, X1)], 0.5);
		let y = AffineFunction::new(vec![LinearTerm::new(-1.0f32, X2)], 4.0);
		let product = generic_product(x, y);

		assert_eq!(product.quadratic(), &[QuadraticTerm::new(-2.0f32, X1, X2)]);
		assert_eq!(product.evaluate(&[0.0f32, 1.0, 2.0][..]), Ok(5.0));
	}
}
