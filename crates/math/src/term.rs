// Copyright 2025 Irreducible Inc.

use std::{
	fmt::{self, Display},
	ops::{Mul, Neg},
};

use linquad_utils::ensure;

use crate::{
	coefficient::{impl_for_numbers, CoeffType, Coefficient, WidenInto},
	error::Error,
	variable::Variable,
};

/// `coeff * var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinearTerm<T> {
	pub coeff: T,
	pub var: Variable,
}

/// `coeff * rowvar * colvar`.
///
/// `(rowvar, colvar)` and `(colvar, rowvar)` describe the same product but are different
/// representations until [`QuadraticTerm::canonicalize`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuadraticTerm<T> {
	pub coeff: T,
	pub rowvar: Variable,
	pub colvar: Variable,
}

impl<T: Coefficient> LinearTerm<T> {
	pub const fn new(coeff: T, var: Variable) -> Self {
		Self { coeff, var }
	}

	/// Merges two terms on the same variable by summing their coefficients.
	///
	/// ## Throws
	///
	/// * [`Error::TermMismatch`] if the terms are on different variables
	pub fn combine(&self, other: &Self) -> Result<Self, Error> {
		ensure!(
			self.var == other.var,
			Error::TermMismatch {
				lhs: self.var.to_string(),
				rhs: other.var.to_string(),
			}
		);
		Ok(Self::new(self.coeff + other.coeff, self.var))
	}

	pub fn convert_coeff<U: Coefficient>(&self) -> LinearTerm<U>
	where
		T: WidenInto<U>,
	{
		LinearTerm::new(self.coeff.widen(), self.var)
	}
}

impl<T: Coefficient> QuadraticTerm<T> {
	pub const fn new(coeff: T, rowvar: Variable, colvar: Variable) -> Self {
		Self {
			coeff,
			rowvar,
			colvar,
		}
	}

	/// Returns the equivalent term with `rowvar.index() <= colvar.index()`.
	#[must_use]
	pub fn canonicalize(&self) -> Self {
		if self.rowvar > self.colvar {
			Self::new(self.coeff, self.colvar, self.rowvar)
		} else {
			*self
		}
	}

	pub fn is_canonical(&self) -> bool {
		self.rowvar <= self.colvar
	}

	/// The `(min, max)` index pair identifying the product regardless of operand order.
	pub fn canonical_pair(&self) -> (usize, usize) {
		let (row, col) = (self.rowvar.index(), self.colvar.index());
		if row <= col {
			(row, col)
		} else {
			(col, row)
		}
	}

	/// Merges two terms on the same canonical variable pair by summing their coefficients.
	///
	/// The result keeps the variable order of `self`.
	///
	/// ## Throws
	///
	/// * [`Error::TermMismatch`] if the terms are on different variable pairs
	pub fn combine(&self, other: &Self) -> Result<Self, Error> {
		ensure!(
			self.canonical_pair() == other.canonical_pair(),
			Error::TermMismatch {
				lhs: format!("{} * {}", self.rowvar, self.colvar),
				rhs: format!("{} * {}", other.rowvar, other.colvar),
			}
		);
		Ok(Self::new(self.coeff + other.coeff, self.rowvar, self.colvar))
	}

	pub fn convert_coeff<U: Coefficient>(&self) -> QuadraticTerm<U>
	where
		T: WidenInto<U>,
	{
		QuadraticTerm::new(self.coeff.widen(), self.rowvar, self.colvar)
	}
}

impl<T: Coefficient> From<Variable> for LinearTerm<T> {
	fn from(var: Variable) -> Self {
		Self::new(T::ONE, var)
	}
}

impl<T: Coefficient> CoeffType for LinearTerm<T> {
	type Coeff = T;
}

impl<T: Coefficient> CoeffType for QuadraticTerm<T> {
	type Coeff = T;
}

impl<T: Coefficient> Neg for LinearTerm<T> {
	type Output = Self;

	fn neg(self) -> Self {
		Self::new(-self.coeff, self.var)
	}
}

impl<T: Coefficient> Neg for QuadraticTerm<T> {
	type Output = Self;

	fn neg(self) -> Self {
		Self::new(-self.coeff, self.rowvar, self.colvar)
	}
}

impl<T: Coefficient> Mul<T> for LinearTerm<T> {
	type Output = Self;

	fn mul(self, rhs: T) -> Self {
		Self::new(self.coeff * rhs, self.var)
	}
}

impl<T: Coefficient> Mul<T> for QuadraticTerm<T> {
	type Output = Self;

	fn mul(self, rhs: T) -> Self {
		Self::new(self.coeff * rhs, self.rowvar, self.colvar)
	}
}

impl<T: Coefficient> Mul<Variable> for LinearTerm<T> {
	type Output = QuadraticTerm<T>;

	fn mul(self, rhs: Variable) -> QuadraticTerm<T> {
		QuadraticTerm::new(self.coeff, self.var, rhs)
	}
}

impl<T: Coefficient> Mul<LinearTerm<T>> for LinearTerm<T> {
	type Output = QuadraticTerm<T>;

	fn mul(self, rhs: Self) -> QuadraticTerm<T> {
		QuadraticTerm::new(self.coeff * rhs.coeff, self.var, rhs.var)
	}
}

macro_rules! impl_number_term_mul {
	($ty:ty) => {
		impl Mul<Variable> for $ty {
			type Output = LinearTerm<$ty>;

			fn mul(self, rhs: Variable) -> LinearTerm<$ty> {
				LinearTerm::new(self, rhs)
			}
		}

		impl Mul<$ty> for Variable {
			type Output = LinearTerm<$ty>;

			fn mul(self, rhs: $ty) -> LinearTerm<$ty> {
				LinearTerm::new(rhs, self)
			}
		}

		impl Mul<LinearTerm<$ty>> for $ty {
			type Output = LinearTerm<$ty>;

			fn mul(self, rhs: LinearTerm<$ty>) -> LinearTerm<$ty> {
				rhs * self
			}
		}

		impl Mul<QuadraticTerm<$ty>> for $ty {
			type Output = QuadraticTerm<$ty>;

			fn mul(self, rhs: QuadraticTerm<$ty>) -> QuadraticTerm<$ty> {
				rhs * self
			}
		}
	};
}

impl_for_numbers!(impl_number_term_mul);

impl<T: Coefficient> Display for LinearTerm<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} * {}", self.coeff, self.var)
	}
}

impl<T: Coefficient> Display for QuadraticTerm<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} * {} * {}", self.coeff, self.rowvar, self.colvar)
	}
}
