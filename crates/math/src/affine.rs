// Copyright 2025 Irreducible Inc.

use std::fmt::{self, Display};

use linquad_utils::{
	mem::resize_buffer,
	sorting::{is_strictly_ascending, sort_and_combine},
};
use tracing::trace;

use crate::{
	coefficient::{CoeffType, Coefficient, CommonType, Promote, WidenInto},
	error::Error,
	operand::AffineOperand,
	term::LinearTerm,
	values::{lookup, VariableValues},
	variable::Variable,
};

/// `Σ linear[i] + constant`.
///
/// The term sequence is kept in the order terms were added in; duplicate variables are allowed
/// until [`AffineFunction::canonicalize_in_place`] merges them. Equality is structural, so two
/// functions only compare equal by value after both have been canonicalized.
///
/// Functions are meant to be allocated once and then updated in place: every mutating method
/// reuses the capacity of the term buffer and returns `&mut Self` for chaining.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AffineFunction<T> {
	pub(crate) linear: Vec<LinearTerm<T>>,
	pub(crate) constant: T,
}

impl<T: Coefficient> AffineFunction<T> {
	pub fn new(linear: Vec<LinearTerm<T>>, constant: T) -> Self {
		Self { linear, constant }
	}

	pub fn zero() -> Self {
		Self::new(Vec::new(), T::ZERO)
	}

	pub fn linear(&self) -> &[LinearTerm<T>] {
		&self.linear
	}

	pub fn linear_mut(&mut self) -> &mut Vec<LinearTerm<T>> {
		&mut self.linear
	}

	pub fn constant(&self) -> T {
		self.constant
	}

	pub fn set_constant(&mut self, constant: T) -> &mut Self {
		self.constant = constant;
		self
	}

	/// Resets to the zero function, keeping the allocated term buffer.
	pub fn set_zero(&mut self) -> &mut Self {
		self.linear.clear();
		self.constant = T::ZERO;
		self
	}

	/// Overwrites `self` with `source`, reusing the term buffer when its capacity suffices.
	pub fn copy_from<U>(&mut self, source: &AffineFunction<U>) -> &mut Self
	where
		U: WidenInto<T>,
	{
		let linear = resize_buffer(&mut self.linear, source.linear.len(), LinearTerm::default());
		for (dest, term) in linear.iter_mut().zip(&source.linear) {
			*dest = term.convert_coeff();
		}
		self.constant = source.constant.widen();
		self
	}

	/// `self += x`. Terms are appended, not merged.
	pub fn add_in_place<X>(&mut self, x: &X) -> &mut Self
	where
		X: AffineOperand<T> + ?Sized,
	{
		x.add_scaled_to(self, T::ONE);
		self
	}

	/// `self -= x`. Terms are appended with negated coefficients, not merged.
	pub fn subtract_in_place<X>(&mut self, x: &X) -> &mut Self
	where
		X: AffineOperand<T> + ?Sized,
	{
		x.add_scaled_to(self, -T::ONE);
		self
	}

	/// `self = x + y`.
	pub fn assign_add<X, Y>(&mut self, x: &X, y: &Y) -> &mut Self
	where
		X: AffineOperand<T> + ?Sized,
		Y: AffineOperand<T> + ?Sized,
	{
		x.assign_to(self);
		self.add_in_place(y)
	}

	/// `self = x - y`.
	pub fn assign_sub<X, Y>(&mut self, x: &X, y: &Y) -> &mut Self
	where
		X: AffineOperand<T> + ?Sized,
		Y: AffineOperand<T> + ?Sized,
	{
		x.assign_to(self);
		self.subtract_in_place(y)
	}

	/// Sorts the terms by variable index and merges terms on the same variable.
	///
	/// Terms on the same variable are summed in the order they were added.
	pub fn canonicalize_in_place(&mut self) -> &mut Self {
		let before = self.linear.len();
		sort_and_combine(
			&mut self.linear,
			|term| term.var,
			|lhs, rhs| LinearTerm::new(lhs.coeff + rhs.coeff, lhs.var),
		);
		trace!(before, after = self.linear.len(), "canonicalized affine function");
		self
	}

	#[must_use]
	pub fn canonicalize(&self) -> Self {
		let mut result = self.clone();
		result.canonicalize_in_place();
		result
	}

	/// Whether the terms are sorted by strictly increasing variable index.
	pub fn is_canonical(&self) -> bool {
		is_strictly_ascending(self.linear.iter().map(|term| term.var))
	}

	/// Removes the terms whose coefficient magnitude does not exceed `tolerance`.
	///
	/// The constant is left untouched.
	pub fn prune_zero_in_place(&mut self, tolerance: T) -> &mut Self {
		self.linear
			.retain(|term| term.coeff.magnitude() > tolerance);
		self
	}

	/// Removes the terms with an exactly zero coefficient.
	pub fn prune_zeros_in_place(&mut self) -> &mut Self {
		self.prune_zero_in_place(T::ZERO)
	}

	#[must_use]
	pub fn prune_zero(&self, tolerance: T) -> Self {
		let mut result = self.clone();
		result.prune_zero_in_place(tolerance);
		result
	}

	/// Evaluates the function at the given variable values.
	///
	/// The result has the common type of the coefficient type and the value type.
	///
	/// ## Throws
	///
	/// * [`Error::VariableNotFound`] if a referenced variable has no value
	pub fn evaluate<V, M>(&self, values: &M) -> Result<CommonType<T, V>, Error>
	where
		V: Coefficient,
		T: Promote<V>,
		M: VariableValues<V> + ?Sized,
	{
		let mut result = <T as Promote<V>>::promote(self.constant);
		for term in &self.linear {
			let value = lookup(values, term.var)?;
			result += <T as Promote<V>>::promote(term.coeff) * <T as Promote<V>>::promote_rhs(value);
		}
		Ok(result)
	}

	pub fn convert_coeff<U: Coefficient>(&self) -> AffineFunction<U>
	where
		T: WidenInto<U>,
	{
		let mut result = AffineFunction::zero();
		result.copy_from(self);
		result
	}
}

impl<T: Coefficient> CoeffType for AffineFunction<T> {
	type Coeff = T;
}

impl<T: Coefficient> From<T> for AffineFunction<T> {
	fn from(constant: T) -> Self {
		Self::new(Vec::new(), constant)
	}
}

impl<T: Coefficient> From<Variable> for AffineFunction<T> {
	fn from(var: Variable) -> Self {
		Self::new(vec![LinearTerm::from(var)], T::ZERO)
	}
}

impl<T: Coefficient> From<LinearTerm<T>> for AffineFunction<T> {
	fn from(term: LinearTerm<T>) -> Self {
		Self::new(vec![term], T::ZERO)
	}
}

impl<T: Coefficient> Display for AffineFunction<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for term in &self.linear {
			write!(f, "{term} + ")?;
		}
		write!(f, "{}", self.constant)
	}
}
