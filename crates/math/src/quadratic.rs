// Copyright 2025 Irreducible Inc.

use std::fmt::{self, Display};

use linquad_utils::{
	mem::resize_buffer,
	sorting::{is_strictly_ascending, sort_and_combine},
};
use tracing::trace;

use crate::{
	affine::AffineFunction,
	coefficient::{CoeffType, Coefficient, CommonType, Promote, WidenInto},
	error::Error,
	operand::QuadraticOperand,
	term::{LinearTerm, QuadraticTerm},
	values::{lookup, VariableValues},
	variable::Variable,
};

/// `Σ quadratic[i] + affine`.
///
/// Like [`AffineFunction`], the quadratic term sequence is append-only between
/// canonicalizations and may hold both `(x1, x2)` and `(x2, x1)` products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QuadraticFunction<T> {
	pub(crate) quadratic: Vec<QuadraticTerm<T>>,
	pub(crate) affine: AffineFunction<T>,
}

impl<T: Coefficient> QuadraticFunction<T> {
	pub fn new(quadratic: Vec<QuadraticTerm<T>>, affine: AffineFunction<T>) -> Self {
		Self { quadratic, affine }
	}

	pub fn zero() -> Self {
		Self::new(Vec::new(), AffineFunction::zero())
	}

	pub fn quadratic(&self) -> &[QuadraticTerm<T>] {
		&self.quadratic
	}

	pub fn quadratic_mut(&mut self) -> &mut Vec<QuadraticTerm<T>> {
		&mut self.quadratic
	}

	pub fn affine(&self) -> &AffineFunction<T> {
		&self.affine
	}

	pub fn affine_mut(&mut self) -> &mut AffineFunction<T> {
		&mut self.affine
	}

	/// Resets to the zero function, keeping both term buffers.
	pub fn set_zero(&mut self) -> &mut Self {
		self.quadratic.clear();
		self.affine.set_zero();
		self
	}

	/// Overwrites `self` with `source`, reusing both term buffers when their capacity suffices.
	pub fn copy_from<U>(&mut self, source: &QuadraticFunction<U>) -> &mut Self
	where
		U: WidenInto<T>,
	{
		let quadratic =
			resize_buffer(&mut self.quadratic, source.quadratic.len(), QuadraticTerm::default());
		for (dest, term) in quadratic.iter_mut().zip(&source.quadratic) {
			*dest = term.convert_coeff();
		}
		self.affine.copy_from(&source.affine);
		self
	}

	/// `self += x`. Terms are appended, not merged.
	pub fn add_in_place<X>(&mut self, x: &X) -> &mut Self
	where
		X: QuadraticOperand<T> + ?Sized,
	{
		x.add_scaled_to_quadratic(self, T::ONE);
		self
	}

	/// `self -= x`. Terms are appended with negated coefficients, not merged.
	pub fn subtract_in_place<X>(&mut self, x: &X) -> &mut Self
	where
		X: QuadraticOperand<T> + ?Sized,
	{
		x.add_scaled_to_quadratic(self, -T::ONE);
		self
	}

	/// `self = x + y`.
	pub fn assign_add<X, Y>(&mut self, x: &X, y: &Y) -> &mut Self
	where
		X: QuadraticOperand<T> + ?Sized,
		Y: QuadraticOperand<T> + ?Sized,
	{
		x.assign_to_quadratic(self);
		self.add_in_place(y)
	}

	/// `self = x - y`.
	pub fn assign_sub<X, Y>(&mut self, x: &X, y: &Y) -> &mut Self
	where
		X: QuadraticOperand<T> + ?Sized,
		Y: QuadraticOperand<T> + ?Sized,
	{
		x.assign_to_quadratic(self);
		self.subtract_in_place(y)
	}

	/// Brings the function to canonical form.
	///
	/// The affine part is canonicalized, every quadratic term is oriented so that
	/// `rowvar <= colvar`, and the quadratic terms are sorted by their variable pair with terms on
	/// the same pair summed in the order they were added.
	pub fn canonicalize_in_place(&mut self) -> &mut Self {
		self.affine.canonicalize_in_place();

		let before = self.quadratic.len();
		for term in &mut self.quadratic {
			*term = term.canonicalize();
		}
		sort_and_combine(
			&mut self.quadratic,
			|term| (term.rowvar, term.colvar),
			|lhs, rhs| QuadraticTerm::new(lhs.coeff + rhs.coeff, lhs.rowvar, lhs.colvar),
		);
		trace!(before, after = self.quadratic.len(), "canonicalized quadratic function");
		self
	}

	#[must_use]
	pub fn canonicalize(&self) -> Self {
		let mut result = self.clone();
		result.canonicalize_in_place();
		result
	}

	pub fn is_canonical(&self) -> bool {
		self.affine.is_canonical()
			&& self.quadratic.iter().all(QuadraticTerm::is_canonical)
			&& is_strictly_ascending(self.quadratic.iter().map(QuadraticTerm::canonical_pair))
	}

	/// Removes the linear and quadratic terms whose coefficient magnitude does not exceed
	/// `tolerance`.
	pub fn prune_zero_in_place(&mut self, tolerance: T) -> &mut Self {
		self.quadratic
			.retain(|term| term.coeff.magnitude() > tolerance);
		self.affine.prune_zero_in_place(tolerance);
		self
	}

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
	/// ## Throws
	///
	/// * [`Error::VariableNotFound`] if a referenced variable has no value
	pub fn evaluate<V, M>(&self, values: &M) -> Result<CommonType<T, V>, Error>
	where
		V: Coefficient,
		T: Promote<V>,
		M: VariableValues<V> + ?Sized,
	{
		let mut result = self.affine.evaluate(values)?;
		for term in &self.quadratic {
			let row = <T as Promote<V>>::promote_rhs(lookup(values, term.rowvar)?);
			let col = <T as Promote<V>>::promote_rhs(lookup(values, term.colvar)?);
			result += <T as Promote<V>>::promote(term.coeff) * row * col;
		}
		Ok(result)
	}

	pub fn convert_coeff<U: Coefficient>(&self) -> QuadraticFunction<U>
	where
		T: WidenInto<U>,
	{
		let mut result = QuadraticFunction::zero();
		result.copy_from(self);
		result
	}
}

impl<T: Coefficient> CoeffType for QuadraticFunction<T> {
	type Coeff = T;
}

impl<T: Coefficient> From<T> for QuadraticFunction<T> {
	fn from(constant: T) -> Self {
		Self::new(Vec::new(), AffineFunction::from(constant))
	}
}

impl<T: Coefficient> From<Variable> for QuadraticFunction<T> {
	fn from(var: Variable) -> Self {
		Self::new(Vec::new(), AffineFunction::from(var))
	}
}

impl<T: Coefficient> From<LinearTerm<T>> for QuadraticFunction<T> {
	fn from(term: LinearTerm<T>) -> Self {
		Self::new(Vec::new(), AffineFunction::from(term))
	}
}

impl<T: Coefficient> From<QuadraticTerm<T>> for QuadraticFunction<T> {
	fn from(term: QuadraticTerm<T>) -> Self {
		Self::new(vec![term], AffineFunction::zero())
	}
}

impl<T: Coefficient> From<AffineFunction<T>> for QuadraticFunction<T> {
	fn from(affine: AffineFunction<T>) -> Self {
		Self::new(Vec::new(), affine)
	}
}

impl<T: Coefficient> Display for QuadraticFunction<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for term in &self.quadratic {
			write!(f, "{term} + ")?;
		}
		write!(f, "{}", self.affine)
	}
}
