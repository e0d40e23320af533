// Copyright 2025 Irreducible Inc.

//! Element-wise operations on vectors of functions.
//!
//! Destinations are preallocated by the caller and overwritten in place. Every operation checks
//! the operand shapes before touching the destination.

use std::ops::Deref;

use itertools::izip;
use linquad_utils::{array_2d::Array2D, bail, mem::resize_buffer};
use tracing::{debug, instrument};

use crate::{
	affine::AffineFunction,
	coefficient::{impl_for_numbers, Coefficient, WidenInto},
	error::Error,
	muladd::MulAdd,
	operand::AffineOperand,
	quadratic::QuadraticFunction,
	term::{LinearTerm, QuadraticTerm},
	variable::Variable,
};

fn check_dimension(arg: &str, expected: usize, actual: usize) -> Result<(), Error> {
	if expected != actual {
		debug!(arg, expected, actual, "operand shape mismatch");
		bail!(Error::DimensionMismatch {
			arg: arg.to_string(),
			expected,
			actual,
		});
	}
	Ok(())
}

/// `dest = Σ x[i] * y[i]`.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `x` and `y` have different lengths
#[instrument(skip_all, level = "trace", fields(len = x.len()))]
pub fn vecdot<'a, D, X, Y>(dest: &'a mut D, x: &[X], y: &[Y]) -> Result<&'a mut D, Error>
where
	D: MulAdd<X, Y>,
{
	check_dimension("y", x.len(), y.len())?;

	dest.set_zero();
	for (x_i, y_i) in izip!(x, y) {
		dest.muladd(x_i, y_i);
	}
	Ok(dest)
}

/// Product of two values that is a single linear term.
pub trait LinearProduct<T: Coefficient, Rhs: ?Sized> {
	fn product_term(&self, rhs: &Rhs) -> LinearTerm<T>;
}

macro_rules! impl_linear_product {
	($s:ty) => {
		impl<T: Coefficient> LinearProduct<T, Variable> for $s
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn product_term(&self, rhs: &Variable) -> LinearTerm<T> {
				LinearTerm::new(WidenInto::<T>::widen(*self), *rhs)
			}
		}

		impl<T: Coefficient> LinearProduct<T, $s> for Variable
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn product_term(&self, rhs: &$s) -> LinearTerm<T> {
				LinearTerm::new(WidenInto::<T>::widen(*rhs), *self)
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> LinearProduct<T, LinearTerm<U>> for $s
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn product_term(&self, rhs: &LinearTerm<U>) -> LinearTerm<T> {
				LinearTerm::new(WidenInto::<T>::widen(*self) * rhs.coeff.widen(), rhs.var)
			}
		}

		impl<T: Coefficient, U: WidenInto<T>> LinearProduct<T, $s> for LinearTerm<U>
		where
			$s: WidenInto<T>,
		{
			#[inline]
			fn product_term(&self, rhs: &$s) -> LinearTerm<T> {
				LinearTerm::new(self.coeff.widen() * WidenInto::<T>::widen(*rhs), self.var)
			}
		}
	};
}

impl_for_numbers!(impl_linear_product);

/// `dest = Σ x[i] * y[i]` for element pairs whose product is a single linear term.
///
/// Every product becomes one term of `dest` at the same position; terms are not merged, so
/// repeated variables in the operands show up as repeated terms.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `x` and `y` have different lengths
#[instrument(skip_all, level = "trace", fields(len = x.len()))]
pub fn vecdot_linear<'a, T, X, Y>(
	dest: &'a mut AffineFunction<T>,
	x: &[X],
	y: &[Y],
) -> Result<&'a mut AffineFunction<T>, Error>
where
	T: Coefficient,
	X: LinearProduct<T, Y>,
{
	check_dimension("y", x.len(), y.len())?;

	let linear = resize_buffer(&mut dest.linear, x.len(), LinearTerm::default());
	for (dest_term, x_i, y_i) in izip!(linear, x, y) {
		*dest_term = x_i.product_term(y_i);
	}
	dest.constant = T::ZERO;
	Ok(dest)
}

/// `dest[i] = x[i] + y[i]`, resizing `dest` to the operand length.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `x` and `y` have different lengths
#[instrument(skip_all, level = "trace", fields(len = x.len()))]
pub fn vecadd<'a, T, X, Y>(
	dest: &'a mut Vec<AffineFunction<T>>,
	x: &[X],
	y: &[Y],
) -> Result<&'a mut Vec<AffineFunction<T>>, Error>
where
	T: Coefficient,
	X: AffineOperand<T>,
	Y: AffineOperand<T>,
{
	check_dimension("y", x.len(), y.len())?;

	dest.resize_with(x.len(), AffineFunction::zero);
	for (dest_i, x_i, y_i) in izip!(dest.iter_mut(), x, y) {
		dest_i.assign_add(x_i, y_i);
	}
	Ok(dest)
}

/// `dest[i] = x[i] - y[i]`, resizing `dest` to the operand length.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `x` and `y` have different lengths
#[instrument(skip_all, level = "trace", fields(len = x.len()))]
pub fn vecsubtract<'a, T, X, Y>(
	dest: &'a mut Vec<AffineFunction<T>>,
	x: &[X],
	y: &[Y],
) -> Result<&'a mut Vec<AffineFunction<T>>, Error>
where
	T: Coefficient,
	X: AffineOperand<T>,
	Y: AffineOperand<T>,
{
	check_dimension("y", x.len(), y.len())?;

	dest.resize_with(x.len(), AffineFunction::zero);
	for (dest_i, x_i, y_i) in izip!(dest.iter_mut(), x, y) {
		dest_i.assign_sub(x_i, y_i);
	}
	Ok(dest)
}

/// Element type of the vector operand of [`matvecmul`].
pub trait MatVecOperand<T: Coefficient>: Sized {
	/// `dest = Σ row[j] * x[j]`.
	fn row_product<S: WidenInto<T>>(dest: &mut AffineFunction<T>, row: &[S], x: &[Self]);
}

impl<T: Coefficient> MatVecOperand<T> for Variable {
	fn row_product<S: WidenInto<T>>(dest: &mut AffineFunction<T>, row: &[S], x: &[Self]) {
		let linear = resize_buffer(&mut dest.linear, row.len(), LinearTerm::default());
		for (dest_term, &coeff, &var) in izip!(linear, row, x) {
			*dest_term = LinearTerm::new(coeff.widen(), var);
		}
		dest.constant = T::ZERO;
	}
}

impl<T: Coefficient, U: WidenInto<T>> MatVecOperand<T> for LinearTerm<U> {
	fn row_product<S: WidenInto<T>>(dest: &mut AffineFunction<T>, row: &[S], x: &[Self]) {
		let linear = resize_buffer(&mut dest.linear, row.len(), LinearTerm::default());
		for (dest_term, &coeff, term) in izip!(linear, row, x) {
			*dest_term = LinearTerm::new(coeff.widen() * term.coeff.widen(), term.var);
		}
		dest.constant = T::ZERO;
	}
}

impl<T: Coefficient, U: WidenInto<T>> MatVecOperand<T> for AffineFunction<U> {
	fn row_product<S: WidenInto<T>>(dest: &mut AffineFunction<T>, row: &[S], x: &[Self]) {
		dest.set_zero();
		for (&coeff, f) in izip!(row, x) {
			f.add_scaled_to(dest, coeff.widen());
		}
	}
}

/// `y = a * x` for a numeric matrix `a`.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `y` does not have one element per row of `a` or `x` does
///   not have one element per column
#[instrument(skip_all, level = "trace", fields(rows = a.rows(), cols = a.cols()))]
pub fn matvecmul<'a, T, S, D, X>(
	y: &'a mut [AffineFunction<T>],
	a: &Array2D<S, D>,
	x: &[X],
) -> Result<&'a mut [AffineFunction<T>], Error>
where
	T: Coefficient,
	S: WidenInto<T>,
	D: Deref<Target = [S]>,
	X: MatVecOperand<T>,
{
	check_dimension("y", a.rows(), y.len())?;
	check_dimension("x", a.cols(), x.len())?;

	for (y_i, row) in izip!(y.iter_mut(), a.iter_rows()) {
		X::row_product(y_i, row, x);
	}
	Ok(y)
}

/// `dest = xᵀ q y`, one quadratic term per entry of `q` in row-major order.
///
/// The result is not canonicalized.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if `x` does not have one element per row of `q` or `y` does
///   not have one element per column
#[instrument(skip_all, level = "trace", fields(rows = q.rows(), cols = q.cols()))]
pub fn bilinearmul<'a, T, S, D>(
	dest: &'a mut QuadraticFunction<T>,
	q: &Array2D<S, D>,
	x: &[Variable],
	y: &[Variable],
) -> Result<&'a mut QuadraticFunction<T>, Error>
where
	T: Coefficient,
	S: WidenInto<T>,
	D: Deref<Target = [S]>,
{
	check_dimension("x", q.rows(), x.len())?;
	check_dimension("y", q.cols(), y.len())?;

	let cols = q.cols();
	dest.affine.set_zero();
	let quadratic = resize_buffer(&mut dest.quadratic, q.elements().len(), QuadraticTerm::default());
	for (k, (dest_term, &coeff)) in izip!(quadratic, q.elements()).enumerate() {
		*dest_term = QuadraticTerm::new(coeff.widen(), x[k / cols], y[k % cols]);
	}
	Ok(dest)
}

/// `dest[i] = x[i] * c`, resizing `dest` to the length of `x`.
///
/// Scaling is commutative, so this also covers `c * x[i]`.
#[instrument(skip_all, level = "trace", fields(len = x.len()))]
pub fn scale<'a, T, X, S>(
	dest: &'a mut Vec<AffineFunction<T>>,
	x: &[X],
	c: &S,
) -> &'a mut Vec<AffineFunction<T>>
where
	T: Coefficient,
	AffineFunction<T>: MulAdd<X, S>,
{
	dest.resize_with(x.len(), AffineFunction::zero);
	for (dest_i, x_i) in izip!(dest.iter_mut(), x) {
		dest_i.assign_mul(x_i, c);
	}
	dest
}

/// Copies the concatenation of `sources` into `dest` element by element.
///
/// ## Throws
///
/// * [`Error::DimensionMismatch`] if the sources do not have exactly `dest.len()` elements in
///   total
#[instrument(skip_all, level = "trace", fields(len = dest.len(), sources = sources.len()))]
pub fn vcat<'a, T, U>(
	dest: &'a mut [AffineFunction<T>],
	sources: &[&[AffineFunction<U>]],
) -> Result<&'a mut [AffineFunction<T>], Error>
where
	T: Coefficient,
	U: WidenInto<T>,
{
	let total = sources.iter().map(|source| source.len()).sum();
	check_dimension("sources", dest.len(), total)?;

	for (dest_i, source_i) in izip!(dest.iter_mut(), sources.iter().copied().flatten()) {
		dest_i.copy_from(source_i);
	}
	Ok(dest)
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	const X1: Variable = Variable::new(1);
	const X2: Variable = Variable::new(2);
	const X3: Variable = Variable::new(3);

	fn affine<T: Coefficient>(terms: &[(T, Variable)], constant: T) -> AffineFunction<T> {
		AffineFunction::new(
			terms
				.iter()
				.map(|&(coeff, var)| LinearTerm::new(coeff, var))
				.collect(),
			constant,
		)
	}

	#[test]
	fn test_vecdot_of_affine_functions() {
		let x = [affine(&[(1.0, X1)], 1.0), affine(&[(2.0, X2)], 0.0)];
		let y = [2.0, -1.0];
		let mut dest = AffineFunction::<f64>::zero();
		dest.add_in_place(&X3);

		vecdot(&mut dest, &x, &y).unwrap();
		assert_eq!(dest, affine(&[(2.0, X1), (-2.0, X2)], 2.0));
	}

	#[test]
	fn test_vecdot_into_quadratic() {
		let x = [X1, X2];
		let y = [affine(&[(1i32, X2)], 1), affine(&[(1i32, X1)], 0)];
		let mut dest = QuadraticFunction::<i64>::zero();

		vecdot(&mut dest, &x, &y).unwrap();
		assert_eq!(
			dest.quadratic(),
			&[QuadraticTerm::new(1, X1, X2), QuadraticTerm::new(1, X2, X1)]
		);
		assert_eq!(dest.affine(), &affine(&[(1, X1), (0, X2)], 0));

		dest.canonicalize_in_place();
		assert_eq!(dest.quadratic(), &[QuadraticTerm::new(2, X1, X2)]);
	}

	#[test]
	fn test_vecdot_linear() {
		let coeffs = [3i32, 4, 5];
		let vars = [X1, X2, X1];
		let mut dest = affine(&[(9i64, X3)], 9);

		vecdot_linear(&mut dest, &coeffs, &vars).unwrap();
		assert_eq!(dest, affine(&[(3, X1), (4, X2), (5, X1)], 0));

		let terms = [LinearTerm::new(2i8, X2), LinearTerm::new(-1i8, X3)];
		vecdot_linear(&mut dest, &terms, &[10i64, 10]).unwrap();
		assert_eq!(dest, affine(&[(20, X2), (-10, X3)], 0));
	}

	#[test]
	fn test_vecdot_dimension_mismatch() {
		let mut dest = AffineFunction::<f64>::zero();
		assert_matches!(
			vecdot(&mut dest, &[1.0, 2.0], &[X1]),
			Err(Error::DimensionMismatch {
				expected: 2,
				actual: 1,
				..
			})
		);
		assert_matches!(
			vecdot_linear(&mut dest, &[X1], &[1.0, 2.0]),
			Err(Error::DimensionMismatch { .. })
		);
	}

	#[test]
	fn test_vecadd_and_vecsubtract() {
		let x = [affine(&[(1, X1)], 1), affine(&[(1, X2)], 2)];
		let y = [X3, X1];
		let mut dest = vec![AffineFunction::<i32>::zero(); 5];

		vecadd(&mut dest, &x, &y).unwrap();
		assert_eq!(
			dest,
			vec![affine(&[(1, X1), (1, X3)], 1), affine(&[(1, X2), (1, X1)], 2)]
		);

		vecsubtract(&mut dest, &x, &y).unwrap();
		assert_eq!(
			dest,
			vec![affine(&[(1, X1), (-1, X3)], 1), affine(&[(1, X2), (-1, X1)], 2)]
		);

		assert_matches!(
			vecadd(&mut dest, &x, &y[..1]),
			Err(Error::DimensionMismatch { .. })
		);
		assert_matches!(
			vecsubtract(&mut dest, &x[..1], &y),
			Err(Error::DimensionMismatch { .. })
		);
	}

	#[test]
	fn test_matvecmul_with_variables() {
		let a = Array2D::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
		let mut y = vec![AffineFunction::<f64>::zero(); 2];

		matvecmul(&mut y, &a, &[X1, X2, X3]).unwrap();
		assert_eq!(y[0], affine(&[(1.0, X1), (2.0, X2), (3.0, X3)], 0.0));
		assert_eq!(y[1], affine(&[(4.0, X1), (5.0, X2), (6.0, X3)], 0.0));

		let terms = [LinearTerm::new(2.0, X1), LinearTerm::new(1.0, X2), LinearTerm::new(0.5, X3)];
		matvecmul(&mut y, &a, &terms).unwrap();
		assert_eq!(y[0], affine(&[(2.0, X1), (2.0, X2), (1.5, X3)], 0.0));
	}

	#[test]
	fn test_matvecmul_with_affine_functions() {
		let a = Array2D::from_data(1, 2, vec![2i32, -1]).unwrap();
		let x = [affine(&[(1i32, X1)], 1), affine(&[(1i32, X2)], 3)];
		let mut y = vec![AffineFunction::<i64>::zero()];

		matvecmul(&mut y, &a, &x).unwrap();
		assert_eq!(y[0], affine(&[(2, X1), (-1, X2)], -1));
	}

	#[test]
	fn test_matvecmul_dimension_mismatch() {
		let a = Array2D::from_data(2, 2, vec![1.0; 4]).unwrap();
		let mut y = vec![AffineFunction::<f64>::zero(); 3];
		assert_matches!(
			matvecmul(&mut y, &a, &[X1, X2]),
			Err(Error::DimensionMismatch {
				expected: 2,
				actual: 3,
				..
			})
		);
		assert_matches!(
			matvecmul(&mut y[..2], &a, &[X1]),
			Err(Error::DimensionMismatch {
				expected: 2,
				actual: 1,
				..
			})
		);
	}

	#[test]
	fn test_bilinearmul() {
		let q = Array2D::from_data(2, 2, vec![1i32, 2, 3, 4]).unwrap();
		let mut dest = QuadraticFunction::<f64>::from(X3);

		bilinearmul(&mut dest, &q, &[X1, X2], &[X2, X3]).unwrap();
		assert_eq!(
			dest.quadratic(),
			&[
				QuadraticTerm::new(1.0, X1, X2),
				QuadraticTerm::new(2.0, X1, X3),
				QuadraticTerm::new(3.0, X2, X2),
				QuadraticTerm::new(4.0, X2, X3),
			]
		);
		assert_eq!(dest.affine(), &AffineFunction::zero());

		assert_matches!(
			bilinearmul(&mut dest, &q, &[X1], &[X2, X3]),
			Err(Error::DimensionMismatch { .. })
		);
	}

	#[test]
	fn test_scale() {
		let x = [affine(&[(1.0, X1)], 2.0), affine(&[(-1.0, X2)], 0.0)];
		let mut dest = Vec::<AffineFunction<f64>>::new();

		scale(&mut dest, &x, &2.0f64);
		assert_eq!(dest, vec![affine(&[(2.0, X1)], 4.0), affine(&[(-2.0, X2)], 0.0)]);

		scale(&mut dest, &[X1, X2], &3i32);
		assert_eq!(dest, vec![affine(&[(3.0, X1)], 0.0), affine(&[(3.0, X2)], 0.0)]);
	}

	#[test]
	fn test_vcat() {
		let first = [affine(&[(1i32, X1)], 0)];
		let second = [affine(&[(1i32, X2)], 1), affine(&[(1i32, X3)], 2)];
		let mut dest = vec![AffineFunction::<i64>::zero(); 3];

		vcat(&mut dest, &[&first, &second]).unwrap();
		assert_eq!(
			dest,
			vec![
				affine(&[(1, X1)], 0),
				affine(&[(1, X2)], 1),
				affine(&[(1, X3)], 2)
			]
		);

		assert_matches!(
			vcat(&mut dest, &[&first]),
			Err(Error::DimensionMismatch {
				expected: 3,
				actual: 1,
				..
			})
		);
	}
}
