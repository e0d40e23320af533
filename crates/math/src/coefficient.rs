// Copyright 2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	iter::Sum,
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Numeric type usable as the coefficient of terms and functions.
pub trait Coefficient:
	Sized
	+ Copy
	+ Default
	+ Debug
	+ Display
	+ PartialEq
	+ PartialOrd
	+ Send
	+ Sync
	+ 'static
	+ Neg<Output = Self>
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ Sum
{
	/// The additive identity.
	const ZERO: Self;

	/// The multiplicative identity.
	const ONE: Self;

	/// Absolute value, saturating for the most negative integer.
	fn magnitude(self) -> Self;

	fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}
}

/// Conversion along the promotion lattice `i8 < i16 < i32 < i64 < f32 < f64`.
///
/// Only conversions towards a greater (or the same) type exist, so a narrowing conversion such
/// as `f64 -> f32` is a compile error rather than a silent loss of precision.
pub trait WidenInto<T: Coefficient>: Coefficient {
	fn widen(self) -> T;
}

/// Resolution of the common coefficient type of two coefficient types.
///
/// The common type is the greater of the two in the promotion lattice. The relation is
/// symmetric: `CommonType<A, B>` and `CommonType<B, A>` are the same type.
pub trait Promote<Rhs: Coefficient>: Coefficient {
	type Output: Coefficient;

	fn promote(self) -> <Self as Promote<Rhs>>::Output;

	fn promote_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;
}

pub type CommonType<A, B> = <A as Promote<B>>::Output;

/// Coefficient type of a number, term or function type.
pub trait CoeffType {
	type Coeff: Coefficient;
}

pub type CoeffOf<X> = <X as CoeffType>::Coeff;

macro_rules! impl_coefficient {
	($($ty:ty => $zero:literal, $one:literal, $abs:ident);* $(;)?) => {
		$(
			impl Coefficient for $ty {
				const ZERO: Self = $zero;
				const ONE: Self = $one;

				#[inline]
				fn magnitude(self) -> Self {
					self.$abs()
				}
			}

			impl CoeffType for $ty {
				type Coeff = $ty;
			}
		)*
	};
}

impl_coefficient! {
	i8 => 0, 1, saturating_abs;
	i16 => 0, 1, saturating_abs;
	i32 => 0, 1, saturating_abs;
	i64 => 0, 1, saturating_abs;
	f32 => 0.0, 1.0, abs;
	f64 => 0.0, 1.0, abs;
}

macro_rules! impl_widen_lattice {
	() => {};
	($head:ty $(, $tail:ty)*) => {
		impl WidenInto<$head> for $head {
			#[inline]
			fn widen(self) -> $head {
				self
			}
		}

		$(
			impl WidenInto<$tail> for $head {
				#[inline]
				fn widen(self) -> $tail {
					self as $tail
				}
			}
		)*

		impl_widen_lattice!($($tail),*);
	};
}

impl_widen_lattice!(i8, i16, i32, i64, f32, f64);

macro_rules! impl_promote {
	($lhs:ty, $rhs:ty => $out:ty) => {
		impl Promote<$rhs> for $lhs {
			type Output = $out;

			#[inline]
			fn promote(self) -> $out {
				WidenInto::<$out>::widen(self)
			}

			#[inline]
			fn promote_rhs(rhs: $rhs) -> $out {
				WidenInto::<$out>::widen(rhs)
			}
		}
	};
}

macro_rules! impl_promote_lattice {
	() => {};
	($head:ty $(, $tail:ty)*) => {
		impl_promote!($head, $head => $head);
		$(
			impl_promote!($head, $tail => $tail);
			impl_promote!($tail, $head => $tail);
		)*

		impl_promote_lattice!($($tail),*);
	};
}

impl_promote_lattice!(i8, i16, i32, i64, f32, f64);

/// Invokes `$mac!(ty)` once for every supported coefficient type.
macro_rules! impl_for_numbers {
	($mac:ident) => {
		$mac!(i8);
		$mac!(i16);
		$mac!(i32);
		$mac!(i64);
		$mac!(f32);
		$mac!(f64);
	};
}

pub(crate) use impl_for_numbers;
