// Copyright 2024-2025 Irreducible Inc.

/// Returns the given error from the enclosing function, converting it with `Into`.
///
/// With the `bail_panic` feature the macro panics at the point of detection instead, which is
/// handy for getting a backtrace out of a failing shape check inside a solver loop.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
