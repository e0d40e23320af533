// Copyright 2025 Irreducible Inc.

use std::fmt::{self, Display};

use getset::CopyGetters;

/// Handle of a decision variable.
///
/// Variables are identified, ordered and hashed by their index alone. Functions store variables
/// by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, CopyGetters)]
pub struct Variable {
	#[getset(get_copy = "pub")]
	index: usize,
}

impl Variable {
	pub const fn new(index: usize) -> Self {
		Self { index }
	}
}

impl Display for Variable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "x{}", self.index)
	}
}

impl From<usize> for Variable {
	fn from(index: usize) -> Self {
		Self::new(index)
	}
}
