// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("cannot combine a term on {lhs} with a term on {rhs}")]
	TermMismatch { lhs: String, rhs: String },
	#[error("argument {arg} has length {actual}, expected {expected}")]
	DimensionMismatch {
		arg: String,
		expected: usize,
		actual: usize,
	},
	#[error("no value was given for variable x{index}")]
	VariableNotFound { index: usize },
}
