// Copyright 2025 Irreducible Inc.

use std::{
	collections::{BTreeMap, HashMap},
	hash::BuildHasher,
};

use auto_impl::auto_impl;

use crate::{error::Error, variable::Variable};

/// Assignment of values to variables, used to evaluate functions.
///
/// The assignment may be partial; evaluating a function that references a variable without a
/// value fails with [`Error::VariableNotFound`].
#[auto_impl(&, Box)]
pub trait VariableValues<V> {
	fn value(&self, var: Variable) -> Option<V>;
}

impl<V: Copy, S: BuildHasher> VariableValues<V> for HashMap<Variable, V, S> {
	fn value(&self, var: Variable) -> Option<V> {
		self.get(&var).copied()
	}
}

impl<V: Copy> VariableValues<V> for BTreeMap<Variable, V> {
	fn value(&self, var: Variable) -> Option<V> {
		self.get(&var).copied()
	}
}

/// Dense assignment where the value of a variable is stored at its index.
impl<V: Copy> VariableValues<V> for [V] {
	fn value(&self, var: Variable) -> Option<V> {
		self.get(var.index()).copied()
	}
}

impl<V: Copy> VariableValues<V> for Vec<V> {
	fn value(&self, var: Variable) -> Option<V> {
		self.as_slice().value(var)
	}
}

pub(crate) fn lookup<V, M>(values: &M, var: Variable) -> Result<V, Error>
where
	M: VariableValues<V> + ?Sized,
{
	values
		.value(var)
		.ok_or(Error::VariableNotFound { index: var.index() })
}
