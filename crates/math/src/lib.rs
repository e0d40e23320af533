// Copyright 2024-2025 Irreducible Inc.

//! Affine and quadratic functions over indexed variables, updated in place.
//!
//! This crate provides the data types and the mutation API of an expression layer for iterative
//! optimization solvers, including:
//!
//! * Variables, linear and quadratic terms
//! * Affine and quadratic functions with canonicalization and evaluation
//! * In-place assignment, addition, subtraction and fused multiply-add
//! * Vector and matrix operations on functions
//!
//! The structure of a model is fixed across solver iterations while its coefficients change.
//! Functions are therefore built once and then overwritten in place: once the term buffers have
//! grown to their working size, none of the in-place operations allocate.

mod affine;
mod coefficient;
mod error;
mod muladd;
mod operand;
mod ops;
mod quadratic;
mod term;
mod values;
mod variable;
pub mod vector_ops;

pub use affine::*;
pub use coefficient::*;
pub use error::*;
pub use muladd::*;
pub use operand::*;
pub use quadratic::*;
pub use term::*;
pub use values::*;
pub use variable::*;
