// Copyright 2024-2025 Irreducible Inc.

//! Utilities shared by the `linquad` crates: error macros, the in-place sort-and-combine engine,
//! buffer reuse primitives, a row-major 2D array and tracing setup.

pub mod array_2d;
pub mod env;
pub mod error_utils;
pub mod mem;
pub mod sorting;
pub mod tracing;
