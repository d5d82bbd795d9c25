//! Core storage primitives.
//!
//! Dense row-major matrices back both the binary interaction data and
//! the reconstructed score grids produced by factorization.

mod matrix;

pub use matrix::Matrix;
