//! Small dense array types used by the clustering pipeline.
//!
//! `Array2` holds feature matrices (one row per student) and `Array1` holds
//! single columns. Both are deliberately tiny; the pipeline only ever works
//! with a handful of rows and two features.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
