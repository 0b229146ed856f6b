use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::math::vector::Array1;

/// Row-major dense matrix. Rows are observations, columns are features.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from equally sized rows.
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(rows.len() * N);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self {
            data,
            rows: rows.len(),
            cols: N,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> Array1<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)].clone()).collect()
    }
}

impl Array2<f64> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_is_row_major() {
        let m = Array2::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m.row_slice(2), &[5.0, 6.0]);
        assert_eq!(m.column(1).iter().copied().collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let err = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("length 3"));
    }

    #[test]
    fn zeros_can_be_filled_in_place() {
        let mut m = Array2::zeros(2, 2);
        m[(1, 0)] = 7.5;
        assert_eq!(m.as_slice(), &[0.0, 0.0, 7.5, 0.0]);
    }
}
