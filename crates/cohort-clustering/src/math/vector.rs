use std::iter::FromIterator;
use std::slice::Iter;

/// A single feature column.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }
}

impl Array1<f64> {
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.iter().sum::<f64>() / self.len() as f64)
        }
    }

    /// Population standard deviation (divides by n, not n - 1).
    pub fn population_std(&self) -> Option<f64> {
        let mean = self.mean()?;
        let var = self.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / self.len() as f64;
        Some(var.sqrt())
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}
