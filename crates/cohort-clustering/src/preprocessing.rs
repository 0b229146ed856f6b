//! Feature standardization.
//!
//! GPA lives on a 0-4 scale and activity on 0-100, so both columns are moved
//! to zero mean and unit (population) variance before any distance is taken.
//! The scaler is always refit on the current roster.

use crate::math::{Array1, Array2};

/// Standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    /// Population standard deviation. `None` marks a constant column.
    pub std: Vec<Option<f64>>,
}

impl Scaler {
    /// Relative spread below which a column is treated as constant.
    const MIN_REL_STD: f64 = 1e-12;
}

/// Fit a `Scaler` from an `Array2<f64>` where rows are samples and
/// columns are features.
pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    let (nrows, ncols) = x.shape();
    assert!(
        nrows > 0 && ncols > 0,
        "fit_scaler requires non-empty matrix"
    );

    let mut mean = Vec::with_capacity(ncols);
    let mut std = Vec::with_capacity(ncols);
    for c in 0..ncols {
        let column: Array1<f64> = x.column(c);
        let m = column.mean().unwrap_or(0.0);
        let s = column.population_std().unwrap_or(0.0);
        let degenerate = s <= Scaler::MIN_REL_STD * m.abs().max(1.0);
        if degenerate {
            log::debug!("Feature column {} is constant; scaling it to 0", c);
        }
        mean.push(m);
        std.push(if degenerate { None } else { Some(s) });
    }

    Scaler { mean, std }
}

/// Transform all rows using the provided `Scaler` and return a new `Array2<f64>`.
///
/// Constant columns come out as all zeros.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Array2<f64> {
    let (nrows, ncols) = x.shape();
    let mut out = Array2::zeros(nrows, ncols);

    for r in 0..nrows {
        for c in 0..ncols {
            if let Some(std) = sc.std[c] {
                out[(r, c)] = (x[(r, c)] - sc.mean[c]) / std;
            }
        }
    }

    out
}

/// Fit a scaler on `x` and return the standardized matrix.
pub fn fit_transform(x: &Array2<f64>) -> Array2<f64> {
    let sc = fit_scaler(x);
    transform_all(x, &sc)
}
