use serde::Serialize;
use statrs::statistics::{Data, Max, Median, Min, OrderStatistics, Statistics};

/// Five-number summary plus mean and population standard deviation.
///
/// Backs the per-group GPA box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Describe a sample. Returns `None` for an empty slice.
pub fn describe(values: &[f64]) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }

    let mut data = Data::new(values.to_vec());
    Some(Describe {
        count: values.len(),
        min: Min::min(&data),
        lower_quartile: data.lower_quartile(),
        median: Median::median(&data),
        upper_quartile: data.upper_quartile(),
        max: Max::max(&data),
        mean: Statistics::mean(values.iter()),
        std_dev: Statistics::population_std_dev(values.iter()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_empty_is_none() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn describe_basic() {
        let d = describe(&[3.8, 3.6, 3.9]).unwrap();
        assert_eq!(d.count, 3);
        assert_eq!(d.min, 3.6);
        assert_eq!(d.max, 3.9);
        assert!((d.median - 3.8).abs() < 1e-12);
        assert!((d.mean - 3.766_666_666_666_667).abs() < 1e-9);
        assert!(d.lower_quartile <= d.median && d.median <= d.upper_quartile);
    }

    #[test]
    fn describe_single_value() {
        let d = describe(&[2.0]).unwrap();
        assert_eq!(d.std_dev, 0.0);
        assert_eq!(d.median, 2.0);
    }
}
