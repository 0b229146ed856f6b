use std::error::Error;
use std::fmt;

/// Reasons a student record is rejected at the add boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The named field could not be parsed as the expected number type.
    Format { field: &'static str, input: String },
    /// The value parsed but lies outside the field's domain.
    Validation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::Format { field, input } => {
                write!(f, "{} must be a number, got {:?}", field, input)
            }
            RecordError::Validation {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {}, got {}",
                field, min, max, value
            ),
        }
    }
}

impl Error for RecordError {}

/// Failures of the clustering stages themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusteringError {
    /// Fewer observations than the stage needs.
    InsufficientData { required: usize, available: usize },
    InvalidClusterCount(usize),
}

impl fmt::Display for ClusteringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClusteringError::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "Need at least {} students to cluster, only {} available",
                required, available
            ),
            ClusteringError::InvalidClusterCount(k) => {
                write!(f, "Cluster count must be at least 1, got {}", k)
            }
        }
    }
}

impl Error for ClusteringError {}
