//! Student records and the ordered roster they live in.
//!
//! A student has no identity of its own: its ID is its 1-based position in
//! the roster at the time the table or the clustering is produced, so
//! clearing or resetting the roster renumbers everyone.
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::math::Array2;

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;
pub const ACTIVITY_MIN: i64 = 0;
pub const ACTIVITY_MAX: i64 = 100;

/// Built-in demo roster as (GPA, activity) pairs.
pub const DEFAULT_SAMPLE: [(f64, u32); 10] = [
    (3.8, 90),
    (3.6, 85),
    (3.9, 95),
    (3.7, 50),
    (3.8, 45),
    (2.5, 90),
    (2.2, 80),
    (1.8, 40),
    (2.0, 50),
    (3.2, 70),
];

/// One student's measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    gpa: f64,
    activity: u32,
}

impl Observation {
    /// Validate and build an observation.
    pub fn new(gpa: f64, activity: i64) -> Result<Self, RecordError> {
        if !gpa.is_finite() || !(GPA_MIN..=GPA_MAX).contains(&gpa) {
            return Err(RecordError::Validation {
                field: "GPA",
                value: gpa,
                min: GPA_MIN,
                max: GPA_MAX,
            });
        }
        if !(ACTIVITY_MIN..=ACTIVITY_MAX).contains(&activity) {
            return Err(RecordError::Validation {
                field: "Activity",
                value: activity as f64,
                min: ACTIVITY_MIN as f64,
                max: ACTIVITY_MAX as f64,
            });
        }
        Ok(Self {
            gpa,
            activity: activity as u32,
        })
    }

    /// Parse both fields from text, then validate.
    ///
    /// GPA accepts any real number literal, activity must be an integer.
    pub fn parse(gpa: &str, activity: &str) -> Result<Self, RecordError> {
        let gpa_value: f64 = gpa.trim().parse().map_err(|_| RecordError::Format {
            field: "GPA",
            input: gpa.to_string(),
        })?;
        let activity_value: i64 = activity.trim().parse().map_err(|_| RecordError::Format {
            field: "Activity",
            input: activity.to_string(),
        })?;
        Self::new(gpa_value, activity_value)
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn activity(&self) -> u32 {
        self.activity
    }
}

/// A table row: 1-based student ID with the raw measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudentRow {
    pub id: usize,
    pub gpa: f64,
    pub activity: u32,
}

/// Ordered collection of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    observations: Vec<Observation>,
}

impl RecordStore {
    /// An empty roster.
    pub fn empty() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Validate and append a student. On error the roster is untouched.
    pub fn add(&mut self, gpa: f64, activity: i64) -> Result<usize, RecordError> {
        let observation = Observation::new(gpa, activity)?;
        Ok(self.push(observation))
    }

    /// Parse, validate and append a student from raw text input.
    pub fn add_str(&mut self, gpa: &str, activity: &str) -> Result<usize, RecordError> {
        let observation = Observation::parse(gpa, activity)?;
        Ok(self.push(observation))
    }

    fn push(&mut self, observation: Observation) -> usize {
        self.observations.push(observation);
        log::debug!(
            "Added student {} (GPA {}, activity {})",
            self.observations.len(),
            observation.gpa,
            observation.activity
        );
        self.observations.len()
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }

    /// Replace the roster with [`DEFAULT_SAMPLE`].
    pub fn reset_to_default(&mut self) {
        self.observations = DEFAULT_SAMPLE
            .iter()
            .map(|&(gpa, activity)| Observation { gpa, activity })
            .collect();
    }

    pub fn all(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn rows(&self) -> Vec<StudentRow> {
        student_rows(&self.observations)
    }

    pub fn feature_matrix(&self) -> Array2<f64> {
        feature_matrix(&self.observations)
    }
}

impl Default for RecordStore {
    /// Starts from the built-in sample so a fresh roster can be clustered
    /// straight away.
    fn default() -> Self {
        let mut store = Self::empty();
        store.reset_to_default();
        store
    }
}

/// Number the observations 1..=n in order.
pub fn student_rows(observations: &[Observation]) -> Vec<StudentRow> {
    observations
        .iter()
        .enumerate()
        .map(|(i, o)| StudentRow {
            id: i + 1,
            gpa: o.gpa,
            activity: o.activity,
        })
        .collect()
}

/// Raw n x 2 matrix with columns (GPA, activity).
pub fn feature_matrix(observations: &[Observation]) -> Array2<f64> {
    let rows: Vec<[f64; 2]> = observations
        .iter()
        .map(|o| [o.gpa, o.activity as f64])
        .collect();
    Array2::from_rows(&rows)
}
