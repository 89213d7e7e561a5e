//! Error types returned by the clustering engine and by the input pipeline.

use thiserror::Error;

/// Errors raised by the engine when its input contract is violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    /// The cluster count has to satisfy `1 < k < sample_cnt`.
    #[error("invalid number of clusters: k={k} with {sample_cnt} samples (need 1 < k < {sample_cnt})")]
    InvalidClusterCount { k: usize, sample_cnt: usize },

    /// The sample buffer does not hold `sample_cnt * sample_dims` values.
    #[error("sample buffer holds {len} values, expected {sample_cnt} x {sample_dims}")]
    SampleCountMismatch { len: usize, sample_cnt: usize, sample_dims: usize },

    #[error("samples need at least one dimension")]
    ZeroDimensions,

    /// The number of initial centroids handed to the refinement differs from `k`.
    #[error("expected {expected} initial centroids, got {found}")]
    CentroidCountMismatch { expected: usize, found: usize },

    /// A row (of samples or of initial centroids) has the wrong dimension.
    #[error("row {row} has {found} columns, expected {expected}")]
    ShapeMismatch { row: usize, expected: usize, found: usize },

    /// Samples have to be finite to be compared by distance.
    #[error("non-finite value at sample {sample}, dimension {dim}")]
    NonFiniteValue { sample: usize, dim: usize },

    /// The convergence threshold has to be a non-negative number.
    #[error("invalid convergence threshold {0} (must be >= 0)")]
    InvalidEpsilon(f64),

    /// Every remaining sample coincides with an already selected centroid.
    #[error("degenerate seeding: all distances are zero while choosing centroid {centroid}")]
    DegenerateSeeding { centroid: usize },
}

/// Errors raised while turning raw arguments and tables into an engine run.
///
/// The display strings of the argument variants are the messages printed to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Invalid number of clusters!")]
    InvalidClusterCount,

    #[error("Invalid maximum iteration!")]
    InvalidMaxIter,

    #[error("Invalid epsilon!")]
    InvalidEpsilon,

    /// Missing arguments, unreadable numbers or any other malformed input.
    #[error("An Error Has Occurred")]
    Malformed,

    #[error("cannot parse {value:?} at line {line}, column {column}")]
    Parse { line: usize, column: usize, value: String },

    #[error("line {line} has {found} columns, expected {expected}")]
    Ragged { line: usize, expected: usize, found: usize },

    #[error(transparent)]
    Engine(#[from] KMeansError),
}

impl InputError {
    /// Message shown to the user of the command line front-end.
    pub fn user_message(&self) -> String {
        match self {
            InputError::Engine(KMeansError::InvalidClusterCount { .. }) => InputError::InvalidClusterCount.to_string(),
            InputError::Parse { .. } | InputError::Ragged { .. } | InputError::Engine(_) => InputError::Malformed.to_string(),
            other => other.to_string(),
        }
    }
}
