use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors raised while resolving a role's criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("Criteria cannot be empty")]
    Empty,

    #[error("Dimension '{0}' has negative weight")]
    NegativeWeight(String),

    #[error("Dimension '{0}' has a non-finite weight")]
    NonFiniteWeight(String),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Dimension '{0}' is not known")]
    UnknownDimension(String),

    #[error("Dimension '{0}' appears more than once")]
    DuplicateDimension(String),

    #[error("Dimension '{dimension}' cannot be scored as {direction}")]
    UnsupportedDirection { dimension: String, direction: String },
}

/// Errors raised while loading or deriving a benchmark
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BenchmarkError {
    #[error("Benchmark not found: {0}")]
    NotFound(String),

    #[error("Benchmark '{benchmark}' has no target for dimension '{dimension}'")]
    MissingDimension { benchmark: String, dimension: String },

    #[error("Benchmark '{benchmark}' target for dimension '{dimension}' is invalid: {reason}")]
    InvalidTarget {
        benchmark: String,
        dimension: String,
        reason: String,
    },

    #[error("Benchmark needs between 1 and 3 reference employees, got {0}")]
    ReferenceCount(usize),
}

impl BenchmarkError {
    /// The dimension this error is about, if any
    pub fn dimension(&self) -> Option<&str> {
        match self {
            BenchmarkError::MissingDimension { dimension, .. }
            | BenchmarkError::InvalidTarget { dimension, .. } => Some(dimension),
            _ => None,
        }
    }
}

/// Errors that abort a matching run. All are raised before scoring starts.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(#[from] CriteriaError),

    #[error("Incomplete benchmark: {0}")]
    IncompleteBenchmark(#[from] BenchmarkError),

    #[error("Employee '{employee_id}' carries dimension '{dimension}' outside the resolved criteria")]
    DimensionMismatch { employee_id: String, dimension: String },

    #[error("Data source error: {0}")]
    Source(#[from] talentx_core::Error),
}

impl MatchError {
    /// Short machine-readable kind, used by API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::InvalidCriteria(_) => "invalid_criteria",
            MatchError::IncompleteBenchmark(BenchmarkError::NotFound(_)) => "benchmark_not_found",
            MatchError::IncompleteBenchmark(_) => "incomplete_benchmark",
            MatchError::DimensionMismatch { .. } => "dimension_mismatch",
            MatchError::Source(talentx_core::Error::EmployeeNotFound(_)) => "employee_not_found",
            MatchError::Source(_) => "source",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = MatchError::from(BenchmarkError::MissingDimension {
            benchmark: "b1".to_string(),
            dimension: "C".to_string(),
        });
        assert!(err.to_string().contains("'C'"));
        assert_eq!(err.kind(), "incomplete_benchmark");

        let err = MatchError::from(CriteriaError::UnknownDimension("papi_z".to_string()));
        assert!(err.to_string().contains("papi_z"));
        assert_eq!(err.kind(), "invalid_criteria");
    }

    #[test]
    fn test_not_found_kind() {
        let err = MatchError::from(BenchmarkError::NotFound("ghost".to_string()));
        assert_eq!(err.kind(), "benchmark_not_found");
    }
}
