use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregationError {
    #[error("reference price must be positive and finite, got {0}")]
    InvalidReference(f64),

    #[error("incomplete merge input: {missing} of {sources} sources missing or empty")]
    IncompleteMergeInput { sources: usize, missing: usize },

    #[error("invalid band schema: {0}")]
    InvalidSchema(String),
}
