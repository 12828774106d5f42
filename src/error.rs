use thiserror::Error;

use crate::index::ObjectId;

/// Top-level error type for the rebar adjustment engine.
#[derive(Debug, Error)]
pub enum RebarError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors raised while validating operator-supplied numbers.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{parameter} is not a number: {text:?}")]
    NotANumber {
        parameter: &'static str,
        text: String,
    },

    #[error("{parameter} = {value} is out of range (must be {requirement})")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("no target point has been picked")]
    MissingTarget,
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the endpoint index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("object {0} is not indexed")]
    NotIndexed(ObjectId),

    #[error("object {id} has no endpoint at ({x:.3}, {y:.3}, {z:.3})")]
    EndpointNotFound { id: ObjectId, x: f64, y: f64, z: f64 },
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("no eligible objects: {0}")]
    NoEligibleObjects(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors reported by the host model.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("object {0} does not exist in the model")]
    ObjectNotFound(ObjectId),

    #[error("model rejected the edit of object {id}: {reason}")]
    Rejected { id: ObjectId, reason: String },
}

/// Convenience type alias for results using [`RebarError`].
pub type Result<T> = std::result::Result<T, RebarError>;
