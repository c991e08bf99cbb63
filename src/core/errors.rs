use std::result::Result as StdResult;

use thiserror::Error;

/// Failures raised while allocating bounded sequential numbers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("number {value} outside the issuable range 1..={max}")]
    OutOfRange { value: u32, max: u32 },
    #[error("issuable range exhausted at {max}")]
    Exhausted { max: u32 },
    #[error("only {found} of {requested} requested numbers are available")]
    InsufficientRange { requested: usize, found: usize },
}

/// Reasons a stored or user-supplied issued number fails to parse.
///
/// Returned rather than panicking: this runs on user-influenced input and on
/// column values whose integrity the allocator does not control.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberParseError {
    #[error("expected {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("expected prefix {expected:?}")]
    WrongPrefix { expected: String },
    #[error("suffix contains non-digit characters")]
    NonDigitSuffix,
    #[error("zero suffix is never issued")]
    ZeroSuffix,
}

/// Unified error type for the core/domain layers.
#[derive(Error, Debug)]
pub enum CampusError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("invalid issued number: {0}")]
    Parse(#[from] NumberParseError),
    #[error("instalments out of balance by {delta}")]
    Unreconciled { delta: i64 },
    #[error("number unavailable: {0}")]
    Unavailable(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CampusError>;
