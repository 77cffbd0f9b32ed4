use thiserror::Error;

/// Errors raised by the bucket model and its inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BucketError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("malformed forcing at record {index}: {reason}")]
    MalformedForcing { index: usize, reason: String },
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl BucketError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedForcing {
            index,
            reason: reason.into(),
        }
    }
}
