use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CassiaError {
    /// The single caller-visible failure: a host assertion was handed
    /// something other than the literal true.
    #[error("failed assertion: {0}")]
    FailedAssertion(String),

    /// A value refused canonical encoding (cycle or non-finite float).
    /// Produced and consumed inside the equality fast path; callers of the
    /// engine never observe it.
    #[error("value cannot be canonically encoded")]
    Unencodable,
}

impl CassiaError {
    pub fn failed_assertion(detail: impl Into<String>) -> Self {
        CassiaError::FailedAssertion(detail.into())
    }
}
