use thiserror::Error;

use harvest_common::StorageError;

/// Everything that can be wrong with an artifact's content.
///
/// Summarizers check the shape of what they parsed before computing anything, so a bad input
/// ends up here instead of as a NaN in a report.
///
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DataFormatError {
    #[error("Missing field {0}")]
    MissingField(String),
    #[error("Can not coerce value: {0}")]
    TypeCoercionFailed(String),
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Refusing to divide by zero: {0}")]
    DivisionByZeroGuard(String),
    #[error("Malformed artifact: {0}")]
    Malformed(String),
}

impl DataFormatError {
    /// Short name of the failure, used in one-line reports.
    ///
    pub fn kind(&self) -> &'static str {
        match self {
            DataFormatError::MissingField(_) => "MissingField",
            DataFormatError::TypeCoercionFailed(_) => "TypeCoercionFailed",
            DataFormatError::ShapeMismatch(_) => "ShapeMismatch",
            DataFormatError::DivisionByZeroGuard(_) => "DivisionByZeroGuard",
            DataFormatError::Malformed(_) => "Malformed",
        }
    }
}

/// Failure of a complete summarize run: reading the artifact, computing, writing the report.
///
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Data(#[from] DataFormatError),
}

impl SummaryError {
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::Storage(e) => e.kind(),
            SummaryError::Data(e) => e.kind(),
        }
    }
}
