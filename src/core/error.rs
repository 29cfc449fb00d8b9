use thiserror::Error;

/// Failures a conversion or rate lookup can report to its caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Amount, from currency, and to currency are required")]
    Validation(String),

    #[error("Invalid currency code")]
    InvalidCurrency(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ConvertError {
    /// The detail behind the public message, for logs only.
    pub fn detail(&self) -> &str {
        match self {
            ConvertError::Validation(d)
            | ConvertError::InvalidCurrency(d)
            | ConvertError::Internal(d) => d,
        }
    }
}
