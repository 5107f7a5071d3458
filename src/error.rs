use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Raised before any arithmetic when an input is outside its domain.
    #[error("invalid input {value}: {reason}")]
    InvalidInput { value: f64, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, CalcError>;
