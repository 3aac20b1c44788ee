use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::forms::products::ProductFormError;

pub mod images;
pub mod products;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome categories every product operation can end in.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller lacks the service access role.
    #[error("Unauthorized.")]
    Unauthorized,
    /// Submitted data failed presence validation.
    #[error("{0}")]
    Form(String),
    /// No record matches the requested identifier.
    #[error("not found")]
    NotFound,
    /// Any failure reported by storage, passed through verbatim.
    #[error("{0}")]
    Persistence(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Persistence(other.to_string()),
        }
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(err: ProductFormError) -> Self {
        if err.is_validation() {
            ServiceError::Form(err.to_string())
        } else {
            ServiceError::Persistence(err.to_string())
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}
