use adapter::ApiError;
use domain::{Rejection, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User not logged in")]
    Unauthenticated,
    #[error("A comment is already being posted")]
    Busy,
    #[error("Failed to post comment: {0}")]
    Transport(#[from] ApiError),
}

impl From<Rejection> for SubmitError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Validation(e) => SubmitError::Validation(e),
            Rejection::Unauthenticated => SubmitError::Unauthenticated,
            Rejection::Busy => SubmitError::Busy,
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User not logged in")]
    Unauthenticated,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Session cache failed: {0:#}")]
    Storage(#[from] anyhow::Error),
}
