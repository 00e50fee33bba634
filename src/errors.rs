// errors.rs
use crate::backend::BackendError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, backend).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Backend Error: {0}")]
    Backend(#[from] BackendError),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Backend(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}
