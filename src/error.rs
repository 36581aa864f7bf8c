use axum::http::StatusCode;

/// Errors that can occur while handling a game operation.
///
/// Every variant is raised before any game or gamer record is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrioError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("you are not allowed to perform this action")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

impl TrioError {
    /// HTTP status used when the error crosses the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrioError::Validation(_) | TrioError::InvalidMove(_) => StatusCode::BAD_REQUEST,
            TrioError::NotFound(_) => StatusCode::NOT_FOUND,
            TrioError::Conflict(_) => StatusCode::CONFLICT,
            TrioError::Unauthorized => StatusCode::FORBIDDEN,
            TrioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
