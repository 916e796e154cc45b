use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ArticleError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid article id: {0}")]
    InvalidId(String),

    #[error("404 page not found")]
    NotFound(i64),

    #[error("{0}")]
    Database(#[from] SqlxError),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ArticleError {
    fn from(e: figment::Error) -> Self {
        ArticleError::Config(Box::new(e))
    }
}

impl ArticleError {
    pub fn status(&self) -> StatusCode {
        match self {
            ArticleError::Validation(_) | ArticleError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ArticleError::NotFound(_) => StatusCode::NOT_FOUND,
            ArticleError::Database(_)
            | ArticleError::MissingDatabaseUrl
            | ArticleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text error body, newline terminated.
impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(
            ArticleError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ArticleError::InvalidId("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ArticleError::NotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ArticleError::Database(SqlxError::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_surface_their_detail() {
        let err = ArticleError::Database(SqlxError::PoolTimedOut);
        assert_eq!(err.to_string(), SqlxError::PoolTimedOut.to_string());
    }
}
