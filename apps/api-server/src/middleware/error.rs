//! Error handling - converts handler failures into HTTP responses.
//!
//! `AppError` serves the JSON API, `PageError` the HTML views.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use pinboard_core::error::{DomainError, RepoError};
use pinboard_shared::ErrorResponse;
use thiserror::Error;

/// API error rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `context` is shown to the client, `cause` only goes to the log.
    #[error("Internal error while {context}: {cause}")]
    Internal {
        context: &'static str,
        cause: String,
    },
}

impl AppError {
    /// Build a mapper turning any storage or domain failure into a 500 that
    /// names the operation but not the cause.
    pub fn internal<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |err| AppError::Internal {
            context,
            cause: err.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::new(detail),
            AppError::Internal { context, cause } => {
                tracing::error!(cause = %cause, "Internal error while {}", context);
                ErrorResponse::internal_error(context)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        // Column constraints are enforced at write time; a violation is a
        // storage failure from the client's point of view.
        match err {
            DomainError::Constraint { .. } => AppError::internal("saving the post")(err),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            other => AppError::internal("accessing the database")(other),
        }
    }
}

/// HTML view error.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound => StatusCode::NOT_FOUND,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PageError::NotFound => "<h1>Not Found</h1><p>The requested resource was not found.</p>",
            PageError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "<h1>Server Error (500)</h1>"
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}

impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => PageError::NotFound,
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl From<tera::Error> for PageError {
    fn from(err: tera::Error) -> Self {
        PageError::Internal(format!("template rendering failed: {err:?}"))
    }
}

/// Result type alias for API handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for HTML handlers.
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_internal_error_hides_cause() {
        let err = AppError::from(RepoError::Query("relation \"posts\" does not exist".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "A server error occurred while accessing the database."
        );
    }

    #[actix_rt::test]
    async fn test_constraint_violation_is_a_server_error() {
        let err = AppError::from(DomainError::Constraint {
            column: "title",
            reason: "null value violates not-null constraint".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "A server error occurred while saving the post.");
    }

    #[test]
    fn test_page_not_found_status() {
        assert_eq!(PageError::from(RepoError::NotFound).status_code(), StatusCode::NOT_FOUND);
    }
}
