use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::db::StoreError;

/// Failures surfaced by the services. Handlers return these directly and
/// actix renders them through [`ResponseError`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Article Not Found")]
    ArticleNotFound { id: i64 },
    #[error("User Not Found")]
    UserNotFound { id: i64 },
    #[error("Author Not Found")]
    AuthorNotFound { id: i64 },
    #[error("Todo Not Found")]
    TodoNotFound { id: i64 },
    #[error("Username Already Taken")]
    UsernameTaken { username: String },
    #[error("{0}")]
    Validation(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn is_internal(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Internal(_))
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ArticleNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::AuthorNotFound { .. }
            | Self::TodoNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UsernameTaken { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.is_internal() {
            error!("Request failed: {:?}", self);
            "Internal Server Error".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}
