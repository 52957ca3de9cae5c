use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::UnprocessableEntity(format!("Validation failed: {}", errors.join("; ")))
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::DuplicateId(id) => {
                    HttpError::BadRequest(format!("Product with id {id} already exists"))
                }
                RepositoryError::Sqlx(_) => HttpError::Internal("Database error".into()),
                RepositoryError::Custom(msg) => HttpError::Internal(msg),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
