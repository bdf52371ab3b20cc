use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use exam_common::pagination::PageRequestError;
use exam_common::types::ParseEnumError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid cursor")]
    InvalidCursor,

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Question not found")]
    NotFound,
}

impl From<PageRequestError> for AppError {
    fn from(e: PageRequestError) -> Self {
        match e {
            PageRequestError::InvalidCursor => AppError::InvalidCursor,
            other => AppError::MalformedQuery(other.to_string()),
        }
    }
}

impl From<ParseEnumError> for AppError {
    fn from(e: ParseEnumError) -> Self {
        AppError::MalformedQuery(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidCursor | AppError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}
