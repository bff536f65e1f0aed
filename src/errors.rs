use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to load quiz: {0}")]
    LoadError(String),

    #[error("Failed to submit score: {0}")]
    SubmitError(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid attempt state: {0}")]
    InvalidState(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::LoadError(_) => "LOAD_ERROR",
            AppError::SubmitError(_) => "SUBMIT_ERROR",
            AppError::InvalidSelection(_) => "INVALID_SELECTION",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::HttpError(_) => "HTTP_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Rewraps a collaborator failure as a load failure.
    pub fn into_load_error(self) -> Self {
        match self {
            AppError::LoadError(_) => self,
            other => AppError::LoadError(other.to_string()),
        }
    }

    pub fn into_submit_error(self) -> Self {
        match self {
            AppError::SubmitError(_) => self,
            other => AppError::SubmitError(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::InvalidSelection(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::HttpError(_) | AppError::LoadError(_) | AppError::SubmitError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
