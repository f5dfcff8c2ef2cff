use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 7807 body returned for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Timeout: {detail}")]
    Timeout { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::NotFound { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Conflict { code, .. } => *code,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Timeout { .. } => ErrorCode::DbTimeout,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Db { detail }
            | AppError::NotFound { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail }
            | AppError::Conflict { detail, .. }
            | AppError::DbUnavailable { detail }
            | AppError::Timeout { detail } => detail,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidHand => ErrorCode::InvalidHand,
                    ValidationKind::InvalidUsername => ErrorCode::InvalidUsername,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::UniqueUsername => ErrorCode::UsernameTaken,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Timeout { detail },
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::ForeignKey => AppError::Internal {
                    code: ErrorCode::FkViolation,
                    detail,
                },
                InfraErrorKind::Check => AppError::Internal {
                    code: ErrorCode::CheckViolation,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://roshambo.app/errors/{}", code.as_str()),
            title: Self::humanize_code(code.as_str()),
            status: status.as_u16(),
            detail: self.detail().to_string(),
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
