use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

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
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Counterpart unavailable: {detail}")]
    CounterpartUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// The canonical error code for this error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::CounterpartUnavailable { .. } => ErrorCode::CounterpartUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Helper method to extract error detail from any error variant
    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::CounterpartUnavailable { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CounterpartUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
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

    pub fn counterpart_unavailable(detail: impl Into<String>) -> Self {
        Self::CounterpartUnavailable {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidProposal => ErrorCode::InvalidProposal,
                    ValidationKind::MessageTooLong => ErrorCode::MessageTooLong,
                    ValidationKind::MissingName => ErrorCode::MissingName,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::InvalidTurn => ErrorCode::InvalidTurn,
                    ConflictKind::InvalidRole => ErrorCode::InvalidRole,
                    ConflictKind::DuplicateEvent => ErrorCode::DuplicateEvent,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::CounterpartUnavailable | InfraErrorKind::Timeout => {
                    AppError::CounterpartUnavailable { detail }
                }
                InfraErrorKind::Other(_) => AppError::Internal { detail },
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().to_string();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://ultimatum.app/errors/{code}"),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_expected_codes() {
        let err: AppError = DomainError::conflict(ConflictKind::InvalidTurn, "out of phase").into();
        assert_eq!(err.code(), ErrorCode::InvalidTurn);
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: AppError =
            DomainError::validation(ValidationKind::InvalidProposal, "points out of range").into();
        assert_eq!(err.code(), ErrorCode::InvalidProposal);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: AppError = DomainError::not_found(NotFoundKind::Session, "gone").into();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: AppError =
            DomainError::infra(InfraErrorKind::CounterpartUnavailable, "upstream down").into();
        assert_eq!(err.code(), ErrorCode::CounterpartUnavailable);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn humanize_code_title_cases_words() {
        assert_eq!(AppError::humanize_code("INVALID_TURN"), "Invalid Turn");
        assert_eq!(
            AppError::humanize_code("COUNTERPART_UNAVAILABLE"),
            "Counterpart Unavailable"
        );
    }
}
