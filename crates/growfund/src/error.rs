use crate::config::ConfigError;
use crate::dashboard::service::DashboardError;
use crate::lending::service::LendingServiceError;
use crate::repository::RepositoryError;
use crate::savings::service::SavingsServiceError;
use crate::telemetry::TelemetryError;
use crate::tools::service::InvoiceServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Caller-facing classification shared by every service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Ineligible,
    AmountExceedsLimit,
    InvalidMethod,
    NotFound,
    Conflict,
    Persistence,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Ineligible => "ineligible",
            ErrorKind::AmountExceedsLimit => "amount_exceeds_limit",
            ErrorKind::InvalidMethod => "invalid_method",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Persistence => "persistence",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation | ErrorKind::InvalidMethod => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Ineligible | ErrorKind::AmountExceedsLimit => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&RepositoryError> for ErrorKind {
    fn from(value: &RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => ErrorKind::Conflict,
            RepositoryError::NotFound => ErrorKind::NotFound,
            RepositoryError::Unavailable(_) => ErrorKind::Persistence,
        }
    }
}

/// `{ "error": ..., "kind": ... }` with the status that matches `kind`.
pub fn error_response(kind: ErrorKind, message: impl fmt::Display) -> Response {
    let payload = json!({
        "error": message.to_string(),
        "kind": kind,
    });
    (kind.status(), Json(payload)).into_response()
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Lending(LendingServiceError),
    Savings(SavingsServiceError),
    Dashboard(DashboardError),
    Invoice(InvoiceServiceError),
    Repository(RepositoryError),
}

impl AppError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Lending(err) => Some(err.kind()),
            AppError::Savings(err) => Some(err.kind()),
            AppError::Dashboard(err) => Some(err.kind()),
            AppError::Invoice(err) => Some(err.kind()),
            AppError::Repository(err) => Some(ErrorKind::from(err)),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                None
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Lending(err) => write!(f, "lending error: {}", err),
            AppError::Savings(err) => write!(f, "savings error: {}", err),
            AppError::Dashboard(err) => write!(f, "dashboard error: {}", err),
            AppError::Invoice(err) => write!(f, "invoice error: {}", err),
            AppError::Repository(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Lending(err) => Some(err),
            AppError::Savings(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
            AppError::Invoice(err) => Some(err),
            AppError::Repository(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind() {
            Some(kind) => error_response(kind, &self),
            None => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<LendingServiceError> for AppError {
    fn from(value: LendingServiceError) -> Self {
        Self::Lending(value)
    }
}

impl From<SavingsServiceError> for AppError {
    fn from(value: SavingsServiceError) -> Self {
        Self::Savings(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<InvoiceServiceError> for AppError {
    fn from(value: InvoiceServiceError) -> Self {
        Self::Invoice(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}
