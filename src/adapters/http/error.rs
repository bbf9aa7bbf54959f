use crate::utils::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 所有錯誤回應共用的 JSON 格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub message: String,
    pub code: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorEnvelope {
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self {
            message: "Resource not found".to_string(),
            code: "NOT_FOUND".to_string(),
            status_code: 404,
            details: None,
            path: Some(path.into()),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// 處理器回傳的錯誤；`expose_details` 只在開發模式為 true
#[derive(Debug)]
pub struct HttpError {
    error: AppError,
    expose_details: bool,
}

impl HttpError {
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let status_code = self.error.status_code();

        if status_code >= 500 {
            return ErrorEnvelope {
                message: "Internal server error".to_string(),
                code: "INTERNAL_ERROR".to_string(),
                status_code,
                details: self.expose_details.then(|| self.error.to_string()),
                path: None,
            };
        }

        ErrorEnvelope {
            message: self.error.user_friendly_message(),
            code: self.error.code().to_string(),
            status_code,
            details: None,
            path: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.error.status_code() >= 500 {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                self.error,
                self.error.category(),
                self.error.severity()
            );
        } else {
            tracing::warn!("Request rejected: {}", self.error);
        }

        self.envelope().into_response()
    }
}
