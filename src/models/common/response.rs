use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::StudioError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
        }
    }
}

impl StudioError {
    /// 对应的响应业务码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            StudioError::UserNotFound(_) => ErrorCode::UserNotFound,
            StudioError::DirectionNotFound(_) => ErrorCode::DirectionNotFound,
            StudioError::ProblemNotFound(_) => ErrorCode::ProblemNotFound,
            StudioError::SubmissionPointNotFound(_) => ErrorCode::SubmissionPointNotFound,
            StudioError::SubmissionNotFound(_) => ErrorCode::SubmissionNotFound,
            StudioError::ScoreNotFound(_) => ErrorCode::ScoreNotFound,
            StudioError::UserAlreadyExists(_) => ErrorCode::UserAlreadyExists,
            StudioError::Conflict(_) => ErrorCode::Conflict,
            StudioError::Forbidden(_) => ErrorCode::Forbidden,
            StudioError::InvalidCredential(_) => ErrorCode::InvalidPassword,
            StudioError::InvalidParams(_) => ErrorCode::InvalidParams,
            StudioError::InvalidReference(_) => ErrorCode::InvalidReference,
            StudioError::Authentication(_) => ErrorCode::Unauthorized,
            StudioError::DatabaseConfig(_)
            | StudioError::DatabaseConnection(_)
            | StudioError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            StudioError::PasswordHash(_) | StudioError::Token(_) => ErrorCode::InternalError,
        }
    }
}

// 业务错误统一以 200 返回，认证失败 401，越权 403
impl ResponseError for StudioError {
    fn status_code(&self) -> StatusCode {
        match self {
            StudioError::Authentication(_) => StatusCode::UNAUTHORIZED,
            StudioError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            tracing::error!("{}", self.format_simple());
            match self.error_code() {
                ErrorCode::DatabaseError => "Database error".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            StudioError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            StudioError::forbidden("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(StudioError::conflict("x").status_code(), StatusCode::OK);
        assert_eq!(
            StudioError::problem_not_found("x").status_code(),
            StatusCode::OK
        );
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(
            StudioError::user_already_exists("x").error_code(),
            ErrorCode::UserAlreadyExists
        );
        assert_eq!(
            StudioError::invalid_credential("x").error_code(),
            ErrorCode::InvalidPassword
        );
        assert_eq!(
            StudioError::database_operation("x").error_code(),
            ErrorCode::DatabaseError
        );
        assert_eq!(
            StudioError::password_hash("x").error_code(),
            ErrorCode::InternalError
        );
    }

    #[actix_web::test]
    async fn test_error_body_hides_internal_details() {
        let response = StudioError::database_operation("no such table: users").error_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 5001);
        assert_eq!(json["message"], "Database error");
        assert!(json.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_error_body_carries_message() {
        let response = StudioError::conflict("direction still has problems").error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["message"], "direction still has problems");
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(42, "ok")).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 42);
        let json = serde_json::to_value(ApiResponse::success_empty("done")).unwrap();
        assert!(json.get("data").is_none());
    }
}
