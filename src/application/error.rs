//! 应用层错误定义
//!
//! 统一的命令/查询错误类型。所有错误都只报告给直接调用方，不会自动重试，
//! 也不会终止程序：用户随时可以重新发起操作。

use thiserror::Error;

use crate::application::ports::{ApiError, SessionError};
use crate::domain::project::ValidationErrors;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 草稿字段校验失败
    #[error("{0}")]
    InvalidDraft(#[from] ValidationErrors),

    /// 其他输入校验失败
    #[error("{0}")]
    ValidationError(String),

    /// 需要登录
    #[error("Authentication required")]
    AuthenticationRequired,

    /// 后端拒绝请求
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 外部服务错误（网络、响应解析）
    #[error("{0}")]
    ExternalServiceError(String),

    /// 状态无效（例如重复提交）
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 登录态存储错误
    #[error("Session error: {0}")]
    SessionError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 后端返回的 HTTP 状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for ApplicationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(message) => Self::ValidationError(message),
            ApiError::Unauthenticated => Self::AuthenticationRequired,
            ApiError::Api { status, message } => Self::Rejected { status, message },
            ApiError::Network(message) => {
                Self::ExternalServiceError(format!("Network error: {}", message))
            }
            ApiError::Parse(message) => Self::ExternalServiceError(message),
        }
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_rejection_keeps_server_message() {
        let err: ApplicationError = ApiError::Api {
            status: 400,
            message: "Too many verses".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Too many verses");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_unauthenticated_maps_to_authentication_required() {
        let err: ApplicationError = ApiError::Unauthenticated.into();
        assert!(matches!(err, ApplicationError::AuthenticationRequired));
    }

    #[test]
    fn test_parse_failure_surfaces_fallback_message() {
        let err: ApplicationError =
            ApiError::Parse("Error fetching project with id 3".to_string()).into();
        assert_eq!(err.to_string(), "Error fetching project with id 3");

        let err: ApplicationError = ApiError::Network("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
