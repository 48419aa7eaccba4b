//! 非 2xx 响应的错误信息提取
//!
//! 每个端点的提取顺序不同，这里把响应读成 [`ErrorResponse`] 后按端点选用。

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::application::ports::ApiError;

/// 已读完的错误响应
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    status: StatusCode,
    is_json: bool,
    body: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, is_json: bool, body: impl Into<String>) -> Self {
        Self {
            status,
            is_json,
            body: body.into(),
        }
    }

    /// 读取状态码、Content-Type 与响应体
    pub async fn read(response: Response) -> Self {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let body = response.text().await.unwrap_or_default();
        Self::new(status, is_json, body)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    fn detail(&self) -> Option<String> {
        self.json()?
            .get("detail")?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// 字段错误列表的第一条，例如 `{"add_content": ["..."]}`
    fn field_error(&self, field: &str) -> Option<String> {
        self.json()?
            .get(field)?
            .get(0)?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// `detail`，否则 fallback
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or_else(|| fallback.to_string())
    }

    /// 仅当响应声明为 JSON 时才读 `detail`
    pub fn json_detail_or(&self, fallback: &str) -> String {
        if self.is_json {
            self.detail_or(fallback)
        } else {
            fallback.to_string()
        }
    }

    /// 先取字段错误，再取 `detail`，最后 fallback
    pub fn field_or_detail_or(&self, field: &str, fallback: &str) -> String {
        self.field_error(field)
            .or_else(|| self.detail())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// 响应体是 JSON 时取 `detail`，否则直接用非空原文
    pub fn detail_or_text_or(&self, fallback: &str) -> String {
        match self.json() {
            Some(_) => self.detail_or(fallback),
            None if !self.body.trim().is_empty() => self.body.trim().to_string(),
            None => fallback.to_string(),
        }
    }

    /// "400 Bad Request" 形式的状态描述
    pub fn status_line(&self) -> String {
        format!(
            "{} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown")
        )
    }

    pub fn into_error(self, message: String) -> ApiError {
        ApiError::Api {
            status: self.status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(status: StatusCode, body: &str) -> ErrorResponse {
        ErrorResponse::new(status, true, body)
    }

    #[test]
    fn test_detail_or() {
        let with_detail = json(StatusCode::BAD_REQUEST, r#"{"detail":"Not allowed"}"#);
        assert_eq!(with_detail.detail_or("fallback"), "Not allowed");

        let without = json(StatusCode::BAD_REQUEST, r#"{"other":"x"}"#);
        assert_eq!(without.detail_or("fallback"), "fallback");

        let html = ErrorResponse::new(StatusCode::BAD_GATEWAY, false, "<html>");
        assert_eq!(html.detail_or("fallback"), "fallback");
    }

    #[test]
    fn test_json_detail_requires_header() {
        let body = r#"{"detail":"Not found."}"#;
        let declared = ErrorResponse::new(StatusCode::NOT_FOUND, true, body);
        let undeclared = ErrorResponse::new(StatusCode::NOT_FOUND, false, body);

        assert_eq!(declared.json_detail_or("fallback"), "Not found.");
        assert_eq!(undeclared.json_detail_or("fallback"), "fallback");
    }

    #[test]
    fn test_field_error_comes_first() {
        let both = json(
            StatusCode::BAD_REQUEST,
            r#"{"add_content":["This field may not be blank."],"detail":"Bad"}"#,
        );
        assert_eq!(
            both.field_or_detail_or("add_content", "fallback"),
            "This field may not be blank."
        );

        let detail_only = json(StatusCode::FORBIDDEN, r#"{"detail":"Closed"}"#);
        assert_eq!(detail_only.field_or_detail_or("add_content", "fallback"), "Closed");

        let empty_list = json(StatusCode::BAD_REQUEST, r#"{"add_content":[]}"#);
        assert_eq!(empty_list.field_or_detail_or("add_content", "fallback"), "fallback");
    }

    #[test]
    fn test_detail_or_text() {
        let text = ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, false, "Server exploded\n");
        assert_eq!(text.detail_or_text_or("fallback"), "Server exploded");

        let empty = ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, false, "");
        assert_eq!(empty.detail_or_text_or("fallback"), "fallback");

        // JSON 但没有 detail 时不回退到原文
        let json_body = json(StatusCode::BAD_REQUEST, r#"{"title":["required"]}"#);
        assert_eq!(json_body.detail_or_text_or("fallback"), "fallback");
    }

    #[test]
    fn test_status_line() {
        let response = ErrorResponse::new(StatusCode::BAD_REQUEST, false, "");
        assert_eq!(response.status_line(), "400 Bad Request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err = response.into_error("boom".to_string());
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "boom");
    }
}
