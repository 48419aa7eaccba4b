//! Crowdfunding API Port - 后端 REST 服务抽象
//!
//! 定义对众筹后端的全部调用，具体实现在 infrastructure/adapters 层。
//! 没有超时、取消与自动重试：失败只向调用方报告一次。

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::project::{
    ContentType, ImageUpload, Pledge, PledgeSubmission, Project, ProjectDraft, ProjectId, UserId,
};

/// API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 客户端校验失败，请求未发出
    #[error("{0}")]
    Validation(String),

    /// 需要登录的操作缺少 token，请求未发出
    #[error("Authentication required")]
    Unauthenticated,

    /// 后端返回非 2xx
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// 响应声明为 JSON 但无法解析
    #[error("{0}")]
    Parse(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 登录凭据
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 登录结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub email: Option<String>,
}

/// 注册请求
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// 注册成功后后端返回的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: Option<UserId>,
    pub username: String,
    pub email: Option<String>,
}

/// 创建/更新项目的提交内容（草稿 + 所有者）
#[derive(Debug, Clone)]
pub struct ProjectSubmission {
    pub title: String,
    pub description: String,
    pub goal: u32,
    pub genre: String,
    pub content_type: ContentType,
    pub owner: UserId,
    pub starting_content: String,
    pub current_content: Option<String>,
    pub is_open: bool,
    pub image: Option<ImageUpload>,
}

impl ProjectSubmission {
    /// 由已校验的草稿构造
    pub fn from_draft(draft: ProjectDraft, owner: UserId) -> Self {
        Self {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            goal: draft.goal.unwrap_or_default(),
            genre: draft.genre.trim().to_string(),
            content_type: draft.content_type.unwrap_or_default(),
            owner,
            starting_content: draft.starting_content,
            current_content: draft.current_content.filter(|c| !c.trim().is_empty()),
            is_open: draft.is_open,
            image: draft.image,
        }
    }
}

/// Crowdfunding API Port
#[async_trait]
pub trait CrowdfundingApiPort: Send + Sync {
    /// `GET /projects`
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// `GET /projects/{id}`，包含认捐
    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError>;

    /// `POST /api-token-auth/`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `POST /users/`
    async fn signup(&self, request: &SignupRequest) -> Result<RegisteredUser, ApiError>;

    /// `POST /projects/{id}/pledges/`
    async fn create_pledge(
        &self,
        token: &str,
        project_id: ProjectId,
        pledge: &PledgeSubmission,
    ) -> Result<Pledge, ApiError>;

    /// `POST /projects/`
    async fn create_project(
        &self,
        token: &str,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError>;

    /// `PUT /projects/{id}/`
    async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError>;
}
