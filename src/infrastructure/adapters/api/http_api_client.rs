//! HTTP API Client - 调用众筹后端 REST 服务
//!
//! 实现 CrowdfundingApiPort trait
//!
//! 后端 API:
//! GET  {base}/projects
//! GET  {base}/projects/{id}
//! POST {base}/api-token-auth/        {"username","password"}
//! POST {base}/users/                 {"username","password","email","first_name","last_name"}
//! POST {base}/projects/{id}/pledges/ Authorization: Token <t>
//! POST {base}/projects/              Authorization: Token <t>，带图片时为 multipart
//! PUT  {base}/projects/{id}/         同上

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{LoginResponseDto, PledgeDto, ProjectDto, ProjectRequest, UserDto};
use super::response_error::ErrorResponse;
use crate::application::ports::{
    ApiError, Credentials, CrowdfundingApiPort, LoginResponse, ProjectSubmission,
    RegisteredUser, SignupRequest,
};
use crate::domain::project::{Pledge, PledgeSubmission, Project, ProjectId};

/// 列表拉取失败且后端没有给出 detail 时的提示
pub const PROJECTS_UNAVAILABLE: &str = "The page turned, but the ink did not follow\
No pledges appear, though we called them by name. \
Perhaps they are wandering — lost in the margins, \
or caught between commas in the cloud. Try again soon, \
or refresh the tale. Every story waits to be found.";

/// HTTP API 客户端配置
#[derive(Debug, Clone)]
pub struct HttpApiClientConfig {
    /// 后端基础 URL
    pub base_url: String,
}

impl Default for HttpApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl HttpApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// HTTP API 客户端
pub struct HttpApiClient {
    client: Client,
    config: HttpApiClientConfig,
}

impl HttpApiClient {
    pub fn new(config: HttpApiClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authorized(request: RequestBuilder, token: &str) -> Result<RequestBuilder, ApiError> {
        if token.is_empty() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(request.header(reqwest::header::AUTHORIZATION, format!("Token {}", token)))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Network(format!("Cannot connect to backend: {}", e))
            } else {
                ApiError::Network(e.to_string())
            }
        })
    }

    /// 解码成功响应；无法解析时用该端点的 fallback 文案
    async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode backend response");
            ApiError::Parse(fallback.to_string())
        })
    }

    fn project_form(submission: &ProjectSubmission) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("title", submission.title.clone())
            .text("description", submission.description.clone())
            .text("goal", submission.goal.to_string())
            .text("genre", submission.genre.clone())
            .text("content_type", submission.content_type.as_str())
            .text("owner", submission.owner.to_string())
            .text("is_open", submission.is_open.to_string());

        if !submission.starting_content.is_empty() {
            form = form.text("starting_content", submission.starting_content.clone());
        }
        if let Some(current) = &submission.current_content {
            form = form.text("current_content", current.clone());
        }
        if let Some(image) = &submission.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::Validation(format!("Invalid image type: {}", e)))?;
            form = form.part("image", part);
        }

        Ok(form)
    }

    /// 创建与更新共用：带图片走 multipart，否则 JSON
    async fn send_project(
        &self,
        request: RequestBuilder,
        token: &str,
        submission: &ProjectSubmission,
        fallback: &str,
    ) -> Result<Project, ApiError> {
        let request = Self::authorized(request, token)?;
        let request = if submission.image.is_some() {
            request.multipart(Self::project_form(submission)?)
        } else {
            request.json(&ProjectRequest::from(submission))
        };

        let response = Self::send(request).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let message = error
                .detail_or_text_or(&format!("HTTP {}: {}", error.status().as_u16(), fallback));
            tracing::warn!(status = error.status().as_u16(), error = %message, "Project submission rejected");
            return Err(error.into_error(message));
        }

        let dto: ProjectDto = Self::decode(response, fallback).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl CrowdfundingApiPort for HttpApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.url("/projects");
        tracing::debug!(url = %url, "Fetching projects");

        let response = Self::send(self.client.get(&url)).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let message = error.detail_or(PROJECTS_UNAVAILABLE);
            tracing::warn!(status = error.status().as_u16(), "Failed to fetch projects");
            return Err(error.into_error(message));
        }

        let dtos: Vec<ProjectDto> = Self::decode(response, PROJECTS_UNAVAILABLE).await?;
        Ok(dtos.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError> {
        let url = self.url(&format!("/projects/{}", id));
        let fallback = format!("Error fetching project with id {}", id);
        tracing::debug!(url = %url, "Fetching project");

        let response = Self::send(self.client.get(&url)).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let message = error.json_detail_or(&fallback);
            tracing::warn!(project_id = %id, status = error.status().as_u16(), "Failed to fetch project");
            return Err(error.into_error(message));
        }

        let dto: ProjectDto = Self::decode(response, &fallback).await?;
        Ok(dto.into())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        const FALLBACK: &str = "Error trying to login";
        let url = self.url("/api-token-auth/");
        tracing::debug!(url = %url, username = %credentials.username, "Logging in");

        let response = Self::send(self.client.post(&url).json(credentials)).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let message = error.detail_or(FALLBACK);
            tracing::warn!(status = error.status().as_u16(), "Login rejected");
            return Err(error.into_error(message));
        }

        let dto: LoginResponseDto = Self::decode(response, FALLBACK).await?;
        dto.into_login()
            .ok_or_else(|| ApiError::Parse(FALLBACK.to_string()))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<RegisteredUser, ApiError> {
        const FALLBACK: &str = "Failed to sign up";
        let url = self.url("/users/");
        tracing::debug!(url = %url, username = %request.username, "Signing up");

        let response = Self::send(self.client.post(&url).json(request)).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let message = error.detail_or(FALLBACK);
            tracing::warn!(status = error.status().as_u16(), "Signup rejected");
            return Err(error.into_error(message));
        }

        let dto: UserDto = Self::decode(response, FALLBACK).await?;
        Ok(dto.into())
    }

    async fn create_pledge(
        &self,
        token: &str,
        project_id: ProjectId,
        pledge: &PledgeSubmission,
    ) -> Result<Pledge, ApiError> {
        let url = self.url(&format!("/projects/{}/pledges/", project_id));
        let request = Self::authorized(self.client.post(&url), token)?.json(pledge);

        tracing::debug!(
            url = %url,
            amount = pledge.amount,
            anonymous = pledge.anonymous,
            "Sending pledge"
        );

        let response = Self::send(request).await?;
        if !response.status().is_success() {
            let error = ErrorResponse::read(response).await;
            let fallback = format!("Error creating pledge (status {})", error.status_line());
            let message = error.field_or_detail_or("add_content", &fallback);
            tracing::warn!(project_id = %project_id, status = error.status().as_u16(), "Pledge rejected");
            return Err(error.into_error(message));
        }

        let dto: PledgeDto = Self::decode(response, "Error creating pledge").await?;
        Ok(dto.into())
    }

    async fn create_project(
        &self,
        token: &str,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError> {
        let url = self.url("/projects/");
        tracing::debug!(url = %url, title = %submission.title, with_image = submission.image.is_some(), "Creating project");

        self.send_project(self.client.post(&url), token, submission, "Error creating project")
            .await
    }

    async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError> {
        let url = self.url(&format!("/projects/{}/", id));
        tracing::debug!(url = %url, with_image = submission.image.is_some(), "Updating project");

        self.send_project(self.client.put(&url), token, submission, "Error updating project")
            .await
    }
}
