//! Project Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CrowdfundingApiPort, SessionStorePort};
use crate::application::queries::{GetProject, ListProjects};
use crate::domain::ledger::ContributionLedger;
use crate::domain::progress::ProgressReport;
use crate::domain::project::Project;

// ============================================================================
// Response DTOs
// ============================================================================

/// 项目详情：快照 + 账本 + 进度
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    pub project: Project,
    pub ledger: ContributionLedger,
    pub progress: ProgressReport,
    /// 当前登录用户是否为所有者
    pub viewer_is_owner: bool,
    /// 当前用户能否认捐（项目开放且已登录）
    pub can_contribute: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListProjects Handler
pub struct ListProjectsHandler {
    api: Arc<dyn CrowdfundingApiPort>,
}

impl ListProjectsHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<Project>, ApplicationError> {
        let projects = self.api.list_projects().await?;
        tracing::debug!(count = projects.len(), "Projects fetched");
        Ok(projects)
    }
}

/// GetProject Handler
pub struct GetProjectHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    session_store: Arc<dyn SessionStorePort>,
}

impl GetProjectHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { api, session_store }
    }

    pub async fn handle(&self, query: GetProject) -> Result<ProjectDetails, ApplicationError> {
        let project = self.api.get_project(query.project_id).await?;

        // 读取登录态失败时按访客处理
        let session = match self.session_store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session, continuing as guest");
                None
            }
        };

        let viewer_is_owner = session
            .as_ref()
            .is_some_and(|s| project.is_owned_by(s.user_id));
        let can_contribute = project.is_open && session.is_some();

        let ledger = project.ledger();
        let progress = project.progress();

        Ok(ProjectDetails {
            project,
            ledger,
            progress,
            viewer_is_owner,
            can_contribute,
        })
    }
}
