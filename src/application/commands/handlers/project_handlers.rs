//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateProject, UpdateProject};
use crate::application::error::ApplicationError;
use crate::application::operation::{OperationState, OperationTracker};
use crate::application::ports::{
    AuthSession, CrowdfundingApiPort, ProjectSubmission, SessionStorePort,
};
use crate::domain::project::{Project, ProjectDraft};

/// 校验草稿并取得登录态，两者都在发请求之前完成
fn prepare(
    session_store: &dyn SessionStorePort,
    draft: ProjectDraft,
) -> Result<(AuthSession, ProjectSubmission), ApplicationError> {
    draft.validate()?;
    let session = session_store
        .load()?
        .ok_or(ApplicationError::AuthenticationRequired)?;
    let submission = ProjectSubmission::from_draft(draft, session.user_id);
    Ok((session, submission))
}

// ============================================================================
// CreateProject
// ============================================================================

/// CreateProject Handler
pub struct CreateProjectHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    session_store: Arc<dyn SessionStorePort>,
    tracker: OperationTracker,
}

impl CreateProjectHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            api,
            session_store,
            tracker: OperationTracker::new("project creation"),
        }
    }

    pub fn state(&self) -> OperationState {
        self.tracker.state()
    }

    pub async fn handle(&self, command: CreateProject) -> Result<Project, ApplicationError> {
        let (session, submission) = prepare(self.session_store.as_ref(), command.draft)?;

        let project = self
            .tracker
            .run(async {
                let project = self.api.create_project(&session.token, &submission).await?;
                Ok::<_, ApplicationError>(project)
            })
            .await?;

        tracing::info!(
            project_id = %project.id,
            title = %project.title,
            owner = %session.user_id,
            "Project created"
        );

        Ok(project)
    }
}

// ============================================================================
// UpdateProject
// ============================================================================

/// UpdateProject Handler
pub struct UpdateProjectHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    session_store: Arc<dyn SessionStorePort>,
    tracker: OperationTracker,
}

impl UpdateProjectHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            api,
            session_store,
            tracker: OperationTracker::new("project update"),
        }
    }

    pub fn state(&self) -> OperationState {
        self.tracker.state()
    }

    pub async fn handle(&self, command: UpdateProject) -> Result<Project, ApplicationError> {
        let project_id = command.project_id;
        let (session, submission) = prepare(self.session_store.as_ref(), command.draft)?;

        let project = self
            .tracker
            .run(async {
                let project = self
                    .api
                    .update_project(&session.token, project_id, &submission)
                    .await?;
                Ok::<_, ApplicationError>(project)
            })
            .await?;

        tracing::info!(project_id = %project.id, "Project updated");

        Ok(project)
    }
}
