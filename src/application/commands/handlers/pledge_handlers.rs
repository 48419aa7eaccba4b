//! Pledge Command Handlers

use std::sync::Arc;

use crate::application::commands::CreatePledge;
use crate::application::error::ApplicationError;
use crate::application::operation::{OperationState, OperationTracker};
use crate::application::ports::{CrowdfundingApiPort, SessionStorePort};
use crate::domain::project::{Pledge, Project};

/// 认捐提交响应
#[derive(Debug, Clone)]
pub struct CreatePledgeResponse {
    pub pledge: Pledge,
    /// 提交成功后重新获取的项目；刷新失败时为 None
    pub project: Option<Project>,
}

/// CreatePledge Handler
///
/// 1. 本地校验草稿（失败不发请求）
/// 2. 检查登录态（未登录不发请求）
/// 3. 提交认捐，进行中拒绝重复提交
/// 4. 成功后顺序刷新项目
pub struct CreatePledgeHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    session_store: Arc<dyn SessionStorePort>,
    tracker: OperationTracker,
}

impl CreatePledgeHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            api,
            session_store,
            tracker: OperationTracker::new("pledge submission"),
        }
    }

    pub fn state(&self) -> OperationState {
        self.tracker.state()
    }

    pub async fn handle(&self, command: CreatePledge) -> Result<CreatePledgeResponse, ApplicationError> {
        let project_id = command.project_id;
        let submission = command.draft.into_submission()?;
        let session = self
            .session_store
            .load()?
            .ok_or(ApplicationError::AuthenticationRequired)?;

        let pledge = self
            .tracker
            .run(async {
                tracing::debug!(
                    project_id = %project_id,
                    amount = submission.amount,
                    anonymous = submission.anonymous,
                    "Submitting pledge"
                );
                let pledge = self
                    .api
                    .create_pledge(&session.token, project_id, &submission)
                    .await?;
                Ok::<_, ApplicationError>(pledge)
            })
            .await?;

        tracing::info!(
            project_id = %project_id,
            amount = pledge.amount,
            "Pledge created"
        );

        let project = match self.api.get_project(project_id).await {
            Ok(project) => Some(project),
            Err(e) => {
                tracing::warn!(
                    project_id = %project_id,
                    error = %e,
                    "Failed to refresh project after pledge"
                );
                None
            }
        };

        Ok(CreatePledgeResponse { pledge, project })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AuthSession;
    use crate::application::testing::{Call, FakeApi};
    use crate::domain::project::{ContentType, PledgeDraft, ProjectId, UserId};
    use crate::infrastructure::memory::InMemorySessionStore;
    use tokio::sync::Notify;

    fn project() -> Project {
        Project::new(
            ProjectId::new(5),
            "Night Poem",
            ContentType::Poem,
            4,
            "Line one\nLine two",
            UserId::new(1),
        )
    }

    fn logged_in() -> Arc<InMemorySessionStore> {
        let store = InMemorySessionStore::new();
        store
            .save(&AuthSession::new("tok", UserId::new(2), "muse"))
            .unwrap();
        Arc::new(store)
    }

    fn command(content: &str) -> CreatePledge {
        CreatePledge {
            project_id: ProjectId::new(5),
            draft: PledgeDraft {
                amount: 1,
                add_content: content.to_string(),
                comment: None,
                anonymous: false,
            },
        }
    }

    #[tokio::test]
    async fn test_pledge_then_refetch() {
        let api = Arc::new(FakeApi::new().with_project(project()));
        let handler = CreatePledgeHandler::new(api.clone(), logged_in());

        let response = handler.handle(command("  Line three  ")).await.unwrap();

        assert_eq!(response.pledge.add_content, "Line three");
        let refreshed = response.project.unwrap();
        assert_eq!(refreshed.ledger().total_segments(), 3);

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::CreatePledge { token, pledge, .. } => {
                assert_eq!(token, "tok");
                assert_eq!(pledge.comment, "Contributed 1 verse(s)");
            }
            other => panic!("unexpected call: {:?}", other),
        }
        assert_eq!(calls[1], Call::GetProject(ProjectId::new(5)));
        assert_eq!(handler.state(), OperationState::Succeeded);
    }

    #[tokio::test]
    async fn test_requires_login_before_request() {
        let api = Arc::new(FakeApi::new().with_project(project()));
        let handler = CreatePledgeHandler::new(api.clone(), Arc::new(InMemorySessionStore::new()));

        let err = handler.handle(command("Line three")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::AuthenticationRequired));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_content_rejected_locally() {
        let api = Arc::new(FakeApi::new().with_project(project()));
        let handler = CreatePledgeHandler::new(api.clone(), logged_in());

        let err = handler.handle(command("   ")).await.unwrap_err();

        assert_eq!(err.to_string(), "Please add your creative contribution");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_rejection_surfaces_once() {
        let api = Arc::new(
            FakeApi::new()
                .with_project(project())
                .fail_pledge(400, "Ensure this field has no more than 500 characters."),
        );
        let handler = CreatePledgeHandler::new(api.clone(), logged_in());

        let err = handler.handle(command("Line three")).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(api.calls().len(), 1);
        assert!(matches!(handler.state(), OperationState::Failed(_)));
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(
            FakeApi::new()
                .with_project(project())
                .with_pledge_gate(gate.clone()),
        );
        let handler = CreatePledgeHandler::new(api.clone(), logged_in());

        let (first, second) = tokio::join!(handler.handle(command("Line three")), async {
            let second = handler.handle(command("Line four")).await;
            gate.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(ApplicationError::InvalidState(_))));
        let pledges = api
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreatePledge { .. }))
            .count();
        assert_eq!(pledges, 1);
    }
}
