//! 测试用的假 API
//!
//! 记录每次调用，按预设返回结果，不发出任何网络请求。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::application::ports::{
    ApiError, Credentials, CrowdfundingApiPort, LoginResponse, ProjectSubmission,
    RegisteredUser, SignupRequest,
};
use crate::domain::project::{Pledge, PledgeSubmission, Project, ProjectId, UserId};

/// 一次被记录的调用
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects,
    GetProject(ProjectId),
    Login(String),
    Signup(String),
    CreatePledge {
        token: String,
        project_id: ProjectId,
        pledge: PledgeSubmission,
    },
    CreateProject {
        token: String,
        owner: UserId,
    },
    UpdateProject {
        token: String,
        id: ProjectId,
    },
}

#[derive(Default)]
pub struct FakeApi {
    projects: Mutex<HashMap<ProjectId, Project>>,
    calls: Mutex<Vec<Call>>,
    login_error: Mutex<Option<(u16, String)>>,
    pledge_error: Mutex<Option<(u16, String)>>,
    /// 设置后 create_pledge 会等待通知再返回
    pledge_gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(self, project: Project) -> Self {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id, project);
        self
    }

    pub fn with_pledge_gate(mut self, gate: Arc<Notify>) -> Self {
        self.pledge_gate = Some(gate);
        self
    }

    pub fn fail_login(self, status: u16, message: &str) -> Self {
        *self.login_error.lock().unwrap() = Some((status, message.to_string()));
        self
    }

    pub fn fail_pledge(self, status: u16, message: &str) -> Self {
        *self.pledge_error.lock().unwrap() = Some((status, message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn rejected((status, message): (u16, String)) -> ApiError {
    ApiError::Api { status, message }
}

#[async_trait]
impl CrowdfundingApiPort for FakeApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record(Call::ListProjects);
        let mut projects: Vec<Project> = self.projects.lock().unwrap().values().cloned().collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.record(Call::GetProject(id));
        self.projects
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: "Not found.".to_string(),
            })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.record(Call::Login(credentials.username.clone()));
        if let Some(err) = self.login_error.lock().unwrap().clone() {
            return Err(rejected(err));
        }
        Ok(LoginResponse {
            token: format!("token-{}", credentials.username),
            user_id: UserId::new(42),
            email: None,
        })
    }

    async fn signup(&self, request: &SignupRequest) -> Result<RegisteredUser, ApiError> {
        self.record(Call::Signup(request.username.clone()));
        Ok(RegisteredUser {
            id: Some(UserId::new(43)),
            username: request.username.clone(),
            email: Some(request.email.clone()),
        })
    }

    async fn create_pledge(
        &self,
        token: &str,
        project_id: ProjectId,
        pledge: &PledgeSubmission,
    ) -> Result<Pledge, ApiError> {
        self.record(Call::CreatePledge {
            token: token.to_string(),
            project_id,
            pledge: pledge.clone(),
        });
        if let Some(gate) = &self.pledge_gate {
            gate.notified().await;
        }
        if let Some(err) = self.pledge_error.lock().unwrap().clone() {
            return Err(rejected(err));
        }

        let created = Pledge {
            comment: Some(pledge.comment.clone()),
            anonymous: pledge.anonymous,
            ..Pledge::new(pledge.amount, pledge.add_content.clone())
        };
        if let Some(project) = self.projects.lock().unwrap().get_mut(&project_id) {
            project.pledges.push(created.clone());
        }
        Ok(created)
    }

    async fn create_project(
        &self,
        token: &str,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError> {
        self.record(Call::CreateProject {
            token: token.to_string(),
            owner: submission.owner,
        });
        let id = ProjectId::new(100);
        let project = Project::new(
            id,
            submission.title.clone(),
            submission.content_type,
            submission.goal,
            submission.starting_content.clone(),
            submission.owner,
        );
        self.projects.lock().unwrap().insert(id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        submission: &ProjectSubmission,
    ) -> Result<Project, ApiError> {
        self.record(Call::UpdateProject {
            token: token.to_string(),
            id,
        });
        let mut projects = self.projects.lock().unwrap();
        let project = projects.get_mut(&id).ok_or_else(|| ApiError::Api {
            status: 404,
            message: "Not found.".to_string(),
        })?;
        project.title = submission.title.clone();
        project.goal = submission.goal;
        Ok(project.clone())
    }
}
