//! Project Commands

use crate::domain::project::{ProjectDraft, ProjectId};

/// 创建项目命令
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub draft: ProjectDraft,
}

/// 编辑项目命令
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: ProjectId,
    pub draft: ProjectDraft,
}
