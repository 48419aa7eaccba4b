//! Project Queries

use crate::domain::project::ProjectId;

/// 列出所有项目查询
#[derive(Debug, Clone)]
pub struct ListProjects;

/// 获取项目详情查询（含账本与进度）
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: ProjectId,
}
