//! Pledge Commands

use crate::domain::project::{PledgeDraft, ProjectId};

/// 为项目提交认捐命令
#[derive(Debug, Clone)]
pub struct CreatePledge {
    pub project_id: ProjectId,
    pub draft: PledgeDraft,
}
