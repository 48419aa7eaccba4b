//! Project Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContentType, Pledge, ProjectId, UserId};
use crate::domain::ledger::ContributionLedger;
use crate::domain::progress::ProgressReport;

/// Project 聚合根
///
/// 客户端只持有后端返回的只读快照，每次浏览重新获取。
///
/// 不变量:
/// - content_type 决定所有分段规则
/// - pledges 保持后端返回顺序（即创建顺序），客户端不重排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub genre: Option<String>,
    pub content_type: ContentType,
    /// 目标片段数，0 表示无效目标（进度恒为 0）
    pub goal: u32,
    pub starting_content: String,
    pub current_content: Option<String>,
    pub image: Option<String>,
    pub owner: UserId,
    pub owner_username: Option<String>,
    pub is_open: bool,
    pub date_created: Option<DateTime<Utc>>,
    pub pledges: Vec<Pledge>,
}

impl Project {
    /// 创建一个没有认捐的项目快照
    pub fn new(
        id: ProjectId,
        title: impl Into<String>,
        content_type: ContentType,
        goal: u32,
        starting_content: impl Into<String>,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            genre: None,
            content_type,
            goal,
            starting_content: starting_content.into(),
            current_content: None,
            image: None,
            owner,
            owner_username: None,
            is_open: true,
            date_created: None,
            pledges: Vec::new(),
        }
    }

    /// 组装贡献账本：开篇 + 按顺序的认捐
    pub fn ledger(&self) -> ContributionLedger {
        ContributionLedger::assemble(self)
    }

    /// 两种进度的汇总
    pub fn progress(&self) -> ProgressReport {
        ProgressReport::for_project(self)
    }

    /// 展示用的当前全文
    ///
    /// 后端给出 current_content 时直接使用，否则由账本拼接推导。
    pub fn display_content(&self) -> String {
        match &self.current_content {
            Some(content) if !content.trim().is_empty() => content.clone(),
            _ => self.ledger().full_text(),
        }
    }

    /// 是否为指定用户所有
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner == user_id
    }

    pub fn contribution_count(&self) -> usize {
        self.pledges.len()
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_open {
            "Open for contributions"
        } else {
            "Completed"
        }
    }
}
