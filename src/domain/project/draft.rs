//! Project Context - 提交前的本地草稿与校验

use serde::Serialize;

use super::{ContentType, ValidationErrors};
use crate::domain::content_segmenter::segment_count;

/// 开篇内容最大字符数
pub const MAX_STARTING_CONTENT_CHARS: usize = 5000;

/// 项目草稿校验文案
pub mod project_messages {
    pub const TITLE_REQUIRED: &str = "Every story needs a title to begin its journey!";
    pub const DESCRIPTION_REQUIRED: &str = "Paint us a picture with your description...";
    pub const GOAL_REQUIRED: &str =
        "Every journey needs a destination - how many verses or paragraphs await?";
    pub const GOAL_POSITIVE: &str = "The path ahead needs at least one step!";
    pub const GENRE_REQUIRED: &str = "In which realm does your tale unfold?";
    pub const CONTENT_TYPE_REQUIRED: &str = "Will your story flow in prose or dance in verse?";
    pub const STARTING_CONTENT_REQUIRED: &str =
        "Every adventure needs its first step - add your opening words!";
    pub const STARTING_CONTENT_TOO_LONG: &str =
        "Your opening words must stay within 5000 characters.";
}

/// 认捐草稿校验文案
pub mod pledge_messages {
    pub const CONTENT_REQUIRED: &str = "Please add your creative contribution";
    pub const AMOUNT_REQUIRED: &str = "Please specify the number of verses";
}

/// 待上传的封面图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 创建/编辑项目的草稿
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub content_type: Option<ContentType>,
    /// `None` 表示未填写
    pub goal: Option<u32>,
    pub starting_content: String,
    pub current_content: Option<String>,
    pub is_open: bool,
    pub image: Option<ImageUpload>,
}

impl ProjectDraft {
    /// 校验全部字段，返回所有问题
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        use project_messages::*;

        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", TITLE_REQUIRED);
        }
        if self.description.trim().is_empty() {
            errors.add("description", DESCRIPTION_REQUIRED);
        }

        match self.goal {
            None => errors.add("goal", GOAL_REQUIRED),
            Some(0) => errors.add("goal", GOAL_POSITIVE),
            Some(goal) => {
                let content_type = self.content_type.unwrap_or_default();
                let current = self
                    .current_content
                    .as_deref()
                    .map(|content| segment_count(content, content_type))
                    .unwrap_or(0);
                if current > goal as usize {
                    errors.add(
                        "goal",
                        format!(
                            "Your tale has grown beyond its bounds! Current {}: {}",
                            content_type.label().to_lowercase(),
                            current
                        ),
                    );
                }
            }
        }

        if self.genre.trim().is_empty() {
            errors.add("genre", GENRE_REQUIRED);
        }
        if self.content_type.is_none() {
            errors.add("content_type", CONTENT_TYPE_REQUIRED);
        }

        if self.starting_content.trim().is_empty() {
            errors.add("starting_content", STARTING_CONTENT_REQUIRED);
        } else if self.starting_content.chars().count() > MAX_STARTING_CONTENT_CHARS {
            errors.add("starting_content", STARTING_CONTENT_TOO_LONG);
        }

        errors.into_result(())
    }
}

/// 认捐草稿
#[derive(Debug, Clone, Default)]
pub struct PledgeDraft {
    pub amount: u32,
    pub add_content: String,
    pub comment: Option<String>,
    pub anonymous: bool,
}

/// 校验通过、可直接提交的认捐
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PledgeSubmission {
    pub amount: u32,
    pub add_content: String,
    pub comment: String,
    pub anonymous: bool,
}

impl PledgeDraft {
    /// 校验并规整：正文去首尾空白，空备注替换为默认备注
    pub fn into_submission(self) -> Result<PledgeSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.amount == 0 {
            errors.add("amount", pledge_messages::AMOUNT_REQUIRED);
        }
        let add_content = self.add_content.trim().to_string();
        if add_content.is_empty() {
            errors.add("add_content", pledge_messages::CONTENT_REQUIRED);
        }

        let comment = self
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_comment(self.amount));

        errors.into_result(PledgeSubmission {
            amount: self.amount,
            add_content,
            comment,
            anonymous: self.anonymous,
        })
    }
}

/// 未填写备注时的默认备注
pub fn default_comment(amount: u32) -> String {
    format!("Contributed {} verse(s)", amount)
}
