//! Project Context - Entities

use serde::{Deserialize, Serialize};

use super::{PledgeId, UserId};

/// 认捐 - 一位用户为项目追加的文字
///
/// `amount` 是用户自报的片段数，从不与 `add_content` 的实际片段数核对。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: Option<PledgeId>,
    /// 自报的片段数，无效值已在反序列化边界归零
    pub amount: u32,
    /// 追加的正文，缺失时为空串
    pub add_content: String,
    pub comment: Option<String>,
    pub anonymous: bool,
    pub supporter: Option<UserId>,
    pub supporter_username: Option<String>,
}

impl Pledge {
    pub fn new(amount: u32, add_content: impl Into<String>) -> Self {
        Self {
            id: None,
            amount,
            add_content: add_content.into(),
            comment: None,
            anonymous: false,
            supporter: None,
            supporter_username: None,
        }
    }

    pub fn with_supporter(mut self, supporter: UserId, username: impl Into<String>) -> Self {
        self.supporter = Some(supporter);
        self.supporter_username = Some(username.into());
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// 内容片段 - 一行诗或一段故事
///
/// 不变量:
/// - index 在账本内唯一且有序
/// - content 已去除首尾空白且不为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    index: usize,
    content: String,
}

impl Segment {
    pub fn new(index: usize, content: String) -> Result<Self, &'static str> {
        if content.trim().is_empty() {
            return Err("片段内容不能为空");
        }
        Ok(Self { index, content })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
