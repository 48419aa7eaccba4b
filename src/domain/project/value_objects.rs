//! Project Context - Value Objects

use serde::{Deserialize, Serialize};

/// 项目唯一标识（后端自增 ID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// 认捐唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PledgeId(u64);

impl PledgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PledgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 内容类型
///
/// 决定分段规则、片段标签和目标校验文案，三者必须使用同一个 `is_poem` 判断。
/// 未知或缺失的类型一律按故事处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ContentType {
    /// 诗歌：按行计数
    Poem,
    /// 故事：按段落计数
    #[default]
    Story,
}

impl ContentType {
    /// 严格解析，仅接受 `poem` / `story`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "poem" => Some(Self::Poem),
            "story" => Some(Self::Story),
            _ => None,
        }
    }

    pub fn is_poem(&self) -> bool {
        matches!(self, Self::Poem)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poem => "poem",
            Self::Story => "story",
        }
    }

    /// 片段标签（复数、首字母大写）
    pub fn label(&self) -> &'static str {
        if self.is_poem() {
            "Verses"
        } else {
            "Paragraphs"
        }
    }

    /// 单个片段的名称
    pub fn unit(&self) -> &'static str {
        if self.is_poem() {
            "verse"
        } else {
            "paragraph"
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 根据内容类型字符串解析片段标签
///
/// `"poem"` 得到 `"Verses"`，其他任何值得到 `"Paragraphs"`。
pub fn content_label(content_type: &str) -> &'static str {
    ContentType::from(content_type).label()
}
