//! 贡献账本
//!
//! 按顺序排列项目的开篇与全部认捐，每一项标注作者，供全文展示与片段计数。
//! 账本只追加、不重排：认捐保持后端返回的顺序。

use serde::Serialize;

use super::content_segmenter::{separator, tokenize};
use super::project::{ContentType, Pledge, PledgeId, Project, Segment, UserId};

/// 匿名认捐的占位作者
pub const ANONYMOUS_AUTHOR: &str = "A Mysterious Stranger";

/// 项目所有者没有用户名时的作者
pub const DEFAULT_OWNER_AUTHOR: &str = "The Author";

/// 认捐者没有用户名时的作者
pub const DEFAULT_SUPPORTER_AUTHOR: &str = "A Contributor";

/// 署名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribution {
    Owner {
        id: UserId,
        username: Option<String>,
    },
    Supporter {
        id: Option<UserId>,
        username: Option<String>,
    },
    /// 匿名认捐不携带任何真实身份
    Anonymous,
}

impl Attribution {
    fn for_pledge(pledge: &Pledge) -> Self {
        if pledge.anonymous {
            return Self::Anonymous;
        }
        Self::Supporter {
            id: pledge.supporter,
            username: pledge.supporter_username.clone(),
        }
    }

    /// 展示用的作者名
    pub fn label(&self) -> &str {
        match self {
            Self::Owner { username, .. } => username.as_deref().unwrap_or(DEFAULT_OWNER_AUTHOR),
            Self::Supporter { username, .. } => {
                username.as_deref().unwrap_or(DEFAULT_SUPPORTER_AUTHOR)
            }
            Self::Anonymous => ANONYMOUS_AUTHOR,
        }
    }
}

/// 账本条目类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
    /// 项目所有者撰写的开篇
    Opening,
    /// 一次认捐
    Contribution {
        pledge_id: Option<PledgeId>,
        comment: Option<String>,
    },
}

/// 账本条目
///
/// 正文为空的认捐仍占据自己的位置，只是没有片段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    ordinal: usize,
    kind: EntryKind,
    attribution: Attribution,
    segments: Vec<Segment>,
}

impl LedgerEntry {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    pub fn author(&self) -> &str {
        self.attribution.label()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// 贡献账本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionLedger {
    content_type: ContentType,
    entries: Vec<LedgerEntry>,
}

impl ContributionLedger {
    /// 从项目快照组装账本
    ///
    /// 第 0 项为开篇（署名所有者），其后每个认捐一项，片段索引在整个账本内连续。
    pub fn assemble(project: &Project) -> Self {
        let mut builder = LedgerBuilder::new(project.content_type);

        builder.push(
            EntryKind::Opening,
            Attribution::Owner {
                id: project.owner,
                username: project.owner_username.clone(),
            },
            &project.starting_content,
        );

        for pledge in &project.pledges {
            builder.push(
                EntryKind::Contribution {
                    pledge_id: pledge.id,
                    comment: pledge.comment.clone(),
                },
                Attribution::for_pledge(pledge),
                &pledge.add_content,
            );
        }

        builder.finish()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// 全部片段，按账本顺序
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.entries.iter().flat_map(|entry| entry.segments.iter())
    }

    pub fn total_segments(&self) -> usize {
        self.entries.iter().map(|entry| entry.segments.len()).sum()
    }

    /// 用规范分隔符拼接的全文
    pub fn full_text(&self) -> String {
        self.segments()
            .map(Segment::content)
            .collect::<Vec<_>>()
            .join(separator(self.content_type))
    }
}

struct LedgerBuilder {
    content_type: ContentType,
    entries: Vec<LedgerEntry>,
    next_index: usize,
}

impl LedgerBuilder {
    fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            entries: Vec::new(),
            next_index: 0,
        }
    }

    fn push(&mut self, kind: EntryKind, attribution: Attribution, content: &str) {
        let mut segments = Vec::new();
        for text in tokenize(content, self.content_type) {
            if let Ok(segment) = Segment::new(self.next_index, text) {
                segments.push(segment);
                self.next_index += 1;
            }
        }

        self.entries.push(LedgerEntry {
            ordinal: self.entries.len(),
            kind,
            attribution,
            segments,
        });
    }

    fn finish(self) -> ContributionLedger {
        ContributionLedger {
            content_type: self.content_type,
            entries: self.entries,
        }
    }
}
