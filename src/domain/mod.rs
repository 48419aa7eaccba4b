//! Domain Layer - 领域层
//!
//! 贡献记账模型:
//! - Project Context: 项目、认捐、草稿校验
//! - 内容分段器: 诗歌按行、故事按段
//! - 进度计算: 片段进度与认捐进度
//! - 贡献账本: 开篇 + 认捐的有序署名序列

pub mod ledger;
pub mod progress;
pub mod project;
pub mod prompts;

mod content_segmenter;

pub use content_segmenter::{join_segments, segment_count, separator, tokenize};
pub use ledger::{Attribution, ContributionLedger, EntryKind, LedgerEntry};
pub use progress::{calculate_pledge_progress, calculate_progress, ProgressReport};
pub use project::{content_label, ContentType};
