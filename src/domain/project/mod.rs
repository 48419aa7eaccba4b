//! Project Context - 项目限界上下文
//!
//! 职责:
//! - 项目聚合（后端快照）
//! - 认捐实体与内容片段
//! - 提交前草稿校验
//! - 封面图片解析

mod aggregate;
mod cover;
mod draft;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Project;
pub use cover::{genre_image, genres, resolve_image_url, DEFAULT_COVER};
pub use draft::{
    default_comment, pledge_messages, project_messages, ImageUpload, PledgeDraft,
    PledgeSubmission, ProjectDraft, MAX_STARTING_CONTENT_CHARS,
};
pub use entities::{Pledge, Segment};
pub use errors::ValidationErrors;
pub use value_objects::{content_label, ContentType, PledgeId, ProjectId, UserId};
