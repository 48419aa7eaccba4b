//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：项目列表与项目详情

mod project_queries;

pub mod handlers;

pub use project_queries::*;
