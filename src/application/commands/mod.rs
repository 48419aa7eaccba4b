//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：登录/登出/注册、认捐、项目创建与编辑

mod auth_commands;
mod pledge_commands;
mod project_commands;

pub mod handlers;

pub use auth_commands::*;
pub use pledge_commands::*;
pub use project_commands::*;
