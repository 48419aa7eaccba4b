//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod auth_handlers;
mod pledge_handlers;
mod project_handlers;

pub use auth_handlers::*;
pub use pledge_handlers::*;
pub use project_handlers::*;
