//! Persistence Layer - 数据持久化
//!
//! 登录态文件存储

mod file_session_store;

pub use file_session_store::FileSessionStore;
