//! Session Store Port - 登录态持久化抽象
//!
//! 登录态是 token / user_id / username 三元组：
//! 登录时整体写入，登出时整体清除，不存在只更新部分字段的操作。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::project::UserId;

/// Session Store 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(String),

    #[error("Session data is corrupt: {0}")]
    Corrupt(String),
}

/// 登录态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id,
            username: username.into(),
        }
    }
}

/// Session Store Port
pub trait SessionStorePort: Send + Sync {
    /// 读取当前登录态，未登录返回 `None`
    fn load(&self) -> Result<Option<AuthSession>, SessionError>;

    /// 整体写入三元组
    fn save(&self, session: &AuthSession) -> Result<(), SessionError>;

    /// 整体清除三元组
    fn clear(&self) -> Result<(), SessionError>;

    /// 存在 token 即视为已登录
    fn is_logged_in(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}
