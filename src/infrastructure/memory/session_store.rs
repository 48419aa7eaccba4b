//! In-Memory Session Store Implementation

use std::sync::RwLock;

use crate::application::ports::{AuthSession, SessionError, SessionStorePort};

/// 内存登录态存储
///
/// 进程退出即丢失，适用于不落盘的一次性使用。
pub struct InMemorySessionStore {
    session: RwLock<Option<AuthSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        self.session
            .read()
            .map(|s| s.clone())
            .map_err(|e| SessionError::Io(e.to_string()))
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        let mut current = self
            .session
            .write()
            .map_err(|e| SessionError::Io(e.to_string()))?;
        *current = Some(session.clone());
        tracing::debug!(user_id = %session.user_id, "Session stored in memory");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut current = self
            .session
            .write()
            .map_err(|e| SessionError::Io(e.to_string()))?;
        *current = None;
        Ok(())
    }
}
