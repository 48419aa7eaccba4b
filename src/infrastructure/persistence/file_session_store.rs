//! File Session Store - 文件登录态存储
//!
//! 实现 SessionStorePort trait
//!
//! 文件内容为固定三个键的 JSON：`token`、`user_id`、`username`（均为字符串）。
//! 写入先落临时文件再 rename，保证三个字段要么全部更新，要么全部不变。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::ports::{AuthSession, SessionError, SessionStorePort};

/// 落盘格式
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user_id: String,
    username: String,
}

impl From<&AuthSession> for StoredSession {
    fn from(session: &AuthSession) -> Self {
        Self {
            token: session.token.clone(),
            user_id: session.user_id.to_string(),
            username: session.username.clone(),
        }
    }
}

impl TryFrom<StoredSession> for AuthSession {
    type Error = SessionError;

    fn try_from(stored: StoredSession) -> Result<Self, Self::Error> {
        let user_id = stored
            .user_id
            .parse()
            .map_err(|_| SessionError::Corrupt(format!("invalid user_id: {}", stored.user_id)))?;
        Ok(AuthSession::new(stored.token, user_id, stored.username))
    }
}

/// 文件登录态存储
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 登录态文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionStorePort for FileSessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };

        let stored: StoredSession =
            serde_json::from_str(&data).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        // 没有 token 即未登录
        if stored.token.is_empty() {
            return Ok(None);
        }

        AuthSession::try_from(stored).map(Some)
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionError::Io(e.to_string()))?;
        }

        let data = serde_json::to_vec_pretty(&StoredSession::from(session))
            .map_err(|e| SessionError::Io(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, data).map_err(|e| SessionError::Io(e.to_string()))?;
        fs::rename(&temp_path, &self.path).map_err(|e| SessionError::Io(e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            user_id = %session.user_id,
            "Session saved"
        );

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e.to_string())),
        }
    }
}
