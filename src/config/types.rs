//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 后端 API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 登录态存储配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 封面图片配置
    #[serde(default)]
    pub media: MediaConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 后端基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// 登录态存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 登录态文件路径
    #[serde(default = "default_session_path")]
    pub path: PathBuf,

    /// 为 false 时登录态只保存在进程内存中
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".plottwist/session.json")
}

fn default_persist() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            persist: default_persist(),
        }
    }
}

/// 封面图片配置
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// 类型默认封面所在的基础路径
    #[serde(default = "default_images_base_url")]
    pub images_base_url: String,
}

fn default_images_base_url() -> String {
    "/images".to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            images_base_url: default_images_base_url(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session.path, PathBuf::from(".plottwist/session.json"));
        assert!(config.session.persist);
        assert_eq!(config.media.images_base_url, "/images");
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api": {}, "session": {"persist": false}}"#).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(!config.session.persist);
        assert_eq!(config.session.path, PathBuf::from(".plottwist/session.json"));
    }
}
