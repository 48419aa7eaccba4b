//! PlotTwist - 协作写作众筹客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Project Context: 项目、认捐、草稿校验、封面
//! - 内容分段、进度计算、贡献账本、写作提示
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CrowdfundingApi, SessionStore）
//! - Commands: 登录、注册、认捐、创建/编辑项目
//! - Queries: 项目列表、项目详情
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: reqwest 后端客户端
//! - Persistence: 登录态文件存储
//! - Memory: 登录态内存存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
