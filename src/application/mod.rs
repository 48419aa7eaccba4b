//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CrowdfundingApiPort、SessionStorePort）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - operation: 提交状态跟踪（空闲 / 进行中 / 已结束）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod operation;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    // Auth commands
    Login,
    Logout,
    Signup,
    // Pledge commands
    CreatePledge,
    // Project commands
    CreateProject,
    UpdateProject,
    // Handlers
    handlers::{
        CreatePledgeHandler, CreatePledgeResponse, CreateProjectHandler, LoginHandler,
        LogoutHandler, SignupHandler, UpdateProjectHandler,
    },
};

pub use error::ApplicationError;

pub use operation::{OperationState, OperationTracker};

pub use ports::{
    // Crowdfunding API
    ApiError,
    Credentials,
    CrowdfundingApiPort,
    LoginResponse,
    ProjectSubmission,
    RegisteredUser,
    SignupRequest,
    // Session store
    AuthSession,
    SessionError,
    SessionStorePort,
};

pub use queries::{
    GetProject,
    ListProjects,
    // Handlers
    handlers::{GetProjectHandler, ListProjectsHandler, ProjectDetails},
};
