//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod crowdfunding_api;
mod session_store;

pub use crowdfunding_api::{
    ApiError, Credentials, CrowdfundingApiPort, LoginResponse, ProjectSubmission,
    RegisteredUser, SignupRequest,
};
pub use session_store::{AuthSession, SessionError, SessionStorePort};
