//! Auth Commands

/// 登录命令
#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// 登出命令
#[derive(Debug, Clone)]
pub struct Logout;

/// 注册命令
#[derive(Debug, Clone)]
pub struct Signup {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
