//! Auth Command Handlers

use std::sync::Arc;

use crate::application::commands::{Login, Logout, Signup};
use crate::application::error::ApplicationError;
use crate::application::operation::{OperationState, OperationTracker};
use crate::application::ports::{
    AuthSession, Credentials, CrowdfundingApiPort, RegisteredUser, SessionStorePort,
    SignupRequest,
};

// ============================================================================
// Login
// ============================================================================

/// Login Handler - 登录成功后整体写入登录态
pub struct LoginHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    session_store: Arc<dyn SessionStorePort>,
    tracker: OperationTracker,
}

impl LoginHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            api,
            session_store,
            tracker: OperationTracker::new("login"),
        }
    }

    pub fn state(&self) -> OperationState {
        self.tracker.state()
    }

    pub async fn handle(&self, command: Login) -> Result<AuthSession, ApplicationError> {
        let username = command.username.trim().to_string();
        if username.is_empty() || command.password.is_empty() {
            return Err(ApplicationError::validation(
                "Username and password are required",
            ));
        }

        self.tracker
            .run(async {
                let credentials = Credentials {
                    username: username.clone(),
                    password: command.password,
                };
                let response = self.api.login(&credentials).await?;

                let session = AuthSession::new(response.token, response.user_id, username);
                self.session_store.save(&session)?;

                tracing::info!(
                    user_id = %session.user_id,
                    username = %session.username,
                    "Logged in"
                );

                Ok::<_, ApplicationError>(session)
            })
            .await
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout Handler - 整体清除登录态
pub struct LogoutHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl LogoutHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, _command: Logout) -> Result<(), ApplicationError> {
        self.session_store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}

// ============================================================================
// Signup
// ============================================================================

/// Signup Handler
pub struct SignupHandler {
    api: Arc<dyn CrowdfundingApiPort>,
    tracker: OperationTracker,
}

impl SignupHandler {
    pub fn new(api: Arc<dyn CrowdfundingApiPort>) -> Self {
        Self {
            api,
            tracker: OperationTracker::new("signup"),
        }
    }

    pub fn state(&self) -> OperationState {
        self.tracker.state()
    }

    pub async fn handle(&self, command: Signup) -> Result<RegisteredUser, ApplicationError> {
        let request = SignupRequest {
            username: command.username.trim().to_string(),
            password: command.password,
            email: command.email.trim().to_string(),
            first_name: command.first_name.trim().to_string(),
            last_name: command.last_name.trim().to_string(),
        };

        if request.username.is_empty() || request.password.is_empty() {
            return Err(ApplicationError::validation(
                "Username and password are required",
            ));
        }
        if !request.email.contains('@') {
            return Err(ApplicationError::validation(
                "Please enter a valid email address",
            ));
        }

        self.tracker
            .run(async {
                let user = self.api.signup(&request).await?;
                tracing::info!(username = %user.username, "User signed up");
                Ok::<_, ApplicationError>(user)
            })
            .await
    }
}
