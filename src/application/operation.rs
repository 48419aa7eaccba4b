//! 操作状态跟踪
//!
//! 每个待提交操作处于 空闲 / 进行中 / 已结束（成功或失败） 三种互斥状态之一。
//! 进行中时拒绝重复提交；结束后可以再次发起。

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use crate::application::error::ApplicationError;

/// 操作状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl OperationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// 操作状态跟踪器
#[derive(Debug)]
pub struct OperationTracker {
    name: &'static str,
    state: Mutex<OperationState>,
}

impl OperationTracker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(OperationState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OperationState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> OperationState {
        self.lock().clone()
    }

    /// 标记为进行中；已在进行中则拒绝
    pub fn begin(&self) -> Result<InFlight<'_>, ApplicationError> {
        let mut state = self.lock();
        if state.is_in_flight() {
            tracing::warn!(operation = self.name, "Duplicate submission rejected");
            return Err(ApplicationError::invalid_state(format!(
                "{} is already in progress",
                self.name
            )));
        }
        *state = OperationState::InFlight;
        Ok(InFlight {
            tracker: self,
            settled: false,
        })
    }

    /// 在跟踪下执行一次操作，结束时记录结果
    pub async fn run<T, F>(&self, operation: F) -> Result<T, ApplicationError>
    where
        F: Future<Output = Result<T, ApplicationError>>,
    {
        let in_flight = self.begin()?;
        let result = operation.await;
        match &result {
            Ok(_) => in_flight.succeed(),
            Err(err) => in_flight.fail(err.to_string()),
        }
        result
    }

    /// 回到空闲
    pub fn reset(&self) {
        *self.lock() = OperationState::Idle;
    }
}

/// 进行中的操作
///
/// 未显式结束就被丢弃（例如 future 被取消）时回到空闲。
pub struct InFlight<'a> {
    tracker: &'a OperationTracker,
    settled: bool,
}

impl InFlight<'_> {
    pub fn succeed(mut self) {
        self.settle(OperationState::Succeeded);
    }

    pub fn fail(mut self, message: String) {
        self.settle(OperationState::Failed(message));
    }

    fn settle(&mut self, state: OperationState) {
        *self.tracker.lock() = state;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.tracker.lock() = OperationState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_begin_rejected() {
        let tracker = OperationTracker::new("pledge");
        let first = tracker.begin().unwrap();
        assert!(tracker.state().is_in_flight());
        assert!(matches!(
            tracker.begin(),
            Err(ApplicationError::InvalidState(_))
        ));
        first.succeed();
        assert_eq!(tracker.state(), OperationState::Succeeded);
        assert!(tracker.begin().is_ok());
    }

    #[test]
    fn test_dropped_operation_returns_to_idle() {
        let tracker = OperationTracker::new("login");
        {
            let _in_flight = tracker.begin().unwrap();
        }
        assert_eq!(tracker.state(), OperationState::Idle);
    }

    #[tokio::test]
    async fn test_run_records_failure() {
        let tracker = OperationTracker::new("signup");
        let result: Result<(), _> = tracker
            .run(async { Err(ApplicationError::validation("bad input")) })
            .await;
        assert!(result.is_err());
        assert_eq!(
            tracker.state(),
            OperationState::Failed("bad input".to_string())
        );
        assert!(tracker.state().is_settled());

        tracker.reset();
        assert_eq!(tracker.state(), OperationState::Idle);
    }
}
