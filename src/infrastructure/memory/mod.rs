//! Memory Layer - In-Memory State Management
//!
//! 不落盘的登录态存储

mod session_store;

pub use session_store::InMemorySessionStore;
