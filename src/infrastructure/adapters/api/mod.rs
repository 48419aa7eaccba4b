//! Crowdfunding API Adapter
//!
//! - http_api_client: reqwest 实现
//! - dto: 后端 JSON 结构与边界默认值
//! - response_error: 非 2xx 响应的错误文案

mod dto;
mod http_api_client;
mod response_error;

pub use http_api_client::{HttpApiClient, HttpApiClientConfig, PROJECTS_UNAVAILABLE};
