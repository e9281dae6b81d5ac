//! API 路由模块
//!
//! # 结构
//!
//! - [`extract`] - 请求提取器 (解析失败返回 ApiResponse)
//! - [`health`] - 健康检查
//! - [`tables`] - 派对桌台管理接口
//! - [`guests`] - 宾客名单接口

pub mod extract;
pub mod guests;
pub mod health;
pub mod tables;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::utils::ErrorCode;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(guests::router())
}

/// Build the complete application with state and middleware
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::map_response(timeout_response))
        .layer(TraceLayer::new_for_http())
}

/// 超时层返回的空 408 换成统一的 ApiResponse
async fn timeout_response(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::new(ErrorCode::TimeoutError).into_response();
    }
    response
}
