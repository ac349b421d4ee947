//! 路由定义
//!
//! - 健康检查：/health
//! - 运行状态：/status
//! - 未匹配路径：统一 404 错误体

use crate::AppState;
use crate::handlers::{get_status, health, not_found};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// 创建状态接口路由（带请求级追踪）。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(get_status))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
