//! 状态接口。
//!
//! - GET /health
//! - GET /status
//! - 其他路径：404，统一 ApiResponse 错误体

use crate::AppState;
use api_contract::{ApiResponse, BridgeStatusDto, MetricsSnapshotDto};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bridge_telemetry::MetricsSnapshot;
use bridge_transport::LoopState;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn get_status(State(state): State<AppState>) -> Response {
    let status = BridgeStatusDto {
        loop_state: loop_state_name(state.ctx.state()).to_string(),
        receiving: state.ctx.is_receiving(),
        metrics: metrics_to_dto(state.metrics.snapshot()),
    };
    (StatusCode::OK, Json(ApiResponse::success(status))).into_response()
}

/// 资源未找到错误响应
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

fn loop_state_name(state: LoopState) -> &'static str {
    match state {
        LoopState::Idle => "idle",
        LoopState::ReceivePending => "receive_pending",
        LoopState::Processing => "processing",
        LoopState::Stopped => "stopped",
    }
}

/// MetricsSnapshot 转 MetricsSnapshotDto
fn metrics_to_dto(snapshot: MetricsSnapshot) -> MetricsSnapshotDto {
    MetricsSnapshotDto {
        recv_msgs_total: snapshot.recv_msgs_total,
        recv_bytes_total: snapshot.recv_bytes_total,
        recv_msg_errors_total: snapshot.recv_msg_errors_total,
        recv_msgs_5s: snapshot.recv_msgs_5s,
        recv_msgs_30s: snapshot.recv_msgs_30s,
        recv_msgs_60s: snapshot.recv_msgs_60s,
        recv_bytes_5s: snapshot.recv_bytes_5s,
        recv_bytes_30s: snapshot.recv_bytes_30s,
        recv_bytes_60s: snapshot.recv_bytes_60s,
        send_msgs_total: snapshot.send_msgs_total,
        send_bytes_total: snapshot.send_bytes_total,
        send_msg_errors_total: snapshot.send_msg_errors_total,
        send_bytes_5s: snapshot.send_bytes_5s,
        send_bytes_30s: snapshot.send_bytes_30s,
        send_bytes_60s: snapshot.send_bytes_60s,
    }
}
