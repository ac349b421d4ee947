//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 桥接运行状态。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeStatusDto {
    /// idle / receive_pending / processing / stopped
    pub loop_state: String,
    pub receiving: bool,
    pub metrics: MetricsSnapshotDto,
}

/// 收发指标快照（字段名与指标名一致）。
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshotDto {
    pub recv_msgs_total: u64,
    pub recv_bytes_total: u64,
    pub recv_msg_errors_total: u64,
    pub recv_msgs_5s: u64,
    pub recv_msgs_30s: u64,
    pub recv_msgs_60s: u64,
    pub recv_bytes_5s: u64,
    pub recv_bytes_30s: u64,
    pub recv_bytes_60s: u64,
    pub send_msgs_total: u64,
    pub send_bytes_total: u64,
    pub send_msg_errors_total: u64,
    pub send_bytes_5s: u64,
    pub send_bytes_30s: u64,
    pub send_bytes_60s: u64,
}
