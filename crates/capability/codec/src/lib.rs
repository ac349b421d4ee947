//! 报文编解码。
//!
//! - 入站：JSON 写请求 → `WriteRequest`（单点/批量）
//! - 出站：`TelemetryEvent` → JSON 遥测报文
//!
//! ```json
//! // 单点
//! { "node_name": "D1", "group_name": "G1", "tag_name": "T1", "value": 42, "type": "int" }
//! // 批量
//! { "node_name": "D1", "group_name": "G1", "tags": [{ "tag_name": "T1", "value": 1.5 }] }
//! // 遥测
//! { "node_name": "D1", "group_name": "G1", "timestamp": 1700000000000,
//!   "values": { "T1": 42 }, "errors": { "T2": 3002 } }
//! ```

mod decode;
mod encode;

pub use decode::{DecodeError, decode_write_request};
pub use encode::{EncodeError, EventEncoder, JsonEventEncoder, encode_telemetry};
