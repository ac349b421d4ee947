//! # 消息通道能力模块
//!
//! 桥接服务与流处理引擎之间的异步收发通道：
//! - **MqttTransport**：订阅写请求 topic，向遥测 topic 发布
//! - **ChannelTransport**：进程内有界通道（本地联调与测试）
//!
//! 接收为异步等待；发送为非阻塞尝试，通道满或对端不存在时立即失败。
//!
//! ```text
//! 流处理引擎 ──(写请求)──▶ Transport::recv ──▶ 接收循环
//! 流处理引擎 ◀──(遥测)──── Transport::try_send ◀── 发布器
//! ```

mod channel;
mod context;
mod mqtt;

use async_trait::async_trait;
use bytes::Bytes;

pub use channel::ChannelTransport;
pub use context::{BridgeContext, LoopState};
pub use mqtt::{MqttTransport, MqttTransportConfig};

/// 通道错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// 对端已关闭或不存在
    #[error("transport closed")]
    Closed,

    /// 发送缓冲已满
    #[error("transport full")]
    Full,

    /// 接收失败
    #[error("receive error: {0}")]
    Receive(String),

    /// 发送失败
    #[error("send error: {0}")]
    Send(String),
}

/// 收发通道抽象。实现需允许并发的接收与发送。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 等待下一条入站报文。
    async fn recv(&self) -> Result<Bytes, TransportError>;

    /// 非阻塞发送一条出站报文。
    fn try_send(&self, message: Bytes) -> Result<(), TransportError>;
}
