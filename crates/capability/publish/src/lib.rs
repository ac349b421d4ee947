//! 出站遥测发布。
//!
//! 编码后以精确长度（无结尾空字节）的报文非阻塞发送；失败即丢弃，不重试，不等待。
//! 与接收循环互不依赖，可在任意任务中并发调用。

use bridge_codec::{EncodeError, EventEncoder, JsonEventEncoder};
use bridge_telemetry::{MetricsSink, record_send_error, record_sent};
use bridge_transport::{BridgeContext, Transport, TransportError};
use bytes::Bytes;
use domain::TelemetryEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// 发布错误。
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("send failed: {0}")]
    SendFailed(TransportError),
}

/// 出站发布器。
#[derive(Clone)]
pub struct OutboundPublisher {
    transport: Arc<dyn Transport>,
    metrics: Arc<dyn MetricsSink>,
    encoder: Arc<dyn EventEncoder>,
}

impl OutboundPublisher {
    pub fn new(ctx: &BridgeContext) -> Self {
        Self {
            transport: ctx.transport().clone(),
            metrics: ctx.metrics().clone(),
            encoder: Arc::new(JsonEventEncoder),
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn EventEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn publish(&self, event: &TelemetryEvent) -> Result<(), PublishError> {
        let payload = match self.encoder.encode(event) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    target: "bridge.publish",
                    driver = %event.driver,
                    group = %event.group,
                    error = %err,
                    "encode_telemetry_failed"
                );
                return Err(PublishError::Encode(err));
            }
        };

        let message = Bytes::copy_from_slice(&payload);
        let size = message.len() as u64;
        match self.transport.try_send(message) {
            Ok(()) => {
                record_sent(self.metrics.as_ref(), size);
                debug!(target: "bridge.publish", ">> {}", String::from_utf8_lossy(&payload));
                Ok(())
            }
            Err(err) => {
                record_send_error(self.metrics.as_ref());
                warn!(
                    target: "bridge.publish",
                    driver = %event.driver,
                    group = %event.group,
                    error = %err,
                    "send_telemetry_failed"
                );
                Err(PublishError::SendFailed(err))
            }
        }
    }

    /// 持续发布事件直到发送端全部关闭。单条失败只记录，不影响后续事件。
    pub fn spawn_drain(
        self,
        mut events: UnboundedReceiver<TelemetryEvent>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let _ = self.publish(&event);
            }
            info!(target: "bridge.publish", "telemetry_drain_finished");
        })
    }
}
