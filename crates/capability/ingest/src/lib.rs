//! 入站接收循环。
//!
//! 状态：`Idle → ReceivePending → Processing → ReceivePending → … | Stopped`。
//! 同一时刻最多只有一个未完成的接收；上一条报文的解码、分发与释放全部完成后才发起下一次接收。
//! 解码失败、写命令失败均只影响当前报文；通道接收失败则终止循环，由外部负责重启。

use bridge_codec::decode_write_request;
use bridge_control::WriteDispatcher;
use bridge_telemetry::{record_receive_error, record_received};
use bridge_transport::{BridgeContext, LoopState, TransportError};
use bytes::Bytes;
use tracing::{Instrument, debug, error, info, warn};

/// 接收循环错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("receive loop already running")]
    AlreadyReceiving,
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// 入站接收循环。
pub struct InboundReceiveLoop {
    ctx: BridgeContext,
    dispatcher: WriteDispatcher,
}

impl InboundReceiveLoop {
    pub fn new(ctx: BridgeContext, dispatcher: WriteDispatcher) -> Self {
        Self { ctx, dispatcher }
    }

    /// 在后台任务中运行。
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<(), IngestError>> {
        tokio::spawn(self.run())
    }

    /// 运行直到通道接收失败。
    pub async fn run(self) -> Result<(), IngestError> {
        if !self.ctx.begin_receiving() {
            return Err(IngestError::AlreadyReceiving);
        }
        let _stopped = StopOnExit(&self.ctx);
        info!(target: "bridge.ingest", "receive_loop_started");

        loop {
            let message = match self.ctx.transport().recv().await {
                Ok(message) => message,
                Err(err) => {
                    record_receive_error(self.ctx.metrics().as_ref());
                    error!(target: "bridge.ingest", error = %err, "receive_failed");
                    return Err(IngestError::Transport(err));
                }
            };
            self.ctx.set_state(LoopState::Processing);
            self.handle_message(message).await;
            self.ctx.set_state(LoopState::ReceivePending);
        }
    }

    async fn handle_message(&self, message: Bytes) {
        record_received(self.ctx.metrics().as_ref(), message.len() as u64);
        debug!(target: "bridge.ingest", "<< {}", String::from_utf8_lossy(&message));

        let mut request = match decode_write_request(&message) {
            Ok(request) => request,
            Err(err) => {
                record_receive_error(self.ctx.metrics().as_ref());
                warn!(
                    target: "bridge.ingest",
                    error = %err,
                    payload = %String::from_utf8_lossy(&message),
                    "decode_write_request_failed"
                );
                return;
            }
        };

        let span = tracing::info_span!(
            "write_request",
            driver = %request.driver(),
            group = %request.group(),
            tag_count = request.tag_count()
        );
        match self.dispatcher.dispatch(&mut request).instrument(span).await {
            Ok(()) => debug!(target: "bridge.ingest", "write_request_dispatched"),
            Err(err) => warn!(target: "bridge.ingest", error = %err, "write_request_failed"),
        }
    }
}

/// 循环退出（含任务被中止）时把状态置为 Stopped。
struct StopOnExit<'a>(&'a BridgeContext);

impl Drop for StopOnExit<'_> {
    fn drop(&mut self) {
        self.0.set_state(LoopState::Stopped);
    }
}
