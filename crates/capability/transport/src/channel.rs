use crate::{Transport, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::{Mutex, mpsc};

/// 进程内通道（成对创建，一端发出的报文由另一端接收）。
pub struct ChannelTransport {
    inbound: Mutex<mpsc::Receiver<Bytes>>,
    outbound: mpsc::Sender<Bytes>,
}

impl ChannelTransport {
    /// 创建一对相连的通道端点，每个方向缓冲 `capacity` 条报文。
    pub fn pair(capacity: usize) -> (Self, Self) {
        let capacity = capacity.max(1);
        let (left_tx, right_rx) = mpsc::channel(capacity);
        let (right_tx, left_rx) = mpsc::channel(capacity);
        (
            Self {
                inbound: Mutex::new(left_rx),
                outbound: left_tx,
            },
            Self {
                inbound: Mutex::new(right_rx),
                outbound: right_tx,
            },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn recv(&self) -> Result<Bytes, TransportError> {
        let mut inbound = self.inbound.lock().await;
        inbound.recv().await.ok_or(TransportError::Closed)
    }

    fn try_send(&self, message: Bytes) -> Result<(), TransportError> {
        self.outbound.try_send(message).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => TransportError::Full,
            mpsc::error::TrySendError::Closed(_) => TransportError::Closed,
        })
    }
}
