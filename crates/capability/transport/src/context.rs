use crate::Transport;
use bridge_telemetry::MetricsSink;
use std::sync::{Arc, Mutex, PoisonError};

/// 接收循环状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    ReceivePending,
    Processing,
    Stopped,
}

/// 桥接共享上下文：通道句柄、接收状态锁、指标写入端。
///
/// 接收循环写状态，关闭/状态查询逻辑读状态；发布路径只使用通道与指标。
#[derive(Clone)]
pub struct BridgeContext {
    transport: Arc<dyn Transport>,
    metrics: Arc<dyn MetricsSink>,
    state: Arc<Mutex<LoopState>>,
}

impl BridgeContext {
    pub fn new(transport: Arc<dyn Transport>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            transport,
            metrics,
            state: Arc::new(Mutex::new(LoopState::Idle)),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn metrics(&self) -> &Arc<dyn MetricsSink> {
        &self.metrics
    }

    pub fn state(&self) -> LoopState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 接收循环是否仍在运行。
    pub fn is_receiving(&self) -> bool {
        matches!(
            self.state(),
            LoopState::ReceivePending | LoopState::Processing
        )
    }

    /// Idle/Stopped → ReceivePending；已在接收时返回 false。
    pub fn begin_receiving(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            LoopState::Idle | LoopState::Stopped => {
                *state = LoopState::ReceivePending;
                true
            }
            LoopState::ReceivePending | LoopState::Processing => false,
        }
    }

    pub fn set_state(&self, next: LoopState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
