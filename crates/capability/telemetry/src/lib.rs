//! 日志初始化与收发指标。
//!
//! 指标通过 `MetricsSink` 写入，不再使用进程级全局实例：
//! 接收循环与发布器都从显式上下文拿到同一个 sink。

mod window;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt};

pub use window::RollingCounter;

/// 指标项。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    RecvMsgsTotal,
    RecvBytesTotal,
    RecvMsgErrorsTotal,
    RecvMsgs5s,
    RecvMsgs30s,
    RecvMsgs60s,
    RecvBytes5s,
    RecvBytes30s,
    RecvBytes60s,
    SendMsgsTotal,
    SendBytesTotal,
    SendMsgErrorsTotal,
    SendBytes5s,
    SendBytes30s,
    SendBytes60s,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::RecvMsgsTotal => "recv_msgs_total",
            Metric::RecvBytesTotal => "recv_bytes_total",
            Metric::RecvMsgErrorsTotal => "recv_msg_errors_total",
            Metric::RecvMsgs5s => "recv_msgs_5s",
            Metric::RecvMsgs30s => "recv_msgs_30s",
            Metric::RecvMsgs60s => "recv_msgs_60s",
            Metric::RecvBytes5s => "recv_bytes_5s",
            Metric::RecvBytes30s => "recv_bytes_30s",
            Metric::RecvBytes60s => "recv_bytes_60s",
            Metric::SendMsgsTotal => "send_msgs_total",
            Metric::SendBytesTotal => "send_bytes_total",
            Metric::SendMsgErrorsTotal => "send_msg_errors_total",
            Metric::SendBytes5s => "send_bytes_5s",
            Metric::SendBytes30s => "send_bytes_30s",
            Metric::SendBytes60s => "send_bytes_60s",
        }
    }

    /// 滚动窗口长度；累计计数器返回 None。
    pub fn window(self) -> Option<Duration> {
        match self {
            Metric::RecvMsgs5s | Metric::RecvBytes5s | Metric::SendBytes5s => {
                Some(Duration::from_secs(5))
            }
            Metric::RecvMsgs30s | Metric::RecvBytes30s | Metric::SendBytes30s => {
                Some(Duration::from_secs(30))
            }
            Metric::RecvMsgs60s | Metric::RecvBytes60s | Metric::SendBytes60s => {
                Some(Duration::from_secs(60))
            }
            _ => None,
        }
    }
}

/// 指标写入端（只写）。
pub trait MetricsSink: Send + Sync {
    fn update(&self, metric: Metric, value: u64);
}

/// 丢弃所有指标（用于占位）。
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn update(&self, _metric: Metric, _value: u64) {}
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
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

/// 桥接收发指标（累计计数器 + 滚动窗口）。
pub struct BridgeMetrics {
    recv_msgs_total: AtomicU64,
    recv_bytes_total: AtomicU64,
    recv_msg_errors_total: AtomicU64,
    recv_msgs_5s: RollingCounter,
    recv_msgs_30s: RollingCounter,
    recv_msgs_60s: RollingCounter,
    recv_bytes_5s: RollingCounter,
    recv_bytes_30s: RollingCounter,
    recv_bytes_60s: RollingCounter,
    send_msgs_total: AtomicU64,
    send_bytes_total: AtomicU64,
    send_msg_errors_total: AtomicU64,
    send_bytes_5s: RollingCounter,
    send_bytes_30s: RollingCounter,
    send_bytes_60s: RollingCounter,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        let window = |secs| RollingCounter::new(Duration::from_secs(secs));
        Self {
            recv_msgs_total: AtomicU64::new(0),
            recv_bytes_total: AtomicU64::new(0),
            recv_msg_errors_total: AtomicU64::new(0),
            recv_msgs_5s: window(5),
            recv_msgs_30s: window(30),
            recv_msgs_60s: window(60),
            recv_bytes_5s: window(5),
            recv_bytes_30s: window(30),
            recv_bytes_60s: window(60),
            send_msgs_total: AtomicU64::new(0),
            send_bytes_total: AtomicU64::new(0),
            send_msg_errors_total: AtomicU64::new(0),
            send_bytes_5s: window(5),
            send_bytes_30s: window(30),
            send_bytes_60s: window(60),
        }
    }

    /// 按指定时刻记录（测试可控制时间）。
    pub fn update_at(&self, metric: Metric, value: u64, now: Instant) {
        match metric {
            Metric::RecvMsgsTotal => add(&self.recv_msgs_total, value),
            Metric::RecvBytesTotal => add(&self.recv_bytes_total, value),
            Metric::RecvMsgErrorsTotal => add(&self.recv_msg_errors_total, value),
            Metric::RecvMsgs5s => self.recv_msgs_5s.add_at(now, value),
            Metric::RecvMsgs30s => self.recv_msgs_30s.add_at(now, value),
            Metric::RecvMsgs60s => self.recv_msgs_60s.add_at(now, value),
            Metric::RecvBytes5s => self.recv_bytes_5s.add_at(now, value),
            Metric::RecvBytes30s => self.recv_bytes_30s.add_at(now, value),
            Metric::RecvBytes60s => self.recv_bytes_60s.add_at(now, value),
            Metric::SendMsgsTotal => add(&self.send_msgs_total, value),
            Metric::SendBytesTotal => add(&self.send_bytes_total, value),
            Metric::SendMsgErrorsTotal => add(&self.send_msg_errors_total, value),
            Metric::SendBytes5s => self.send_bytes_5s.add_at(now, value),
            Metric::SendBytes30s => self.send_bytes_30s.add_at(now, value),
            Metric::SendBytes60s => self.send_bytes_60s.add_at(now, value),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> MetricsSnapshot {
        MetricsSnapshot {
            recv_msgs_total: self.recv_msgs_total.load(Ordering::Relaxed),
            recv_bytes_total: self.recv_bytes_total.load(Ordering::Relaxed),
            recv_msg_errors_total: self.recv_msg_errors_total.load(Ordering::Relaxed),
            recv_msgs_5s: self.recv_msgs_5s.sum_at(now),
            recv_msgs_30s: self.recv_msgs_30s.sum_at(now),
            recv_msgs_60s: self.recv_msgs_60s.sum_at(now),
            recv_bytes_5s: self.recv_bytes_5s.sum_at(now),
            recv_bytes_30s: self.recv_bytes_30s.sum_at(now),
            recv_bytes_60s: self.recv_bytes_60s.sum_at(now),
            send_msgs_total: self.send_msgs_total.load(Ordering::Relaxed),
            send_bytes_total: self.send_bytes_total.load(Ordering::Relaxed),
            send_msg_errors_total: self.send_msg_errors_total.load(Ordering::Relaxed),
            send_bytes_5s: self.send_bytes_5s.sum_at(now),
            send_bytes_30s: self.send_bytes_30s.sum_at(now),
            send_bytes_60s: self.send_bytes_60s.sum_at(now),
        }
    }
}

impl Default for BridgeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for BridgeMetrics {
    fn update(&self, metric: Metric, value: u64) {
        self.update_at(metric, value, Instant::now());
    }
}

fn add(counter: &AtomicU64, value: u64) {
    counter.fetch_add(value, Ordering::Relaxed);
}

/// 记录一条入站报文（条数与字节数，含滚动窗口）。
pub fn record_received(sink: &dyn MetricsSink, bytes: u64) {
    sink.update(Metric::RecvMsgsTotal, 1);
    sink.update(Metric::RecvBytesTotal, bytes);
    sink.update(Metric::RecvBytes5s, bytes);
    sink.update(Metric::RecvBytes30s, bytes);
    sink.update(Metric::RecvBytes60s, bytes);
    sink.update(Metric::RecvMsgs5s, 1);
    sink.update(Metric::RecvMsgs30s, 1);
    sink.update(Metric::RecvMsgs60s, 1);
}

/// 记录一条成功发出的报文。
pub fn record_sent(sink: &dyn MetricsSink, bytes: u64) {
    sink.update(Metric::SendMsgsTotal, 1);
    sink.update(Metric::SendBytesTotal, bytes);
    sink.update(Metric::SendBytes5s, bytes);
    sink.update(Metric::SendBytes30s, bytes);
    sink.update(Metric::SendBytes60s, bytes);
}

/// 记录入站错误（解码失败或通道接收失败）。
pub fn record_receive_error(sink: &dyn MetricsSink) {
    sink.update(Metric::RecvMsgErrorsTotal, 1);
}

/// 记录发送失败。
pub fn record_send_error(sink: &dyn MetricsSink) {
    sink.update(Metric::SendMsgErrorsTotal, 1);
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
