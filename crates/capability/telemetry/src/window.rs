//! 按秒分桶的滚动计数窗口。

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct WindowState {
    origin: Option<Instant>,
    buckets: VecDeque<(u64, u64)>,
}

/// 统计最近 `span` 内累加值的计数器。
pub struct RollingCounter {
    span_secs: u64,
    state: Mutex<WindowState>,
}

impl RollingCounter {
    pub fn new(span: Duration) -> Self {
        Self {
            span_secs: span.as_secs().max(1),
            state: Mutex::new(WindowState {
                origin: None,
                buckets: VecDeque::new(),
            }),
        }
    }

    pub fn span(&self) -> Duration {
        Duration::from_secs(self.span_secs)
    }

    pub fn add(&self, value: u64) {
        self.add_at(Instant::now(), value);
    }

    pub fn add_at(&self, now: Instant, value: u64) {
        if value == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let origin = *state.origin.get_or_insert(now);
        let second = now.saturating_duration_since(origin).as_secs();
        // 并发写入时时间戳可能晚到，按秒有序插入
        let index = state.buckets.partition_point(|(bucket, _)| *bucket < second);
        match state.buckets.get_mut(index) {
            Some((bucket, sum)) if *bucket == second => *sum = sum.saturating_add(value),
            _ => state.buckets.insert(index, (second, value)),
        }
        let latest = state.buckets.back().map_or(second, |(bucket, _)| *bucket);
        prune(&mut state.buckets, latest, self.span_secs);
    }

    pub fn sum(&self) -> u64 {
        self.sum_at(Instant::now())
    }

    pub fn sum_at(&self, now: Instant) -> u64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(origin) = state.origin else {
            return 0;
        };
        let second = now.saturating_duration_since(origin).as_secs();
        prune(&mut state.buckets, second, self.span_secs);
        state.buckets.iter().map(|(_, sum)| *sum).sum()
    }
}

/// 丢弃早于 (second - span, second] 的桶（桶按秒升序）。
fn prune(buckets: &mut VecDeque<(u64, u64)>, second: u64, span_secs: u64) {
    buckets.retain(|(bucket, _)| bucket + span_secs > second);
}
