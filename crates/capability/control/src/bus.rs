//! 命令总线抽象与内存实现。

use async_trait::async_trait;
use domain::{TagValue, TelemetryEvent, WriteTagCommand, WriteTagsCommand};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// 命令总线调用错误。
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("driver not found: {0}")]
    DriverNotFound(String),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("bus unavailable: {0}")]
    Unavailable(String),
}

/// 平台内部命令总线。
///
/// 命令按值传入：调用返回后（无论成败）命令中的字符串由总线负责释放。
#[async_trait]
pub trait CommandBus: Send + Sync {
    async fn write_tag(&self, command: WriteTagCommand) -> Result<(), BusError>;
    async fn write_tags(&self, command: WriteTagsCommand) -> Result<(), BusError>;
}

type GroupKey = (String, String);

/// 内存命令总线（本地回环与测试用）。
///
/// 保存每个 driver/group 的最新点位值，写入后可选地把该组当前值作为遥测事件发出。
pub struct InMemoryCommandBus {
    drivers: Option<HashSet<String>>,
    values: RwLock<HashMap<GroupKey, BTreeMap<String, TagValue>>>,
    telemetry: Option<UnboundedSender<TelemetryEvent>>,
}

impl InMemoryCommandBus {
    /// 接受任意 driver 的写入。
    pub fn new() -> Self {
        Self {
            drivers: None,
            values: RwLock::new(HashMap::new()),
            telemetry: None,
        }
    }

    /// 仅接受已登记 driver 的写入。
    pub fn with_drivers<I, S>(drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drivers: Some(drivers.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// 写入成功后向 `sender` 发出遥测事件。
    pub fn with_telemetry(mut self, sender: UnboundedSender<TelemetryEvent>) -> Self {
        self.telemetry = Some(sender);
        self
    }

    /// 读取点位最新值。
    pub fn value(&self, driver: &str, group: &str, tag: &str) -> Option<TagValue> {
        let values = self.values.read().ok()?;
        values
            .get(&(driver.to_string(), group.to_string()))
            .and_then(|tags| tags.get(tag))
            .cloned()
    }

    fn ensure_driver(&self, driver: &str) -> Result<(), BusError> {
        match &self.drivers {
            Some(drivers) if !drivers.contains(driver) => {
                Err(BusError::DriverNotFound(driver.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn apply(
        &self,
        driver: String,
        group: String,
        writes: impl IntoIterator<Item = (String, TagValue)>,
    ) -> Result<(), BusError> {
        let event = {
            let mut values = self
                .values
                .write()
                .map_err(|_| BusError::Unavailable("lock failed".to_string()))?;
            let tags = values.entry((driver.clone(), group.clone())).or_default();
            for (tag, value) in writes {
                tags.insert(tag, value);
            }
            tags.iter().fold(
                TelemetryEvent::new(driver, group, now_epoch_ms()),
                |event, (tag, value)| event.with_value(tag.clone(), value.clone()),
            )
        };
        if let Some(sender) = &self.telemetry {
            if sender.send(event).is_err() {
                debug!(target: "bridge.control", "telemetry receiver dropped");
            }
        }
        Ok(())
    }
}

impl Default for InMemoryCommandBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn write_tag(&self, command: WriteTagCommand) -> Result<(), BusError> {
        self.ensure_driver(&command.driver)?;
        self.apply(
            command.driver,
            command.group,
            [(command.tag, command.value)],
        )
    }

    async fn write_tags(&self, command: WriteTagsCommand) -> Result<(), BusError> {
        self.ensure_driver(&command.driver)?;
        self.apply(
            command.driver,
            command.group,
            command.tags.into_iter().map(|write| (write.tag, write.value)),
        )
    }
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
