use crate::TagValue;

/// 单个点位的读数：值或错误码。
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Value(TagValue),
    Error(i64),
}

/// 点位读数。
#[derive(Debug, Clone, PartialEq)]
pub struct TagReading {
    pub tag: String,
    pub reading: Reading,
}

/// 命令总线产生的遥测事件（某个 driver/group 的当前点位值）。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryEvent {
    pub driver: String,
    pub group: String,
    pub timestamp_ms: i64,
    pub readings: Vec<TagReading>,
}

impl TelemetryEvent {
    pub fn new(driver: impl Into<String>, group: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            driver: driver.into(),
            group: group.into(),
            timestamp_ms,
            readings: Vec::new(),
        }
    }

    pub fn with_value(mut self, tag: impl Into<String>, value: TagValue) -> Self {
        self.readings.push(TagReading {
            tag: tag.into(),
            reading: Reading::Value(value),
        });
        self
    }

    pub fn with_error(mut self, tag: impl Into<String>, code: i64) -> Self {
        self.readings.push(TagReading {
            tag: tag.into(),
            reading: Reading::Error(code),
        });
        self
    }
}
