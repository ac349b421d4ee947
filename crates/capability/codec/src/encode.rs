use domain::{Reading, TagValue, TelemetryEvent};
use serde::Serialize;

/// 遥测编码错误。
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// 遥测事件编码器抽象。
pub trait EventEncoder: Send + Sync {
    fn encode(&self, event: &TelemetryEvent) -> Result<Vec<u8>, EncodeError>;
}

/// JSON 遥测编码器。
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEventEncoder;

impl EventEncoder for JsonEventEncoder {
    fn encode(&self, event: &TelemetryEvent) -> Result<Vec<u8>, EncodeError> {
        encode_telemetry(event)
    }
}

#[derive(Debug, Serialize)]
struct WireTelemetry<'a> {
    node_name: &'a str,
    group_name: &'a str,
    timestamp: i64,
    values: serde_json::Map<String, serde_json::Value>,
    errors: serde_json::Map<String, serde_json::Value>,
}

/// 将遥测事件编码为 JSON 字节（不含结尾空字节）。
pub fn encode_telemetry(event: &TelemetryEvent) -> Result<Vec<u8>, EncodeError> {
    let mut values = serde_json::Map::new();
    let mut errors = serde_json::Map::new();
    for reading in &event.readings {
        match &reading.reading {
            Reading::Value(value) => {
                values.insert(reading.tag.clone(), tag_value_to_json(value));
            }
            Reading::Error(code) => {
                errors.insert(reading.tag.clone(), serde_json::Value::from(*code));
            }
        }
    }
    let wire = WireTelemetry {
        node_name: &event.driver,
        group_name: &event.group,
        timestamp: event.timestamp_ms,
        values,
        errors,
    };
    serde_json::to_vec(&wire).map_err(|err| EncodeError::Serialize(err.to_string()))
}

fn tag_value_to_json(value: &TagValue) -> serde_json::Value {
    match value {
        TagValue::Int64(v) => serde_json::Value::from(*v),
        // 非有限浮点数在 JSON 中没有表示，按 null 输出。
        TagValue::Double(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        TagValue::Bool(v) => serde_json::Value::Bool(*v),
        TagValue::String(v) => serde_json::Value::String(v.as_str().to_string()),
        TagValue::Bytes(v) => serde_json::Value::Array(
            v.as_slice()
                .iter()
                .map(|byte| serde_json::Value::from(*byte))
                .collect(),
        ),
    }
}
