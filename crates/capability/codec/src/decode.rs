use domain::{BatchWriteRequest, DeclaredType, SingleWriteRequest, TagEntry, WriteRequest};
use serde::{Deserialize, Deserializer};

/// 写请求解码错误。
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Malformed(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("request carries both tag_name and tags")]
    Ambiguous,
    #[error("batch request has no tags")]
    EmptyBatch,
}

#[derive(Debug, Deserialize)]
struct WireWriteRequest {
    #[serde(alias = "driver", alias = "node")]
    node_name: Option<String>,
    #[serde(alias = "group")]
    group_name: Option<String>,
    #[serde(alias = "tag")]
    tag_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    value: Option<serde_json::Value>,
    #[serde(rename = "type", alias = "declaredType", alias = "declared_type")]
    declared_type: Option<String>,
    #[serde(alias = "entries")]
    tags: Option<Vec<WireTagEntry>>,
}

#[derive(Debug, Deserialize)]
struct WireTagEntry {
    #[serde(alias = "tag")]
    tag_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    value: Option<serde_json::Value>,
    #[serde(rename = "type", alias = "declaredType", alias = "declared_type")]
    declared_type: Option<String>,
}

/// 解码入站写请求；失败时不返回任何部分结果。
pub fn decode_write_request(payload: &[u8]) -> Result<WriteRequest, DecodeError> {
    let wire: WireWriteRequest =
        serde_json::from_slice(payload).map_err(|err| DecodeError::Malformed(err.to_string()))?;

    let driver = required(wire.node_name, "node_name")?;
    let group = required(wire.group_name, "group_name")?;

    match (wire.tags, wire.tag_name) {
        (Some(_), Some(_)) => Err(DecodeError::Ambiguous),
        (Some(tags), None) => {
            if tags.is_empty() {
                return Err(DecodeError::EmptyBatch);
            }
            let entries = tags
                .into_iter()
                .map(|entry| {
                    let tag = required(entry.tag_name, "tags[].tag_name")?;
                    let value = entry.value.ok_or(DecodeError::MissingField("tags[].value"))?;
                    let declared = declared_type(entry.declared_type.as_deref(), &value);
                    Ok(TagEntry {
                        tag,
                        value,
                        declared,
                    })
                })
                .collect::<Result<Vec<_>, DecodeError>>()?;
            Ok(WriteRequest::Batch(BatchWriteRequest {
                driver,
                group,
                entries,
            }))
        }
        (None, tag_name) => {
            let tag = required(tag_name, "tag_name")?;
            let value = wire.value.ok_or(DecodeError::MissingField("value"))?;
            let declared = declared_type(wire.declared_type.as_deref(), &value);
            Ok(WriteRequest::Single(SingleWriteRequest {
                driver,
                group,
                tag,
                value,
                declared,
            }))
        }
    }
}

/// 字段存在即为 Some（含显式 null）；缺失时由 `default` 给出 None。
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DecodeError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DecodeError::MissingField(field)),
    }
}

fn declared_type(name: Option<&str>, value: &serde_json::Value) -> DeclaredType {
    match name {
        Some(name) => DeclaredType::from_name(name),
        None => DeclaredType::infer(value),
    }
}
