//! 写命令分发。
//!
//! 单点写：转换失败不触达命令总线；转换成功后 driver/group/tag 移入命令，请求中对应字段置空。
//!
//! 批量写（全有或全无）：
//! 1. 校验：任一字符串值长度 ≥ 缓冲容量即整体拒绝，此时尚未分配任何命令；
//! 2. 转换：逐项转换，首个失败即丢弃已构建的部分结果；
//! 3. 分发：driver/group 移入命令后一次性提交给命令总线。

use crate::bus::{BusError, CommandBus};
use crate::convert::{ConvertError, convert};
use domain::{
    BatchWriteRequest, DeclaredType, SingleWriteRequest, TAG_NAME_CAPACITY, TagWrite,
    VALUE_CAPACITY, WriteRequest, WriteTagCommand, WriteTagsCommand, bounded_str,
};
use std::mem;
use std::sync::Arc;
use tracing::{debug, warn};

/// 写命令分发错误。
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("invalid value type for tag {tag}: {source}")]
    InvalidValueType {
        tag: String,
        #[source]
        source: ConvertError,
    },
    #[error("value too large for tag {tag}: {len} bytes")]
    ValueTooLarge { tag: String, len: usize },
    #[error("dispatch failed: {0}")]
    DispatchFailed(#[from] BusError),
}

/// 写请求 → 命令总线调用。
#[derive(Clone)]
pub struct WriteDispatcher {
    bus: Arc<dyn CommandBus>,
}

impl WriteDispatcher {
    pub fn new(bus: Arc<dyn CommandBus>) -> Self {
        Self { bus }
    }

    /// 按请求类型分发。
    pub async fn dispatch(&self, request: &mut WriteRequest) -> Result<(), WriteError> {
        match request {
            WriteRequest::Single(req) => self.single_write(req).await,
            WriteRequest::Batch(req) => self.batch_write(req).await,
        }
    }

    pub async fn single_write(&self, req: &mut SingleWriteRequest) -> Result<(), WriteError> {
        let value = convert(&req.value, &req.declared).map_err(|source| {
            warn!(
                target: "bridge.control",
                tag = %req.tag,
                declared = %req.declared.name(),
                error = %source,
                "invalid_tag_value_type"
            );
            WriteError::InvalidValueType {
                tag: req.tag.clone(),
                source,
            }
        })?;

        let command = WriteTagCommand {
            driver: mem::take(&mut req.driver),
            group: mem::take(&mut req.group),
            tag: mem::take(&mut req.tag),
            value,
        };
        debug!(
            target: "bridge.control",
            driver = %command.driver,
            group = %command.group,
            tag = %command.tag,
            value_type = command.value.kind(),
            "write_tag_dispatch"
        );
        self.bus.write_tag(command).await.map_err(|err| {
            warn!(target: "bridge.control", error = %err, "write_tag_failed");
            WriteError::DispatchFailed(err)
        })
    }

    pub async fn batch_write(&self, req: &mut BatchWriteRequest) -> Result<(), WriteError> {
        validate_batch(req)?;

        let mut tags = Vec::with_capacity(req.entries.len());
        for entry in &req.entries {
            let value = convert(&entry.value, &entry.declared).map_err(|source| {
                warn!(
                    target: "bridge.control",
                    tag = %entry.tag,
                    declared = %entry.declared.name(),
                    error = %source,
                    "invalid_tag_value_type"
                );
                WriteError::InvalidValueType {
                    tag: entry.tag.clone(),
                    source,
                }
            })?;
            tags.push(TagWrite {
                tag: bounded_str(&entry.tag, TAG_NAME_CAPACITY).to_string(),
                value,
            });
        }

        let command = WriteTagsCommand {
            driver: mem::take(&mut req.driver),
            group: mem::take(&mut req.group),
            tags,
        };
        debug!(
            target: "bridge.control",
            driver = %command.driver,
            group = %command.group,
            tag_count = command.tags.len(),
            "write_tags_dispatch"
        );
        self.bus.write_tags(command).await.map_err(|err| {
            warn!(target: "bridge.control", error = %err, "write_tags_failed");
            WriteError::DispatchFailed(err)
        })
    }
}

/// 批量写前置校验：不分配命令，不调用总线。
fn validate_batch(req: &BatchWriteRequest) -> Result<(), WriteError> {
    for entry in &req.entries {
        let oversized = match entry.declared {
            DeclaredType::String => entry
                .value
                .as_str()
                .map(str::len)
                .filter(|len| *len >= VALUE_CAPACITY),
            DeclaredType::Bytes => entry
                .value
                .as_array()
                .map(Vec::len)
                .filter(|len| *len > VALUE_CAPACITY),
            _ => None,
        };
        if let Some(len) = oversized {
            warn!(
                target: "bridge.control",
                tag = %entry.tag,
                len = len,
                capacity = VALUE_CAPACITY,
                "batch_value_too_large"
            );
            return Err(WriteError::ValueTooLarge {
                tag: entry.tag.clone(),
                len,
            });
        }
    }
    Ok(())
}
