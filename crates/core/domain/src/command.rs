//! 命令总线写命令。

use crate::TagValue;

/// 单点写命令（字符串字段由命令持有）。
#[derive(Debug, Clone, PartialEq)]
pub struct WriteTagCommand {
    pub driver: String,
    pub group: String,
    pub tag: String,
    pub value: TagValue,
}

/// 批量写命令中的一项。
#[derive(Debug, Clone, PartialEq)]
pub struct TagWrite {
    /// 点位名（从请求拷贝，不超过 `TAG_NAME_CAPACITY`）。
    pub tag: String,
    pub value: TagValue,
}

/// 批量写命令。
#[derive(Debug, Clone, PartialEq)]
pub struct WriteTagsCommand {
    pub driver: String,
    pub group: String,
    pub tags: Vec<TagWrite>,
}
