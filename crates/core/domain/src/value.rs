//! 强类型点位值与定长缓冲。

use crate::VALUE_CAPACITY;

/// 按字节上限截断字符串，截断点回退到最近的字符边界。
pub fn bounded_str(value: &str, capacity: usize) -> &str {
    if value.len() <= capacity {
        return value;
    }
    let mut end = capacity;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// 定长字符串缓冲（最多 `VALUE_CAPACITY` 字节）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedString(String);

impl BoundedString {
    /// 拷贝并在超出容量时截断。
    pub fn truncated(value: &str) -> Self {
        Self(bounded_str(value, VALUE_CAPACITY).to_string())
    }

    /// 拷贝；超出容量返回 None。
    pub fn try_new(value: &str) -> Option<Self> {
        if value.len() > VALUE_CAPACITY {
            return None;
        }
        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 定长字节缓冲（最多 `VALUE_CAPACITY` 字节）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedBytes(Vec<u8>);

impl BoundedBytes {
    /// 拷贝并在超出容量时截断。
    pub fn truncated(value: &[u8]) -> Self {
        let end = value.len().min(VALUE_CAPACITY);
        Self(value[..end].to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 写入命令总线的点位值。
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Int64(i64),
    Double(f64),
    Bool(bool),
    String(BoundedString),
    Bytes(BoundedBytes),
}

impl TagValue {
    /// 值类型名（日志用）。
    pub fn kind(&self) -> &'static str {
        match self {
            TagValue::Int64(_) => "int",
            TagValue::Double(_) => "double",
            TagValue::Bool(_) => "bool",
            TagValue::String(_) => "string",
            TagValue::Bytes(_) => "bytes",
        }
    }
}
