//! 动态类型值 → 强类型点位值。

use domain::{BoundedBytes, BoundedString, DeclaredType, TagValue};

/// 值转换错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),
    #[error("value does not match declared type {declared}")]
    Mismatch { declared: &'static str },
}

/// 按声明类型转换解码值。
///
/// - int：保留源字面量的 64 位原始位模式（超出 i64 的无符号数按位转换）
/// - double：64 位浮点
/// - string/bytes：拷贝到定长缓冲，超出容量时截断
pub fn convert(value: &serde_json::Value, declared: &DeclaredType) -> Result<TagValue, ConvertError> {
    match declared {
        DeclaredType::Int => {
            let raw = value
                .as_i64()
                .or_else(|| value.as_u64().map(|v| v as i64))
                .ok_or(ConvertError::Mismatch { declared: "int" })?;
            Ok(TagValue::Int64(raw))
        }
        DeclaredType::Double => value
            .as_f64()
            .map(TagValue::Double)
            .ok_or(ConvertError::Mismatch { declared: "double" }),
        DeclaredType::Bool => value
            .as_bool()
            .map(TagValue::Bool)
            .ok_or(ConvertError::Mismatch { declared: "bool" }),
        DeclaredType::String => value
            .as_str()
            .map(|v| TagValue::String(BoundedString::truncated(v)))
            .ok_or(ConvertError::Mismatch { declared: "string" }),
        DeclaredType::Bytes => {
            let bytes = json_bytes(value).ok_or(ConvertError::Mismatch { declared: "bytes" })?;
            Ok(TagValue::Bytes(BoundedBytes::truncated(&bytes)))
        }
        DeclaredType::Other(name) => Err(ConvertError::UnsupportedType(name.clone())),
    }
}

/// 读取 0..=255 整数数组形式的字节值。
fn json_bytes(value: &serde_json::Value) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
        .collect()
}
