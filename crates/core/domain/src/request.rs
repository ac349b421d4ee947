//! 入站写请求（解码结果）。
//!
//! 请求由接收循环独占持有，直到交给写命令分发。分发成功时字符串字段被移入命令，
//! 请求中对应字段变为空串；随后释放请求不会再触及已移走的数据。

/// 请求声明的值类型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Int,
    String,
    Double,
    Bool,
    Bytes,
    /// 不支持的类型（保留原始名称，交由转换阶段拒绝）。
    Other(String),
}

impl DeclaredType {
    /// 按报文中的类型名解析。
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" => DeclaredType::Int,
            "string" => DeclaredType::String,
            "double" => DeclaredType::Double,
            "bool" => DeclaredType::Bool,
            "bytes" => DeclaredType::Bytes,
            _ => DeclaredType::Other(name.to_string()),
        }
    }

    /// 未声明类型时按 JSON 值推断。
    pub fn infer(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) if number.is_f64() => DeclaredType::Double,
            serde_json::Value::Number(_) => DeclaredType::Int,
            serde_json::Value::Bool(_) => DeclaredType::Bool,
            serde_json::Value::String(_) => DeclaredType::String,
            serde_json::Value::Array(_) => DeclaredType::Bytes,
            serde_json::Value::Object(_) => DeclaredType::Other("object".to_string()),
            serde_json::Value::Null => DeclaredType::Other("null".to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::String => "string",
            DeclaredType::Double => "double",
            DeclaredType::Bool => "bool",
            DeclaredType::Bytes => "bytes",
            DeclaredType::Other(name) => name,
        }
    }
}

/// 单点写请求。
#[derive(Debug, Clone, PartialEq)]
pub struct SingleWriteRequest {
    pub driver: String,
    pub group: String,
    pub tag: String,
    pub value: serde_json::Value,
    pub declared: DeclaredType,
}

/// 批量写请求中的一项。
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub tag: String,
    pub value: serde_json::Value,
    pub declared: DeclaredType,
}

/// 批量写请求。
#[derive(Debug, Clone, PartialEq)]
pub struct BatchWriteRequest {
    pub driver: String,
    pub group: String,
    pub entries: Vec<TagEntry>,
}

/// 入站写请求。
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest {
    Single(SingleWriteRequest),
    Batch(BatchWriteRequest),
}

impl WriteRequest {
    pub fn driver(&self) -> &str {
        match self {
            WriteRequest::Single(req) => &req.driver,
            WriteRequest::Batch(req) => &req.driver,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            WriteRequest::Single(req) => &req.group,
            WriteRequest::Batch(req) => &req.group,
        }
    }

    pub fn tag_count(&self) -> usize {
        match self {
            WriteRequest::Single(_) => 1,
            WriteRequest::Batch(req) => req.entries.len(),
        }
    }
}
