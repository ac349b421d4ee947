pub mod command;
pub mod request;
pub mod telemetry;
pub mod value;

pub use command::{TagWrite, WriteTagCommand, WriteTagsCommand};
pub use request::{BatchWriteRequest, DeclaredType, SingleWriteRequest, TagEntry, WriteRequest};
pub use telemetry::{Reading, TagReading, TelemetryEvent};
pub use value::{BoundedBytes, BoundedString, TagValue, bounded_str};

/// 字符串/字节值缓冲容量（字节）。
pub const VALUE_CAPACITY: usize = 128;

/// 点位名缓冲容量（字节）。
pub const TAG_NAME_CAPACITY: usize = 128;
