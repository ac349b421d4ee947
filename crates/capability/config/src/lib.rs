//! 桥接服务运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 桥接服务运行配置。
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub http_addr: String,
    pub status_enabled: bool,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub mqtt_topic_prefix: String,
    /// 入站写请求 topic。
    pub mqtt_write_topic: String,
    /// 出站遥测 topic。
    pub mqtt_telemetry_topic: String,
    pub mqtt_qos: u8,
    /// MQTT 客户端请求通道容量（满时发送立即失败）。
    pub mqtt_capacity: usize,
}

impl BridgeConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("BRIDGE_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:7081".to_string());
        let status_enabled = read_bool_with_default("BRIDGE_STATUS_ENABLED", true);
        let mqtt_host = env::var("BRIDGE_MQTT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let mqtt_port = read_u16_with_default("BRIDGE_MQTT_PORT", 1883)?;
        let mqtt_username = read_optional("BRIDGE_MQTT_USERNAME");
        let mqtt_password = read_optional("BRIDGE_MQTT_PASSWORD");
        let mqtt_topic_prefix =
            env::var("BRIDGE_MQTT_TOPIC_PREFIX").unwrap_or_else(|_| "bridge".to_string());
        let mqtt_write_topic = env::var("BRIDGE_MQTT_WRITE_TOPIC")
            .unwrap_or_else(|_| format!("{}/write", mqtt_topic_prefix.trim_end_matches('/')));
        let mqtt_telemetry_topic = env::var("BRIDGE_MQTT_TELEMETRY_TOPIC")
            .unwrap_or_else(|_| format!("{}/telemetry", mqtt_topic_prefix.trim_end_matches('/')));
        let mqtt_qos = read_u8_with_default("BRIDGE_MQTT_QOS", 0)?;
        if mqtt_qos > 2 {
            return Err(ConfigError::Invalid(
                "BRIDGE_MQTT_QOS".to_string(),
                mqtt_qos.to_string(),
            ));
        }
        let mqtt_capacity = read_usize_with_default("BRIDGE_MQTT_CAPACITY", 10)?;
        if mqtt_capacity == 0 {
            return Err(ConfigError::Invalid(
                "BRIDGE_MQTT_CAPACITY".to_string(),
                "0".to_string(),
            ));
        }

        Ok(Self {
            http_addr,
            status_enabled,
            mqtt_host,
            mqtt_port,
            mqtt_username,
            mqtt_password,
            mqtt_topic_prefix,
            mqtt_write_topic,
            mqtt_telemetry_topic,
            mqtt_qos,
            mqtt_capacity,
        })
    }
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u8_with_default(key: &str, default: u8) -> Result<u8, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u8>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_usize_with_default(key: &str, default: usize) -> Result<usize, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
