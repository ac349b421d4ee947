use bridge_config::{BridgeConfig, ConfigError};

// 环境变量为进程级状态，所有断言放在同一个测试中顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("BRIDGE_HTTP_ADDR", "127.0.0.1:9091");
        std::env::set_var("BRIDGE_MQTT_TOPIC_PREFIX", "plant/");
        std::env::set_var("BRIDGE_MQTT_PORT", "1884");
        std::env::set_var("BRIDGE_STATUS_ENABLED", "off");
    }

    let config = BridgeConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:9091");
    assert_eq!(config.mqtt_port, 1884);
    assert_eq!(config.mqtt_write_topic, "plant/write");
    assert_eq!(config.mqtt_telemetry_topic, "plant/telemetry");
    assert_eq!(config.mqtt_qos, 0);
    assert_eq!(config.mqtt_capacity, 10);
    assert!(!config.status_enabled);
    assert!(config.mqtt_username.is_none());

    unsafe {
        std::env::set_var("BRIDGE_MQTT_QOS", "3");
    }
    let err = BridgeConfig::from_env().expect_err("qos out of range");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "BRIDGE_MQTT_QOS"));

    unsafe {
        std::env::set_var("BRIDGE_MQTT_QOS", "1");
        std::env::set_var("BRIDGE_MQTT_PORT", "not-a-port");
    }
    let err = BridgeConfig::from_env().expect_err("invalid port");
    assert!(matches!(err, ConfigError::Invalid(key, value) if key == "BRIDGE_MQTT_PORT" && value == "not-a-port"));
}
