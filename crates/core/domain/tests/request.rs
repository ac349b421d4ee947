use domain::{DeclaredType, SingleWriteRequest, TagValue, TelemetryEvent, WriteRequest};

#[test]
fn declared_type_parses_names() {
    assert_eq!(DeclaredType::from_name("int"), DeclaredType::Int);
    assert_eq!(DeclaredType::from_name("Double"), DeclaredType::Double);
    assert_eq!(DeclaredType::from_name(" bytes "), DeclaredType::Bytes);
    assert_eq!(
        DeclaredType::from_name("word"),
        DeclaredType::Other("word".to_string())
    );
}

#[test]
fn declared_type_infers_from_json() {
    assert_eq!(DeclaredType::infer(&serde_json::json!(42)), DeclaredType::Int);
    assert_eq!(DeclaredType::infer(&serde_json::json!(4.5)), DeclaredType::Double);
    assert_eq!(DeclaredType::infer(&serde_json::json!(true)), DeclaredType::Bool);
    assert_eq!(DeclaredType::infer(&serde_json::json!("on")), DeclaredType::String);
    assert_eq!(DeclaredType::infer(&serde_json::json!([1, 2])), DeclaredType::Bytes);
    assert_eq!(
        DeclaredType::infer(&serde_json::json!({"a": 1})),
        DeclaredType::Other("object".to_string())
    );
}

#[test]
fn write_request_accessors() {
    let request = WriteRequest::Single(SingleWriteRequest {
        driver: "D1".to_string(),
        group: "G1".to_string(),
        tag: "T1".to_string(),
        value: serde_json::json!(1),
        declared: DeclaredType::Int,
    });
    assert_eq!(request.driver(), "D1");
    assert_eq!(request.group(), "G1");
    assert_eq!(request.tag_count(), 1);
}

#[test]
fn telemetry_event_builds_readings() {
    let event = TelemetryEvent::new("D1", "G1", 1_700_000_000_000)
        .with_value("T1", TagValue::Int64(1))
        .with_error("T2", 3002);
    assert_eq!(event.readings.len(), 2);
    assert_eq!(event.readings[0].tag, "T1");
}
