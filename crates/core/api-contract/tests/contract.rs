use api_contract::{ApiResponse, BridgeStatusDto, MetricsSnapshotDto};

#[test]
fn bridge_status_is_camel_case() {
    let status = BridgeStatusDto {
        loop_state: "receive_pending".to_string(),
        receiving: true,
        metrics: MetricsSnapshotDto::default(),
    };
    let value = serde_json::to_value(status).expect("serialize");
    assert_eq!(value["loopState"], "receive_pending");
    assert_eq!(value["receiving"], true);
    assert!(value.get("loop_state").is_none());
    assert!(value.get("metrics").is_some());
}

#[test]
fn metrics_fields_keep_metric_names() {
    let metrics = MetricsSnapshotDto {
        recv_msgs_total: 3,
        recv_msg_errors_total: 1,
        send_bytes_60s: 42,
        ..MetricsSnapshotDto::default()
    };
    let value = serde_json::to_value(metrics).expect("serialize");
    assert_eq!(value["recv_msgs_total"], 3);
    assert_eq!(value["recv_msg_errors_total"], 1);
    assert_eq!(value["send_bytes_60s"], 42);
    assert!(value.get("recvMsgsTotal").is_none());
}

#[test]
fn status_envelope_round_trips() {
    let payload = r#"{
        "success": true,
        "data": {"loopState": "stopped", "receiving": false, "metrics": {
            "recv_msgs_total": 1, "recv_bytes_total": 2, "recv_msg_errors_total": 0,
            "recv_msgs_5s": 1, "recv_msgs_30s": 1, "recv_msgs_60s": 1,
            "recv_bytes_5s": 2, "recv_bytes_30s": 2, "recv_bytes_60s": 2,
            "send_msgs_total": 0, "send_bytes_total": 0, "send_msg_errors_total": 0,
            "send_bytes_5s": 0, "send_bytes_30s": 0, "send_bytes_60s": 0
        }},
        "error": null
    }"#;
    let response: ApiResponse<BridgeStatusDto> = serde_json::from_str(payload).expect("parse");
    let status = response.data.expect("data");
    assert_eq!(status.loop_state, "stopped");
    assert!(!status.receiving);
    assert_eq!(status.metrics.recv_bytes_total, 2);
}
