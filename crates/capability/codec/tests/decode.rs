use bridge_codec::{DecodeError, decode_write_request};
use domain::{DeclaredType, WriteRequest};

#[test]
fn decodes_single_request() {
    let payload = br#"{"node_name":"D1","group_name":"G1","tag_name":"T1","value":42,"type":"int"}"#;
    let request = decode_write_request(payload).expect("decoded");
    let WriteRequest::Single(single) = request else {
        panic!("expected single request");
    };
    assert_eq!(single.driver, "D1");
    assert_eq!(single.group, "G1");
    assert_eq!(single.tag, "T1");
    assert_eq!(single.value, serde_json::json!(42));
    assert_eq!(single.declared, DeclaredType::Int);
}

#[test]
fn decodes_single_request_with_aliases() {
    let payload =
        br#"{"driver":"D1","group":"G1","tag":"T1","value":"on","declaredType":"string"}"#;
    let request = decode_write_request(payload).expect("decoded");
    let WriteRequest::Single(single) = request else {
        panic!("expected single request");
    };
    assert_eq!(single.driver, "D1");
    assert_eq!(single.declared, DeclaredType::String);
}

#[test]
fn decodes_batch_request_in_order() {
    let payload = br#"{
        "node_name": "D1",
        "group_name": "G1",
        "tags": [
            {"tag_name": "T1", "value": 1},
            {"tag_name": "T2", "value": 2.5},
            {"tag_name": "T3", "value": true, "type": "bool"}
        ]
    }"#;
    let request = decode_write_request(payload).expect("decoded");
    let WriteRequest::Batch(batch) = request else {
        panic!("expected batch request");
    };
    assert_eq!(batch.driver, "D1");
    let tags: Vec<&str> = batch.entries.iter().map(|entry| entry.tag.as_str()).collect();
    assert_eq!(tags, vec!["T1", "T2", "T3"]);
    assert_eq!(batch.entries[0].declared, DeclaredType::Int);
    assert_eq!(batch.entries[1].declared, DeclaredType::Double);
    assert_eq!(batch.entries[2].declared, DeclaredType::Bool);
}

#[test]
fn unknown_type_is_carried_to_conversion() {
    let payload = br#"{"node_name":"D1","group_name":"G1","tag_name":"T1","value":1,"type":"word"}"#;
    let request = decode_write_request(payload).expect("decoded");
    let WriteRequest::Single(single) = request else {
        panic!("expected single request");
    };
    assert_eq!(single.declared, DeclaredType::Other("word".to_string()));
}

#[test]
fn rejects_malformed_json() {
    let err = decode_write_request(b"{\"node_name\":").expect_err("malformed");
    assert!(matches!(err, DecodeError::Malformed(_)));
    let err = decode_write_request(b"[1,2,3]").expect_err("not an object");
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn rejects_missing_fields() {
    let err = decode_write_request(br#"{"group_name":"G1","tag_name":"T1","value":1}"#)
        .expect_err("missing driver");
    assert!(matches!(err, DecodeError::MissingField("node_name")));

    let err = decode_write_request(br#"{"node_name":"D1","tag_name":"T1","value":1}"#)
        .expect_err("missing group");
    assert!(matches!(err, DecodeError::MissingField("group_name")));

    let err = decode_write_request(br#"{"node_name":"D1","group_name":"G1","value":1}"#)
        .expect_err("missing tag");
    assert!(matches!(err, DecodeError::MissingField("tag_name")));

    let err = decode_write_request(br#"{"node_name":"D1","group_name":"G1","tag_name":"T1"}"#)
        .expect_err("missing value");
    assert!(matches!(err, DecodeError::MissingField("value")));

    let err = decode_write_request(br#"{"node_name":"","group_name":"G1","tag_name":"T1","value":1}"#)
        .expect_err("empty driver");
    assert!(matches!(err, DecodeError::MissingField("node_name")));
}

#[test]
fn rejects_empty_or_ambiguous_batch() {
    let err = decode_write_request(br#"{"node_name":"D1","group_name":"G1","tags":[]}"#)
        .expect_err("empty batch");
    assert!(matches!(err, DecodeError::EmptyBatch));

    let err = decode_write_request(
        br#"{"node_name":"D1","group_name":"G1","tag_name":"T1","value":1,"tags":[{"tag_name":"T2","value":2}]}"#,
    )
    .expect_err("ambiguous");
    assert!(matches!(err, DecodeError::Ambiguous));

    let err = decode_write_request(br#"{"node_name":"D1","group_name":"G1","tags":[{"value":2}]}"#)
        .expect_err("entry without tag");
    assert!(matches!(err, DecodeError::MissingField("tags[].tag_name")));
}

#[test]
fn explicit_null_value_is_kept_for_conversion() {
    let payload = br#"{"node_name":"D1","group_name":"G1","tag_name":"T1","value":null}"#;
    let WriteRequest::Single(single) = decode_write_request(payload).expect("decoded") else {
        panic!("expected single request");
    };
    assert_eq!(single.value, serde_json::Value::Null);
    assert_eq!(single.declared, DeclaredType::Other("null".to_string()));

    let payload = br#"{"node_name":"D1","group_name":"G1","tags":[{"tag_name":"T1","value":null,"type":"int"}]}"#;
    let WriteRequest::Batch(batch) = decode_write_request(payload).expect("decoded") else {
        panic!("expected batch request");
    };
    assert_eq!(batch.entries[0].value, serde_json::Value::Null);
    assert_eq!(batch.entries[0].declared, DeclaredType::Int);

    let err = decode_write_request(br#"{"node_name":"D1","group_name":"G1","tags":[{"tag_name":"T1"}]}"#)
        .expect_err("entry without value");
    assert!(matches!(err, DecodeError::MissingField("tags[].value")));
}
