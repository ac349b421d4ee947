use bridge_control::{ConvertError, convert};
use domain::{DeclaredType, TagValue, VALUE_CAPACITY};

#[test]
fn int_double_bool_keep_their_values() {
    for raw in [0_i64, 42, -7, i64::MIN, i64::MAX] {
        let value = convert(&serde_json::json!(raw), &DeclaredType::Int).expect("int");
        assert_eq!(value, TagValue::Int64(raw));
    }
    for raw in [0.0_f64, 1.5, -273.15, f64::MAX] {
        let value = convert(&serde_json::json!(raw), &DeclaredType::Double).expect("double");
        assert_eq!(value, TagValue::Double(raw));
    }
    for raw in [true, false] {
        let value = convert(&serde_json::json!(raw), &DeclaredType::Bool).expect("bool");
        assert_eq!(value, TagValue::Bool(raw));
    }
}

#[test]
fn int_keeps_raw_bit_pattern_of_unsigned_literal() {
    let value = convert(&serde_json::json!(u64::MAX), &DeclaredType::Int).expect("int");
    assert_eq!(value, TagValue::Int64(-1));
}

#[test]
fn double_accepts_integer_literal() {
    let value = convert(&serde_json::json!(3), &DeclaredType::Double).expect("double");
    assert_eq!(value, TagValue::Double(3.0));
}

#[test]
fn string_and_bytes_are_truncated_to_capacity() {
    let long = "s".repeat(VALUE_CAPACITY * 2);
    let TagValue::String(value) =
        convert(&serde_json::json!(long), &DeclaredType::String).expect("string")
    else {
        panic!("expected string");
    };
    assert_eq!(value.len(), VALUE_CAPACITY);

    let bytes: Vec<u8> = vec![9; VALUE_CAPACITY + 5];
    let TagValue::Bytes(value) =
        convert(&serde_json::json!(bytes), &DeclaredType::Bytes).expect("bytes")
    else {
        panic!("expected bytes");
    };
    assert_eq!(value.len(), VALUE_CAPACITY);
}

#[test]
fn unsupported_type_is_rejected() {
    let err = convert(&serde_json::json!(1), &DeclaredType::Other("word".to_string()))
        .expect_err("unsupported");
    assert_eq!(err, ConvertError::UnsupportedType("word".to_string()));
}

#[test]
fn mismatched_value_is_rejected() {
    let err = convert(&serde_json::json!("abc"), &DeclaredType::Int).expect_err("mismatch");
    assert_eq!(err, ConvertError::Mismatch { declared: "int" });
    let err = convert(&serde_json::json!(1.5), &DeclaredType::Int).expect_err("mismatch");
    assert_eq!(err, ConvertError::Mismatch { declared: "int" });
    let err = convert(&serde_json::json!([1, 300]), &DeclaredType::Bytes).expect_err("mismatch");
    assert_eq!(err, ConvertError::Mismatch { declared: "bytes" });
}

#[test]
fn null_value_is_rejected() {
    let null = serde_json::Value::Null;
    let err = convert(&null, &DeclaredType::infer(&null)).expect_err("untyped null");
    assert_eq!(err, ConvertError::UnsupportedType("null".to_string()));
    let err = convert(&null, &DeclaredType::Int).expect_err("null int");
    assert_eq!(err, ConvertError::Mismatch { declared: "int" });
}
