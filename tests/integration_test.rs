//! Integration tests for the C ABI entry point

use std::ptr;

use enrich_filter::transform::MAX_NESTING_DEPTH;
use enrich_filter::{enrich_record, OutputBuffer};
use serde_json::Value;

/// Call the entry point the way a host would and reclaim the result.
fn call(tag: &[u8], secs: i64, nanos: i64, payload: &[u8]) -> Option<OutputBuffer> {
    let ptr = unsafe {
        enrich_record(
            tag.as_ptr(),
            tag.len(),
            secs,
            nanos,
            payload.as_ptr(),
            payload.len(),
        )
    };

    if ptr.is_null() {
        None
    } else {
        Some(unsafe { OutputBuffer::from_raw(ptr) })
    }
}

fn parse(output: &OutputBuffer) -> serde_json::Map<String, Value> {
    let value: Value = serde_json::from_slice(output.as_bytes()).unwrap();
    value.as_object().unwrap().clone()
}

#[test]
fn test_hello_record() {
    let output = call(b"app.log", 1_700_000_000, 0, br#"{"msg":"hello"}"#).unwrap();
    let obj = parse(&output);

    assert_eq!(obj["msg"], Value::String("hello".to_string()));
    assert_eq!(obj["tag"], Value::String("app.log".to_string()));
    assert_eq!(obj["original"], Value::String(r#"{"msg":"hello"}"#.to_string()));
    assert!(!obj["time"].as_str().unwrap().is_empty());
    assert_eq!(obj.len(), 4);
}

#[test]
fn test_not_json_returns_null() {
    assert!(call(b"app.log", 0, 0, b"not json").is_none());
}

#[test]
fn test_array_root_returns_null() {
    assert!(call(b"app.log", 0, 0, br#"["a","b"]"#).is_none());
}

#[test]
fn test_scalar_roots_return_null() {
    for payload in ["5", "[1,2]", "null", "\"x\""] {
        assert!(call(b"t", 0, 0, payload.as_bytes()).is_none(), "payload {}", payload);
    }
}

#[test]
fn test_syntax_errors_return_null() {
    for payload in ["{", "", "{\"a\":}", "{'a':1}"] {
        assert!(call(b"t", 0, 0, payload.as_bytes()).is_none(), "payload {:?}", payload);
    }
}

#[test]
fn test_existing_tag_overwritten() {
    let output = call(b"app.log", 1, 0, br#"{"tag":"other","n":1}"#).unwrap();
    let obj = parse(&output);

    assert_eq!(obj["tag"], Value::String("app.log".to_string()));
    assert_eq!(obj["n"], serde_json::json!(1));
    assert_eq!(obj.len(), 4);
}

#[test]
fn test_single_trailing_sentinel() {
    let output = call(b"app.log", 1_700_000_000, 5, br#"{"a":"b"}"#).unwrap();
    let bytes = output.as_bytes_with_nul();

    assert_eq!(bytes.last(), Some(&0));
    assert_eq!(bytes.iter().filter(|b| **b == 0).count(), 1);
}

#[test]
fn test_lengths_are_not_scanned() {
    // Neither region is NUL-terminated and both are longer than the lengths given.
    let tag = b"app.log.extra";
    let payload = br#"{"k":1}GARBAGE"#;

    let ptr = unsafe { enrich_record(tag.as_ptr(), 7, 0, 0, payload.as_ptr(), 7) };
    assert!(!ptr.is_null());

    let output = unsafe { OutputBuffer::from_raw(ptr) };
    let obj = parse(&output);
    assert_eq!(obj["tag"], Value::String("app.log".to_string()));
    assert_eq!(obj["original"], Value::String(r#"{"k":1}"#.to_string()));
}

#[test]
fn test_empty_tag_with_null_pointer() {
    let payload = br#"{"a":1}"#;
    let ptr = unsafe { enrich_record(ptr::null(), 0, 0, 0, payload.as_ptr(), payload.len()) };
    assert!(!ptr.is_null());

    let output = unsafe { OutputBuffer::from_raw(ptr) };
    assert_eq!(parse(&output)["tag"], Value::String(String::new()));
}

#[test]
fn test_null_record_pointer_with_length_returns_null() {
    let tag = b"t";
    let ptr = unsafe { enrich_record(tag.as_ptr(), tag.len(), 0, 0, ptr::null(), 10) };
    assert!(ptr.is_null());
}

#[test]
fn test_extreme_timestamps_still_enrich() {
    for (secs, nanos) in [(i64::MAX, i64::MAX), (i64::MIN, i64::MIN), (-1, -1)] {
        let output = call(b"t", secs, nanos, b"{}").unwrap();
        assert!(!parse(&output)["time"].as_str().unwrap().is_empty());
    }
}

#[test]
fn test_reenrich_original_is_stable() {
    let first = call(b"app.log", 1_700_000_000, 0, br#"{"msg":"hello","tag":"x"}"#).unwrap();
    let first_obj = parse(&first);
    let original = first_obj["original"].as_str().unwrap().to_string();

    let second = call(b"app.log", 1_800_000_000, 0, original.as_bytes()).unwrap();
    let mut second_obj = parse(&second);

    let mut first_obj = first_obj;
    first_obj.remove("time");
    second_obj.remove("time");
    assert_eq!(first_obj, second_obj);
}

/// `{"a":[[...1...]]}` with `depth` nested containers in total.
fn nested_payload(depth: usize) -> String {
    let arrays = depth - 1;
    format!("{{\"a\":{}1{}}}", "[".repeat(arrays), "]".repeat(arrays))
}

/// Debug builds use far larger frames than release ones; give deep
/// recursion room the way a host thread would.
fn with_large_stack<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_deeply_nested_objects_enriched_up_to_limit() {
    with_large_stack(|| {
        for depth in [101, 127, 128, 129, 201, MAX_NESTING_DEPTH] {
            let payload = nested_payload(depth);
            let output = call(b"deep", 0, 0, payload.as_bytes());

            let output = output.unwrap_or_else(|| panic!("depth {} returned null", depth));
            let text = output.to_str().unwrap();
            assert!(text.starts_with(r#"{"a":[["#));
            assert!(text.contains(r#""tag":"deep""#));
        }
    });
}

#[test]
fn test_nesting_beyond_limit_returns_null() {
    let payload = nested_payload(MAX_NESTING_DEPTH + 1);
    assert!(call(b"deep", 0, 0, payload.as_bytes()).is_none());
}
