use super::*;

fn sample_message() -> ChatMessage {
    ChatMessage::new("hi", "bob", 1000)
}

#[test]
fn new_message_uses_message_kind() {
    let msg = sample_message();
    assert_eq!(msg.kind, MESSAGE_KIND);
    assert_eq!(msg.content, "hi");
    assert_eq!(msg.sender, "bob");
    assert_eq!(msg.timestamp, 1000);
}

#[test]
fn encode_writes_type_field_not_kind() {
    let text = encode_message(&sample_message()).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["type"], "message");
    assert_eq!(value["content"], "hi");
    assert_eq!(value["sender"], "bob");
    assert_eq!(value["timestamp"], 1000);
    assert!(value.get("kind").is_none());
}

#[test]
fn decode_reads_wire_frame() {
    let msg = decode_message(r#"{"type":"message","content":"yo","sender":"alice","timestamp":2000}"#)
        .expect("decode");
    assert_eq!(msg, ChatMessage::new("yo", "alice", 2000));
}

#[test]
fn decode_defaults_missing_type_and_timestamp() {
    let msg = decode_message(r#"{"content":"yo","sender":"alice"}"#).expect("decode");
    assert_eq!(msg.kind, MESSAGE_KIND);
    assert_eq!(msg.timestamp, 0);
}

#[test]
fn decode_keeps_unknown_type_tag() {
    let msg = decode_message(r#"{"type":"system","content":"x","sender":"s","timestamp":1}"#).expect("decode");
    assert_eq!(msg.kind, "system");
}

#[test]
fn decode_rejects_malformed_json() {
    let err = decode_message("{not json").expect_err("should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_rejects_missing_sender() {
    let err = decode_message(r#"{"type":"message","content":"hi"}"#).expect_err("should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn stamped_replaces_timestamp_only() {
    let msg = sample_message().stamped(42);
    assert_eq!(msg.timestamp, 42);
    assert_eq!(msg.content, "hi");
}

#[test]
fn is_from_compares_exact_sender() {
    let msg = sample_message();
    assert!(msg.is_from("bob"));
    assert!(!msg.is_from("Bob"));
    assert!(!msg.is_from("alice"));
}
