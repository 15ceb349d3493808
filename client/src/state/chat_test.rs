use super::*;

fn inbound(content: &str, sender: &str, timestamp: i64) -> ChatMessage {
    ChatMessage::new(content, sender, timestamp)
}

fn sample_state() -> ChatState {
    let mut state = ChatState::default();
    state.push_inbound(inbound("hi", "bob", 1000));
    state.push_inbound(inbound("yo", "alice", 2000));
    state
}

// =============================================================
// ChatState
// =============================================================

#[test]
fn chat_state_default_empty_messages() {
    let state = ChatState::default();
    assert!(state.messages.is_empty());
}

#[test]
fn push_inbound_keeps_arrival_order() {
    let state = sample_state();
    let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hi", "yo"]);
}

#[test]
fn push_inbound_does_not_sort_by_timestamp() {
    let mut state = ChatState::default();
    state.push_inbound(inbound("late", "bob", 5000));
    state.push_inbound(inbound("early", "bob", 1000));
    assert_eq!(state.messages[0].content, "late");
    assert_eq!(state.messages[1].content, "early");
}

#[test]
fn push_inbound_keeps_duplicates() {
    let mut state = ChatState::default();
    state.push_inbound(inbound("hi", "bob", 1000));
    state.push_inbound(inbound("hi", "bob", 1000));
    assert_eq!(state.messages.len(), 2);
}

// =============================================================
// Self vs other
// =============================================================

#[test]
fn sides_for_other_user() {
    let state = sample_state();
    assert_eq!(MessageSide::of(&state.messages[0], "carol"), MessageSide::Other);
    assert_eq!(MessageSide::of(&state.messages[1], "carol"), MessageSide::Other);
}

#[test]
fn bob_sees_own_message_as_self() {
    let state = sample_state();
    assert_eq!(MessageSide::of(&state.messages[0], "bob"), MessageSide::Own);
    assert_eq!(MessageSide::of(&state.messages[1], "bob"), MessageSide::Other);
}

#[test]
fn author_label_uses_you_for_own_messages() {
    let state = sample_state();
    assert_eq!(author_label(&state.messages[0], "bob"), "You");
    assert_eq!(author_label(&state.messages[1], "bob"), "alice");
}

#[test]
fn side_classes_differ() {
    assert_ne!(MessageSide::Own.row_class(), MessageSide::Other.row_class());
    assert_ne!(MessageSide::Own.bubble_class(), MessageSide::Other.bubble_class());
}

// =============================================================
// Compose
// =============================================================

#[test]
fn compose_builds_message_with_sender_and_time() {
    let msg = compose_message("hello", "bob", true, 42).expect("message");
    assert_eq!(msg, ChatMessage::new("hello", "bob", 42));
    assert_eq!(msg.kind, "message");
}

#[test]
fn compose_keeps_content_as_typed() {
    let msg = compose_message("  padded  ", "bob", true, 1).expect("message");
    assert_eq!(msg.content, "  padded  ");
}

#[test]
fn compose_rejects_blank_drafts() {
    assert_eq!(compose_message("", "bob", true, 1), Err(ComposeRejection::Empty));
    assert_eq!(compose_message(" \t\n ", "bob", true, 1), Err(ComposeRejection::Empty));
}

#[test]
fn compose_rejects_while_disconnected() {
    assert_eq!(compose_message("hello", "bob", false, 1), Err(ComposeRejection::Disconnected));
}

#[test]
fn blank_draft_is_rejected_before_connection_check() {
    assert_eq!(compose_message("   ", "bob", false, 1), Err(ComposeRejection::Empty));
}

#[test]
fn message_at_follows_arrival_position() {
    let state = sample_state();
    assert_eq!(state.len(), 2);
    assert!(!state.is_empty());
    assert_eq!(state.message_at(0).map(|m| m.sender.as_str()), Some("bob"));
    assert_eq!(state.message_at(1).map(|m| m.sender.as_str()), Some("alice"));
    assert!(state.message_at(2).is_none());
}

#[test]
fn empty_state_has_no_rows() {
    let state = ChatState::default();
    assert_eq!(state.len(), 0);
    assert!(state.is_empty());
    assert!(state.message_at(0).is_none());
}
