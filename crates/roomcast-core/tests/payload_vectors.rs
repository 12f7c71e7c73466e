//! Wire payload vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use roomcast_core::protocol::chat::ChatMessage;
use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::protocol::presence::{ConnectionType, OnlineStatus, PresenceUpdate};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_chat_message() {
    let s = load("chat_message.json");
    let msg: ChatMessage = serde_json::from_str(&s).unwrap();
    assert_eq!(msg.message, "hi");
    assert_eq!(msg.username, "alice");
}

#[test]
fn chat_message_missing_field_fails() {
    let s = load("chat_missing_username.json");
    let err = serde_json::from_str::<ChatMessage>(&s).expect_err("must fail");
    assert!(err.to_string().contains("username"));
}

#[test]
fn chat_message_round_trip() {
    let msg = ChatMessage {
        message: "see you at 9".into(),
        username: "alice".into(),
    };
    let wire = serde_json::to_string(&msg).unwrap();
    let back: ChatMessage = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn parse_presence_open() {
    let s = load("presence_open.json");
    let upd: PresenceUpdate = serde_json::from_str(&s).unwrap();
    assert_eq!(upd.username, "bob");
    assert_eq!(upd.connection_type, ConnectionType::Open);
    assert!(upd.connection_type.is_open());
}

#[test]
fn parse_presence_close_tolerates_extra_fields() {
    let s = load("presence_close.json");
    let upd: PresenceUpdate = serde_json::from_str(&s).unwrap();
    assert_eq!(upd.connection_type, ConnectionType::Close);
    assert!(!upd.connection_type.is_open());
}

#[test]
fn unknown_connection_type_fails() {
    // "idle" is outside the protocol; it must be a parse error, not an
    // implicit offline.
    let s = load("presence_bad_type.json");
    assert!(serde_json::from_str::<PresenceUpdate>(&s).is_err());
}

#[test]
fn online_status_shape() {
    let out = OnlineStatus {
        username: "bob".into(),
        online_status: true,
    };
    let wire = serde_json::to_string(&out).unwrap();
    assert_eq!(wire, r#"{"username":"bob","online_status":true}"#);
}

#[test]
fn group_event_chat_tag() {
    let s = load("event_chat.json");
    let ev: GroupEvent = serde_json::from_str(&s).unwrap();
    assert_eq!(
        ev,
        GroupEvent::ChatMessage {
            message: "hi".into(),
            username: "alice".into(),
        }
    );
}

#[test]
fn group_event_status_tag() {
    let s = load("event_status.json");
    let ev: GroupEvent = serde_json::from_str(&s).unwrap();
    assert_eq!(
        ev,
        GroupEvent::OnlineStatus {
            username: "bob".into(),
            online: true,
        }
    );
    let wire = serde_json::to_string(&ev).unwrap();
    assert!(wire.contains(r#""type":"online-status""#));
    assert!(wire.contains(r#""status":true"#));
}
