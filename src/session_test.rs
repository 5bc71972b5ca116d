use crate::session::{ChatSession, Role};

#[test]
fn test_messages_append_in_order() {
    let mut session = ChatSession::new();
    assert!(session.is_empty());

    session.push_user("first question");
    session.push_assistant("first answer");
    session.push_user("second question");

    assert_eq!(session.len(), 3);
    let messages = session.messages();
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "first question");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2].content, "second question");
    assert!(messages[0].timestamp <= messages[2].timestamp);
}

#[test]
fn test_messages_serialize_for_logging() {
    let mut session = ChatSession::new();
    session.push_user("q");
    session.push_assistant("a");

    let json = serde_json::to_value(session.messages()).unwrap();
    assert_eq!(json[0]["role"], "user");
    assert_eq!(json[1]["role"], "assistant");
    assert_eq!(json[1]["content"], "a");
    assert!(json[0]["timestamp"].is_string());
}
