use serde::{Deserialize, Serialize};

// -- Message-log wire types -------------------------------------------------

/// One chat message as served by `GET /api/messages`.
///
/// `id` is server-assigned, unique, and monotonically increasing; gaps are
/// possible. Immutable once observed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub user_id: u64,
    pub login: String,
    pub content: String,
    /// Server-preformatted wall-clock label, e.g. `"14:05"`.
    pub timestamp: String,
}

impl Message {
    /// Whether this message was authored by `user_id`.
    pub fn is_from(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }
}

/// Request body for `POST /api/messages`.
#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_deserializes_server_shape() {
        let json = r#"{"id":1,"user_id":2,"login":"anna","content":"hi","timestamp":"14:05"}"#;
        let msg: Message = serde_json::from_str(json).expect("deser failed");
        assert_eq!(msg.id, 1);
        assert_eq!(msg.user_id, 2);
        assert_eq!(msg.login, "anna");
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.timestamp, "14:05");
    }

    #[test]
    fn message_batch_deserializes_ascending() {
        let json = r#"[
            {"id":3,"user_id":1,"login":"a","content":"x","timestamp":"09:00"},
            {"id":5,"user_id":2,"login":"b","content":"y","timestamp":"09:01"}
        ]"#;
        let batch: Vec<Message> = serde_json::from_str(json).expect("deser failed");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, 3);
        assert_eq!(batch[1].id, 5);
    }

    #[test]
    fn empty_batch_deserializes() {
        let batch: Vec<Message> = serde_json::from_str("[]").expect("deser failed");
        assert!(batch.is_empty());
    }

    #[test]
    fn message_serde_roundtrip() {
        let msg = Message {
            id: 42,
            user_id: 9,
            login: "boris".to_string(),
            content: "привет".to_string(),
            timestamp: "23:59".to_string(),
        };
        let json = serde_json::to_string(&msg).expect("ser failed");
        let back: Message = serde_json::from_str(&json).expect("deser failed");
        assert_eq!(back, msg);
    }

    #[test]
    fn is_from_matches_author() {
        let msg = Message {
            id: 1,
            user_id: 9,
            login: "me".to_string(),
            content: "hi".to_string(),
            timestamp: "00:00".to_string(),
        };
        assert!(msg.is_from(9));
        assert!(!msg.is_from(2));
    }

    #[test]
    fn new_message_serializes_content_only() {
        let body = NewMessage { content: "hello" };
        let json = serde_json::to_string(&body).expect("ser failed");
        assert_eq!(json, r#"{"content":"hello"}"#);
    }

    #[test]
    fn message_rejects_missing_id() {
        let json = r#"{"user_id":2,"login":"anna","content":"hi","timestamp":"14:05"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }
}
