//! Replies to create, update and delete requests.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// What the service sent back for a mutation.
///
/// Some endpoints answer with the stored record, others with a bare
/// `{message}` or a plain string.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationReply {
    /// Confirmation text.
    Message(String),
    /// The created or updated record.
    Record(Value),
    /// Empty body.
    Empty,
}

impl MutationReply {
    /// Classify a success response body.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return MutationReply::Empty;
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::String(text)) => MutationReply::Message(text),
            Ok(Value::Object(map)) if map.len() == 1 && map.contains_key("message") => {
                match map.get("message") {
                    Some(Value::String(text)) => MutationReply::Message(text.clone()),
                    _ => MutationReply::Record(Value::Object(map)),
                }
            }
            Ok(value) => MutationReply::Record(value),
            Err(_) => MutationReply::Message(String::from_utf8_lossy(body).trim().to_string()),
        }
    }

    /// Text to show the user after the mutation.
    pub fn message(&self) -> Option<&str> {
        match self {
            MutationReply::Message(text) => Some(text.as_str()),
            MutationReply::Record(value) => value.get("message").and_then(Value::as_str),
            MutationReply::Empty => None,
        }
    }

    /// Decode the returned record, if there is one.
    pub fn record<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        match self {
            MutationReply::Record(value) => Some(T::deserialize(value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_core::catalog::Category;
    use pos_core::CategoryId;

    #[test]
    fn test_message_object() {
        let reply = MutationReply::from_body(br#"{"message":"Producto eliminado"}"#);
        assert_eq!(reply, MutationReply::Message("Producto eliminado".to_string()));
        assert_eq!(reply.message(), Some("Producto eliminado"));
    }

    #[test]
    fn test_plain_string() {
        let reply = MutationReply::from_body("\"Categoría creada\"".as_bytes());
        assert_eq!(reply.message(), Some("Categoría creada"));
        let reply = MutationReply::from_body(b"Creado correctamente");
        assert_eq!(reply.message(), Some("Creado correctamente"));
    }

    #[test]
    fn test_record() {
        let reply = MutationReply::from_body(br#"{"id":4,"name":"Audio"}"#);
        assert_eq!(reply.message(), None);
        let category: Category = reply.record().unwrap().unwrap();
        assert_eq!(category.id, CategoryId::new(4));
    }

    #[test]
    fn test_empty() {
        assert_eq!(MutationReply::from_body(b""), MutationReply::Empty);
        assert_eq!(MutationReply::from_body(b"  \n"), MutationReply::Empty);
        assert!(MutationReply::Empty.record::<Category>().is_none());
    }
}
