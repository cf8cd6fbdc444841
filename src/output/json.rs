//! JSON output formatting for pdc.

use serde_json::json;

use crate::error::PdcError;
use crate::protocol::ProtocolMessage;

/// Format a message that was resolved but not sent.
///
/// # Errors
///
/// Returns `PdcError::Serialize` if JSON serialization fails.
pub fn format_message_json(message: &ProtocolMessage) -> Result<String, PdcError> {
    let output = json!({
        "wire": message.to_wire(),
        "action": message.action,
        "object": message.object,
        "payload": message.payload,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a sent message together with the server's reply.
///
/// # Errors
///
/// Returns `PdcError::Serialize` if JSON serialization fails.
pub fn format_exchange_json(message: &ProtocolMessage, reply: &[String]) -> Result<String, PdcError> {
    let output = json!({
        "wire": message.to_wire(),
        "action": message.action,
        "object": message.object,
        "payload": message.payload,
        "response": reply,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ActionKind, ObjectKind};

    #[test]
    fn test_message_json() {
        let message = ProtocolMessage::new(ActionKind::Add, Some(ObjectKind::Timer), "5".to_string());
        let value: serde_json::Value =
            serde_json::from_str(&format_message_json(&message).unwrap()).unwrap();

        assert_eq!(value["wire"], "0 0 5");
        assert_eq!(value["action"], "add");
        assert_eq!(value["object"], "timer");
        assert_eq!(value["payload"], "5");
        assert!(value.get("response").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_exchange_json() {
        let message = ProtocolMessage::new(ActionKind::Cat, None, "@tea".to_string());
        let reply = vec!["4:59".to_string()];
        let value: serde_json::Value =
            serde_json::from_str(&format_exchange_json(&message, &reply).unwrap()).unwrap();

        assert_eq!(value["wire"], "5 @tea");
        assert_eq!(value["action"], "cat");
        assert!(value["object"].is_null());
        assert_eq!(value["payload"], "@tea");
        assert_eq!(value["response"][0], "4:59");
    }
}
