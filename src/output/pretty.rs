use std::fmt::Write;

use colored::Colorize;

use crate::protocol::ProtocolMessage;

/// Describe a message that was resolved but not sent.
pub fn format_message_pretty(message: &ProtocolMessage) -> String {
    let mut output = format!("{} \"{}\"", "Would send:".yellow().bold(), message.to_wire());
    let kind = match message.object {
        Some(object) => format!("({} {object})", message.action),
        None => format!("({})", message.action),
    };
    write!(output, "  {}", kind.dimmed()).ok();
    output
}

/// Show the sent message followed by the server's reply, line by line.
pub fn format_exchange_pretty(message: &ProtocolMessage, reply: &[String]) -> String {
    let mut output = format!("Sending: \"{}\"", message.to_wire()).dimmed().to_string();
    for line in reply {
        output.push('\n');
        output.push_str(line);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ActionKind, ObjectKind};

    #[test]
    fn test_message_pretty() {
        let message =
            ProtocolMessage::new(ActionKind::Add, Some(ObjectKind::Alarm), "900".to_string());
        let output = format_message_pretty(&message);
        assert!(output.contains("\"0 1 900\""));
        assert!(output.contains("add alarm"));
    }

    #[test]
    fn test_exchange_pretty() {
        let message = ProtocolMessage::new(ActionKind::List, None, String::new());
        let reply = vec!["0  timer  4:59".to_string(), "1  alarm  17:00".to_string()];
        let output = format_exchange_pretty(&message, &reply);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Sending: \"1\""));
        assert_eq!(lines[2], "1  alarm  17:00");
    }
}
