//! Building and reading wire messages.
//!
//! A wire message is `<action> [<object>] <payload>`, space separated, with
//! the object code present only for `add`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{ActionKind, ObjectKind};
use crate::core::{classify, ParseError, Target};
use crate::error::PdcError;

/// A validated message, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolMessage {
    pub action: ActionKind,
    pub object: Option<ObjectKind>,
    pub payload: String,
}

impl ProtocolMessage {
    #[must_use]
    pub const fn new(action: ActionKind, object: Option<ObjectKind>, payload: String) -> Self {
        Self {
            action,
            object,
            payload,
        }
    }

    /// The wire form of the message.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProtocolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action.code())?;
        if let Some(object) = self.object {
            write!(f, " {}", object.code())?;
        }
        if !self.payload.is_empty() {
            write!(f, " {}", self.payload)?;
        }
        Ok(())
    }
}

impl FromStr for ProtocolMessage {
    type Err = PdcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decode_err = |what: &str| PdcError::Decode(format!("{what} in '{s}'"));
        let code = |token: Option<&str>, what: &str| -> Result<u8, PdcError> {
            token
                .and_then(|t| t.parse().ok())
                .ok_or_else(|| decode_err(what))
        };

        let (action_token, rest) = split_token(s);
        let action = ActionKind::from_code(code(action_token, "missing action code")?)
            .ok_or_else(|| decode_err("unknown action code"))?;

        let (object, payload) = if action == ActionKind::Add {
            let (object_token, payload) = split_token(rest);
            let object = ObjectKind::from_code(code(object_token, "missing object code")?)
                .ok_or_else(|| decode_err("unknown object code"))?;
            (Some(object), payload)
        } else {
            (None, rest)
        };

        Ok(Self::new(action, object, payload.to_string()))
    }
}

fn split_token(s: &str) -> (Option<&str>, &str) {
    let s = s.trim_start();
    if s.is_empty() {
        return (None, s);
    }
    match s.split_once(' ') {
        Some((head, tail)) => (Some(head), tail),
        None => (Some(s), ""),
    }
}

/// Turn the tokens of an invocation into a wire message.
///
/// The first token selects the action; if it is not an action keyword,
/// `add` is implied. No tokens at all means `list`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the `add` expression cannot be resolved or a
/// selector is neither an index nor a `@label`. No message is produced in
/// that case.
pub fn encode<S: AsRef<str>>(tokens: &[S], now: NaiveDateTime) -> Result<ProtocolMessage, ParseError> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();

    let Some((first, rest)) = tokens.split_first() else {
        return Ok(ProtocolMessage::new(ActionKind::List, None, String::new()));
    };

    let (action, args) = match ActionKind::from_keyword(first) {
        Some(action) => (action, rest),
        None => (ActionKind::Add, tokens.as_slice()),
    };

    if action.takes_no_arguments() {
        if !args.is_empty() {
            tracing::warn!("'{first}' does not take parameters, ignoring...");
        }
        return Ok(ProtocolMessage::new(action, None, String::new()));
    }

    if action.takes_selectors() {
        if let Some(bad) = args.iter().find(|a| Target::parse(a).is_none()) {
            return Err(ParseError::InvalidSelector((*bad).to_string()));
        }
        return Ok(ProtocolMessage::new(action, None, args.join(" ")));
    }

    let expr = classify(args, now)?;
    Ok(ProtocolMessage::new(action, Some(expr.object()), expr.payload()))
}
