//! Counter operation parsing.
//!
//! Handles everything after the `c` keyword: a target (`2` or `@abc`) and an
//! optional operation (`5`, `+1`, `+ 1`, `%4`, `^-0.12`).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ParseError;

static TARGET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([0-9]+)|@(\w+))$").unwrap_or_else(|e| panic!("Invalid target regex: {e}"))
});

static UNSIGNED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap_or_else(|e| panic!("Invalid number regex: {e}"))
});

static SIGNED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").unwrap_or_else(|e| panic!("Invalid number regex: {e}"))
});

/// Which objects a command refers to: an index (or PID) or a label.
///
/// Indices keep their digits as typed; the server decides whether they exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Index(String),
    Label(String),
}

impl Target {
    /// Parse `123` or `@name`.
    ///
    /// Returns `None` if the token is neither.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let caps = TARGET_PATTERN.captures(token)?;
        match (caps.get(1), caps.get(2)) {
            (Some(index), _) => Some(Self::Index(index.as_str().to_string())),
            (None, label) => label.map(|l| Self::Label(l.as_str().to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Label(label) => write!(f, "@{label}"),
        }
    }
}

/// Arithmetic applied to a counter's stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    /// Map an operator character to an operator.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
            Self::Power => '^',
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A number as the user typed it.
///
/// The textual form is what goes on the wire, so `4` stays `4` and
/// `0.50` stays `0.50`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operand(String);

impl Operand {
    fn signed(text: &str) -> Option<Self> {
        SIGNED_PATTERN.is_match(text).then(|| Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the operand was written without a fractional part.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        !self.0.contains('.')
    }
}

impl Default for Operand {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully parsed counter mutation.
///
/// Without an operator the operand is the counter's new absolute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterOperation {
    pub target: Target,
    pub operator: Option<Operator>,
    pub operand: Operand,
}

impl CounterOperation {
    /// Wire payload: `<target> <value>` or `<target> <op> <operand>`.
    #[must_use]
    pub fn payload(&self) -> String {
        match self.operator {
            Some(op) => format!("{} {op} {}", self.target, self.operand),
            None => format!("{} {}", self.target, self.operand),
        }
    }
}

/// Parse the tokens following the `c` keyword.
///
/// # Errors
///
/// - [`ParseError::MissingCounterTarget`] if there is no target token
/// - [`ParseError::InvalidCounterTarget`] if the target is not an index or `@label`
/// - [`ParseError::InvalidCounterExpression`] if the operation has an unknown shape
/// - [`ParseError::NonIntegerModulo`] if `%` is given a fractional operand
pub fn parse_counter<S: AsRef<str>>(tokens: &[S]) -> Result<CounterOperation, ParseError> {
    let (target_token, rest) = tokens.split_first().ok_or(ParseError::MissingCounterTarget)?;
    let target_token = target_token.as_ref();
    let target = Target::parse(target_token)
        .ok_or_else(|| ParseError::InvalidCounterTarget(target_token.to_string()))?;

    let rest: Vec<&str> = rest.iter().map(|t| t.as_ref()).collect();
    let invalid = || ParseError::InvalidCounterExpression(rest.join(" "));

    let (operator, operand) = match rest.as_slice() {
        [] => (None, Operand::default()),
        [value] if UNSIGNED_PATTERN.is_match(value) => (None, Operand((*value).to_string())),
        [joined] => {
            let mut chars = joined.chars();
            let op = chars.next().and_then(Operator::from_char).ok_or_else(invalid)?;
            let operand = Operand::signed(chars.as_str()).ok_or_else(invalid)?;
            (Some(op), operand)
        },
        [op, value] => {
            let op = Operator::from_token(op).ok_or_else(invalid)?;
            let operand = Operand::signed(value).ok_or_else(invalid)?;
            (Some(op), operand)
        },
        _ => return Err(invalid()),
    };

    if operator == Some(Operator::Modulo) && !operand.is_integral() {
        return Err(ParseError::NonIntegerModulo(operand.to_string()));
    }

    Ok(CounterOperation {
        target,
        operator,
        operand,
    })
}
