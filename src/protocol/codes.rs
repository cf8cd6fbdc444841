//! Numeric codes of the polydown wire protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the server should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Create a time object.
    Add,
    /// List all objects.
    List,
    /// Remove objects.
    Remove,
    /// Print PIDs of objects.
    PidOf,
    /// Print indices of objects.
    Index,
    /// Print object values.
    Cat,
    /// Print object commands.
    Cmd,
    /// Print everything known about objects.
    Stat,
    /// Shut the server down.
    Kill,
}

impl ActionKind {
    pub const ALL: [Self; 9] = [
        Self::Add,
        Self::List,
        Self::Remove,
        Self::PidOf,
        Self::Index,
        Self::Cat,
        Self::Cmd,
        Self::Stat,
        Self::Kill,
    ];

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Add => 0,
            Self::List => 1,
            Self::Remove => 2,
            Self::PidOf => 3,
            Self::Index => 4,
            Self::Cat => 5,
            Self::Cmd => 6,
            Self::Stat => 7,
            Self::Kill => 8,
        }
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Add),
            1 => Some(Self::List),
            2 => Some(Self::Remove),
            3 => Some(Self::PidOf),
            4 => Some(Self::Index),
            5 => Some(Self::Cat),
            6 => Some(Self::Cmd),
            7 => Some(Self::Stat),
            8 => Some(Self::Kill),
            _ => None,
        }
    }

    /// Look up the action named by a command-line keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "add" => Some(Self::Add),
            "ls" | "list" => Some(Self::List),
            "rm" => Some(Self::Remove),
            "pidof" => Some(Self::PidOf),
            "index" => Some(Self::Index),
            "cat" => Some(Self::Cat),
            "cmd" => Some(Self::Cmd),
            "stat" => Some(Self::Stat),
            "kill" => Some(Self::Kill),
            _ => None,
        }
    }

    /// Actions whose arguments are object indices, PIDs or labels.
    #[must_use]
    pub const fn takes_selectors(self) -> bool {
        matches!(
            self,
            Self::Remove | Self::PidOf | Self::Index | Self::Cat | Self::Cmd | Self::Stat
        )
    }

    /// Actions that ignore any arguments.
    #[must_use]
    pub const fn takes_no_arguments(self) -> bool {
        matches!(self, Self::List | Self::Kill)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::List => "list",
            Self::Remove => "rm",
            Self::PidOf => "pidof",
            Self::Index => "index",
            Self::Cat => "cat",
            Self::Cmd => "cmd",
            Self::Stat => "stat",
            Self::Kill => "kill",
        })
    }
}

/// Type of time object created by `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Timer,
    Alarm,
    Stopwatch,
    Counter,
}

impl ObjectKind {
    pub const ALL: [Self; 4] = [Self::Timer, Self::Alarm, Self::Stopwatch, Self::Counter];

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Timer => 0,
            Self::Alarm => 1,
            Self::Stopwatch => 2,
            Self::Counter => 3,
        }
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Timer),
            1 => Some(Self::Alarm),
            2 => Some(Self::Stopwatch),
            3 => Some(Self::Counter),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Timer => "timer",
            Self::Alarm => "alarm",
            Self::Stopwatch => "stopwatch",
            Self::Counter => "counter",
        })
    }
}
