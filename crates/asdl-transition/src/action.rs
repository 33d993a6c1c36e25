//! Tree construction actions.

use std::fmt;

use asdl_core::Production;
use serde::{Deserialize, Serialize};

/// Token closing a multi-token primitive value.
pub const STOP_TOKEN: &str = "</primitive>";

/// One step of building a tree top-down, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Expand the frontier composite field with a node for the production.
    ApplyRule(Production),
    /// Emit a primitive token ([`STOP_TOKEN`] ends a multi-token value).
    GenToken(String),
    /// Close an `optional`/`multiple` frontier field.
    Reduce,
}

/// Discriminant of an [`Action`], used by the continuation oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    ApplyRule,
    GenToken,
    Reduce,
}

impl Action {
    pub fn gen_token(token: impl Into<String>) -> Self {
        Self::GenToken(token.into())
    }

    pub fn stop() -> Self {
        Self::GenToken(STOP_TOKEN.to_owned())
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::ApplyRule(_) => ActionKind::ApplyRule,
            Self::GenToken(_) => ActionKind::GenToken,
            Self::Reduce => ActionKind::Reduce,
        }
    }

    pub fn is_stop_signal(&self) -> bool {
        matches!(self, Self::GenToken(token) if token == STOP_TOKEN)
    }

    pub fn production(&self) -> Option<&Production> {
        match self {
            Self::ApplyRule(production) => Some(production),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::GenToken(token) => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplyRule(production) => write!(f, "ApplyRule[{production}]"),
            Self::GenToken(token) => write!(f, "GenToken[{token}]"),
            Self::Reduce => f.write_str("Reduce"),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ApplyRule => "ApplyRule",
            Self::GenToken => "GenToken",
            Self::Reduce => "Reduce",
        })
    }
}
