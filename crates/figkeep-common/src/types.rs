//! Domain primitive types used across the figkeep workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FigkeepError;

/// Identifier of an open plot window, as numbered by the window system.
///
/// Lower numbers were opened first; the event pump prefers the lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(u32);

impl WindowId {
    /// Creates a window id from its number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the window number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen position and size of a window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Which key-press semantics end a hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerKind {
    /// A full line terminated by Enter.
    Enter,
    /// Any single key, read in cbreak mode.
    #[default]
    AnyKey,
}

impl TriggerKind {
    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::AnyKey => "AnyKey",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = FigkeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enter" => Ok(Self::Enter),
            "anykey" | "any_key" | "any-key" => Ok(Self::AnyKey),
            _ => Err(FigkeepError::InvalidArgument {
                message: format!("unknown trigger: {s:?}, expected 'Enter' or 'AnyKey'"),
            }),
        }
    }
}

impl TryFrom<String> for TriggerKind {
    type Error = FigkeepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerKind> for String {
    fn from(kind: TriggerKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// Outcome of a nonblocking `show` or `refresh` attempt.
///
/// Constructed once per call and returned to the caller so the display
/// path taken is observable without scraping logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowStatus {
    /// Backend name reported by the window system.
    pub backend: String,
    /// Whether the caller asked for nonblocking behavior.
    pub nonblocking_requested: bool,
    /// Whether the nonblocking path actually ran.
    pub nonblocking_used: bool,
    /// Short human-readable explanation.
    pub reason: String,
}
