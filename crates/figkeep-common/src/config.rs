//! Configuration models for holding, showing, and refreshing windows.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANY_KEY_PROMPT, DEFAULT_PAUSE, DEFAULT_POLL_INTERVAL, ENTER_PROMPT, ENV_ONLY_IF_TTY,
    ENV_POLL_MS, ENV_TRIGGER,
};
use crate::error::{FigkeepError, Result};
use crate::types::TriggerKind;

/// What to print before the hold loop starts waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// The stock prompt for the configured trigger.
    #[default]
    Default,
    /// Print nothing.
    Silent,
    /// Print this text instead.
    Text(String),
}

impl Prompt {
    /// Resolves the text to print for `trigger`, or `None` when silent.
    #[must_use]
    pub fn resolve(&self, trigger: TriggerKind) -> Option<&str> {
        match self {
            Self::Default => Some(match trigger {
                TriggerKind::AnyKey => ANY_KEY_PROMPT,
                TriggerKind::Enter => ENTER_PROMPT,
            }),
            Self::Silent => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Configuration of one `hold_windows` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Tick granularity: how long each event pump may run.
    #[serde(with = "millis")]
    pub poll_interval: Duration,
    /// Prompt printed once before waiting.
    pub prompt: Prompt,
    /// Key-press semantics that end the hold.
    pub trigger: TriggerKind,
    /// Skip the hold entirely when standard input is not a terminal.
    pub only_if_tty: bool,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            prompt: Prompt::Default,
            trigger: TriggerKind::AnyKey,
            only_if_tty: true,
        }
    }
}

impl HoldConfig {
    /// Sets the tick granularity.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: Prompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Suppresses the prompt.
    #[must_use]
    pub fn silent(self) -> Self {
        self.prompt(Prompt::Silent)
    }

    /// Sets the trigger kind.
    #[must_use]
    pub const fn trigger(mut self, trigger: TriggerKind) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets the trigger from its name.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::InvalidArgument`] for an unknown name.
    pub fn trigger_named(self, name: &str) -> Result<Self> {
        Ok(self.trigger(name.parse()?))
    }

    /// Sets whether a non-interactive standard input skips the hold.
    #[must_use]
    pub const fn only_if_tty(mut self, only_if_tty: bool) -> Self {
        self.only_if_tty = only_if_tty;
        self
    }

    /// Overlays `FIGKEEP_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::InvalidArgument`] if an override is malformed.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::InvalidArgument`] if an override is malformed.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(ms) = lookup(ENV_POLL_MS) {
            let ms: u64 = ms.trim().parse().map_err(|_| FigkeepError::InvalidArgument {
                message: format!("{ENV_POLL_MS} must be milliseconds, got {ms:?}"),
            })?;
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(name) = lookup(ENV_TRIGGER) {
            self.trigger = name.parse()?;
        }
        if let Some(flag) = lookup(ENV_ONLY_IF_TTY) {
            self.only_if_tty = parse_flag(ENV_ONLY_IF_TTY, &flag)?;
        }
        Ok(self)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FigkeepError::InvalidArgument {
            message: format!("{key} must be a boolean, got {value:?}"),
        }),
    }
}

/// Options for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowOptions {
    /// Hand control to the window system's blocking show.
    pub block: bool,
    /// How long the nonblocking path pumps events.
    #[serde(with = "millis")]
    pub pause: Duration,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            block: false,
            pause: DEFAULT_PAUSE,
        }
    }
}

/// Options for `refresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshOptions {
    /// How long to pump events.
    #[serde(with = "millis")]
    pub pause: Duration,
    /// Try to raise the refreshed window afterwards.
    pub in_foreground: bool,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            pause: DEFAULT_PAUSE,
            in_foreground: false,
        }
    }
}

/// Serializes a [`Duration`] as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
