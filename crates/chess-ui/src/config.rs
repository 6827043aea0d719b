//! Configuration inputs for a board session.
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty or missing file yields a playable human-vs-computer game.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::heuristic::HeuristicConfig;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Who controls each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans share the board and move both sides.
    #[serde(alias = "pvp")]
    HumanVsHuman,
    /// The human plays white; the computer answers as black.
    #[default]
    #[serde(alias = "pvc")]
    HumanVsComputer,
}

impl GameMode {
    /// The side the computer plays in human-vs-computer mode.
    pub const COMPUTER_COLOR: Color = Color::Black;

    /// Returns true if a human moves the pieces of `color` in this mode.
    pub const fn is_human(self, color: Color) -> bool {
        match self {
            GameMode::HumanVsHuman => true,
            GameMode::HumanVsComputer => matches!(color, Color::White),
        }
    }

    /// The side the computer plays, if any.
    pub const fn computer_color(self) -> Option<Color> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsComputer => Some(Self::COMPUTER_COLOR),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameMode::HumanVsHuman => "human-vs-human",
            GameMode::HumanVsComputer => "human-vs-computer",
        })
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" | "human-vs-human" => Ok(GameMode::HumanVsHuman),
            "pvc" | "human-vs-computer" => Ok(GameMode::HumanVsComputer),
            other => Err(ConfigError::Invalid(format!("unknown game mode: {other}"))),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Game mode. Defaults to human-vs-computer.
    #[serde(default)]
    pub mode: GameMode,
    /// Whether legal-move hints are drawn for the selected piece.
    /// Defaults to true.
    #[serde(default = "default_hints")]
    pub hints: bool,
    /// Visible pause before the computer replies, in milliseconds.
    /// Defaults to 500.
    #[serde(default = "default_computer_delay_ms")]
    pub computer_delay_ms: u64,
    /// Move heuristic tuning.
    #[serde(default)]
    pub heuristic: HeuristicConfig,
}

fn default_hints() -> bool {
    true
}

fn default_computer_delay_ms() -> u64 {
    500
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            mode: GameMode::default(),
            hints: default_hints(),
            computer_delay_ms: default_computer_delay_ms(),
            heuristic: HeuristicConfig::default(),
        }
    }
}

impl UiConfig {
    /// Loads configuration from `path`.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the heuristic weights are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.heuristic;
        for (name, value) in [
            ("capture_weight", h.capture_weight),
            ("trade_bonus", h.trade_bonus),
            ("jitter", h.jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "heuristic.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The computer's reply delay.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}
