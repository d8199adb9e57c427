//! Server configuration, read from the client's `initializationOptions`.
//!
//! There is no config file. Editors pass options in the `initialize`
//! request, e.g.
//!
//! ```json
//! { "lineTerminator": "\r\n", "diagnostics": true }
//! ```
//!
//! Missing keys fall back to defaults; unknown keys are ignored.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid initialization options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Runtime options for one LSP session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Sent as a completion trigger character alongside space and `"`.
    pub line_terminator: String,
    /// Publish unknown-command diagnostics. When off, stale ones are cleared.
    pub diagnostics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            line_terminator: platform_line_terminator().into(),
            diagnostics: true,
        }
    }
}

/// `\r\n` on Windows, `\n` elsewhere.
pub fn platform_line_terminator() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

impl ServerConfig {
    /// Parse `initializationOptions`. `None` and `null` yield defaults.
    pub fn from_options(options: Option<&Value>) -> Result<Self, ConfigError> {
        match options {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Ok(Self::deserialize(value)?),
        }
    }

    /// Completion trigger characters: space, double quote, line terminator.
    pub fn trigger_characters(&self) -> Vec<String> {
        let mut chars = vec![" ".to_string(), "\"".to_string()];
        if !self.line_terminator.is_empty() {
            chars.push(self.line_terminator.clone());
        }
        chars
    }
}
