//! Runtime configuration parsed from environment variables.

use dragdrop::SessionOptions;
use dragdrop::consts::DEFAULT_CHANNEL;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Channel used by zones and drags that do not name one.
    pub channel: String,
    /// Session behavior shared by every drag.
    pub session: SessionOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self { channel: DEFAULT_CHANNEL.to_owned(), session: SessionOptions::default() }
    }
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `DRAGBOARD_CHANNEL`: default channel name (default `default`)
    /// - `DRAGBOARD_LEAVE_ON_CANCEL`: `true`/`false`/`1`/`0` (default `true`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let channel = lookup("DRAGBOARD_CHANNEL").unwrap_or_else(|| DEFAULT_CHANNEL.to_owned());
        if channel.trim().is_empty() {
            return Err(AppError::Config("DRAGBOARD_CHANNEL must not be empty".into()));
        }
        let leave_on_cancel =
            parse_bool("DRAGBOARD_LEAVE_ON_CANCEL", lookup("DRAGBOARD_LEAVE_ON_CANCEL").as_deref(), true)?;

        Ok(Self { channel, session: SessionOptions { leave_on_cancel } })
    }
}

fn parse_bool(key: &str, raw: Option<&str>, default: bool) -> Result<bool, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::Config(format!("invalid {key}: {other} (expected true or false)"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
