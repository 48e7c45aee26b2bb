//! Driver configuration: device address and polling behavior.
//!
//! Values come from defaults, an optional serialized config (any serde
//! format), and `TIC_*` environment overrides, applied in that order.

use std::env::VarError;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tic_protocol::{DEFAULT_ADDRESS, MAX_ADDRESS};

use crate::error::ConfigError;
use crate::poll::{DEFAULT_POLL_INTERVAL, PollPolicy};

pub const ADDRESS_ENV: &str = "TIC_I2C_ADDRESS";
pub const POLL_INTERVAL_ENV: &str = "TIC_POLL_INTERVAL_MS";
pub const POLL_MAX_ATTEMPTS_ENV: &str = "TIC_POLL_MAX_ATTEMPTS";
pub const POLL_TIMEOUT_ENV: &str = "TIC_POLL_TIMEOUT_MS";

/// Polling settings used by the handle's default waits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub max_attempts: Option<u32>,
    pub timeout_ms: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            max_attempts: None,
            timeout_ms: None,
        }
    }
}

impl PollConfig {
    pub fn to_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.interval_ms),
            max_attempts: self.max_attempts,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Configuration for one Tic on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicConfig {
    /// 7-bit I2C address.
    pub address: u8,
    pub poll: PollConfig,
}

impl Default for TicConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            poll: PollConfig::default(),
        }
    }
}

impl TicConfig {
    pub fn with_address(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Check the values a serialized config or override could get wrong.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] for addresses above 0x7F and
    /// [`ConfigError::ZeroAttempts`] for an attempt limit of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_address(self.address)?;
        if self.poll.max_attempts == Some(0) {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Defaults with overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override is not UTF-8, cannot be parsed,
    /// or the result does not validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_overrides(|key| env_value(key, std::env::var(key)))
    }

    /// Apply `TIC_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparseable values, or the
    /// [`validate`](Self::validate) error for the merged config.
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_overrides(|key| Ok(lookup(key)))
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
    {
        if let Some(raw) = lookup(ADDRESS_ENV)? {
            self.address = parse_address(&raw).ok_or_else(|| invalid(ADDRESS_ENV, &raw))?;
        }
        if let Some(raw) = lookup(POLL_INTERVAL_ENV)? {
            self.poll.interval_ms = parse_number(&raw).ok_or_else(|| invalid(POLL_INTERVAL_ENV, &raw))?;
        }
        if let Some(raw) = lookup(POLL_MAX_ATTEMPTS_ENV)? {
            self.poll.max_attempts =
                parse_optional(&raw).ok_or_else(|| invalid(POLL_MAX_ATTEMPTS_ENV, &raw))?;
        }
        if let Some(raw) = lookup(POLL_TIMEOUT_ENV)? {
            self.poll.timeout_ms =
                parse_optional(&raw).ok_or_else(|| invalid(POLL_TIMEOUT_ENV, &raw))?;
        }
        self.validate()?;
        Ok(self)
    }
}

/// An unset variable is no override; a non-UTF-8 value is an error.
fn env_value(
    key: &'static str,
    var: Result<String, VarError>,
) -> Result<Option<String>, ConfigError> {
    match var {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(invalid(key, &raw.to_string_lossy())),
    }
}

pub(crate) fn validate_address(address: u8) -> Result<(), ConfigError> {
    if address > MAX_ADDRESS {
        return Err(ConfigError::InvalidAddress(address));
    }
    Ok(())
}

fn invalid(key: &'static str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    }
}

/// Decimal, or hex with a `0x` prefix.
fn parse_address(value: &str) -> Option<u8> {
    let t = value.trim();
    match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => t.parse::<u8>().ok(),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse::<T>().ok()
}

/// `none`/`off`/empty clear the limit; anything else must be a number.
fn parse_optional<T: std::str::FromStr>(value: &str) -> Option<Option<T>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "off" | "unbounded" => Some(None),
        other => parse_number(other).map(Some),
    }
}
