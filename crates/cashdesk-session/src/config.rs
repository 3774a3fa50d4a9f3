//! # Register Configuration
//!
//! Settings a register session is started with.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CASHDESK_*`)
//! 2. Config file (`cashdesk.toml`)
//! 3. Defaults (this file)
//!
//! ## Example `cashdesk.toml`
//! ```toml
//! initial_discount = 20
//! notices = "log"
//! log_filter = "info,cashdesk=trace"
//! ```
//!
//! A bad `initial_discount` is not a config error: it goes through the same
//! validation as any discount and degrades to zero with a notice.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use cashdesk_core::{DiscountInput, Ledger, NoticeSink, SilentSink};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};
use crate::sink::{ConsoleSink, TracingSink};
use crate::state::RegisterState;

/// Environment variable overriding `initial_discount`.
pub const ENV_DISCOUNT: &str = "CASHDESK_DISCOUNT";
/// Environment variable overriding `notices`.
pub const ENV_NOTICES: &str = "CASHDESK_NOTICES";
/// Environment variable overriding `log_filter`.
pub const ENV_LOG_FILTER: &str = "CASHDESK_LOG";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,cashdesk=debug";

// =============================================================================
// RegisterConfig
// =============================================================================

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterConfig {
    /// Discount the ledger starts with, as written by the operator.
    pub initial_discount: DiscountSetting,

    /// Where ledger notices go.
    pub notices: NoticeOutput,

    /// Tracing filter directive (`RUST_LOG` still wins).
    pub log_filter: String,
}

/// A discount as it appears in a config file: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscountSetting {
    Percent(i64),
    Fraction(f64),
    Text(String),
}

impl From<DiscountSetting> for DiscountInput {
    fn from(setting: DiscountSetting) -> Self {
        match setting {
            DiscountSetting::Percent(value) => DiscountInput::Integer(value),
            DiscountSetting::Fraction(value) => DiscountInput::Float(value),
            DiscountSetting::Text(text) => DiscountInput::Text(text),
        }
    }
}

/// Notice delivery target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeOutput {
    /// One line per notice on stdout.
    #[default]
    Console,
    /// Tracing events (WARN / INFO).
    Log,
    /// Dropped.
    Silent,
}

impl NoticeOutput {
    /// Builds the sink this setting stands for.
    pub fn sink(self) -> Arc<dyn NoticeSink> {
        match self {
            NoticeOutput::Console => Arc::new(ConsoleSink::stdout()),
            NoticeOutput::Log => Arc::new(TracingSink),
            NoticeOutput::Silent => Arc::new(SilentSink),
        }
    }
}

impl FromStr for NoticeOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" | "stdout" => Ok(NoticeOutput::Console),
            "log" | "tracing" => Ok(NoticeOutput::Log),
            "silent" | "none" | "off" => Ok(NoticeOutput::Silent),
            other => Err(format!("unknown notice output '{other}'")),
        }
    }
}

impl Default for RegisterConfig {
    /// ## Default Values
    /// - Discount: 0
    /// - Notices: console
    /// - Log filter: `info,cashdesk=debug`
    fn default() -> Self {
        RegisterConfig {
            initial_discount: DiscountSetting::Percent(0),
            notices: NoticeOutput::Console,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RegisterConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded register config");
        Self::from_toml_str(&text)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        let mut config = RegisterConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Applies `CASHDESK_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup.
    ///
    /// ## Variables
    /// - `CASHDESK_DISCOUNT`: discount text, validated when the ledger is built
    /// - `CASHDESK_NOTICES`: `console` | `log` | `silent` (unknown values are ignored)
    /// - `CASHDESK_LOG`: tracing filter
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(discount) = lookup(ENV_DISCOUNT) {
            self.initial_discount = DiscountSetting::Text(discount);
        }

        if let Some(notices) = lookup(ENV_NOTICES) {
            match notices.parse() {
                Ok(output) => self.notices = output,
                Err(reason) => warn!(%reason, "Ignoring {ENV_NOTICES}"),
            }
        }

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            self.log_filter = filter;
        }
    }

    /// Same as [`apply_overrides`](Self::apply_overrides) with a fixed map.
    pub fn apply_override_map(&mut self, vars: &HashMap<String, String>) {
        self.apply_overrides(|key| vars.get(key).cloned());
    }

    /// Creates a fresh ledger with this configuration.
    pub fn build_ledger(&self) -> Ledger {
        Ledger::with_sink(self.initial_discount.clone(), self.notices.sink())
    }

    /// Creates a shared register around a fresh ledger.
    pub fn build_state(&self) -> RegisterState {
        RegisterState::new(self.build_ledger())
    }
}
