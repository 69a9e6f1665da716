//! Process configuration
//!
//! Resolved from `TOULMINI_*` environment variables or a JSON file, then
//! optionally adjusted with `key=value` overrides. A resolved [`Config`] is a
//! plain value: chains take a [`BreakerPolicy`] snapshot of it at creation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breaker::BreakerPolicy;
use crate::error::{ToulminError, ToulminResult};
use crate::observability::{Logger, Severity};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TOULMINI_";

/// Configuration keys, in the order they are reported
pub const CONFIG_KEYS: [&str; 6] = [
    "enable_council",
    "strict_mode",
    "fail_on_weak_warrant",
    "fail_on_weak_backing",
    "debug",
    "log_level",
];

/// Raw values read as false. Anything else that is set reads as true.
const FALSE_VALUES: [&str; 4] = ["0", "false", "no", "off"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Advertise the council review step in phase tickets (default: true)
    #[serde(default = "default_true")]
    pub enable_council: bool,

    /// Master switch for the circuit breakers (default: true)
    #[serde(default = "default_true")]
    pub strict_mode: bool,

    /// Reject weak/irrelevant warrants when strict (default: true)
    #[serde(default = "default_true")]
    pub fail_on_weak_warrant: bool,

    /// Reject weak/irrelevant backing when strict (default: true)
    #[serde(default = "default_true")]
    pub fail_on_weak_backing: bool,

    /// Verbose logging; forces the DEBUG threshold (default: false)
    #[serde(default)]
    pub debug: bool,

    /// One of DEBUG, INFO, WARNING, ERROR, CRITICAL (default: "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Raw environment values seen at resolution, `None` when unset.
    /// Accepted in files so printed configs load back, then discarded.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub initial_env: BTreeMap<String, Option<String>>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_council: true,
            strict_mode: true,
            fail_on_weak_warrant: true,
            fail_on_weak_backing: true,
            debug: false,
            log_level: default_log_level(),
            initial_env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Resolve from the process environment
    pub fn from_env() -> ToulminResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    ///
    /// Unset variables take defaults. The log level is upper-cased before it
    /// is validated.
    pub fn from_lookup<F>(lookup: F) -> ToulminResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        for key in CONFIG_KEYS {
            let name = env_name(key);
            let raw = lookup(&name);
            if let Some(value) = &raw {
                config.set(key, value)?;
            }
            config.initial_env.insert(name, raw);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    ///
    /// Missing keys take defaults; unknown keys are rejected.
    pub fn load(path: &Path) -> ToulminResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ToulminError::configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| ToulminError::configuration(format!("Invalid config JSON: {}", e)))?;

        config.initial_env.clear();
        config.log_level = config.log_level.trim().to_uppercase();
        config.validate()?;
        Ok(config)
    }

    /// Returns a fresh config with one key replaced.
    ///
    /// Values are parsed the way environment variables are.
    pub fn with_override(&self, key: &str, value: &str) -> ToulminResult<Self> {
        let mut next = self.clone();
        next.set(key, value)?;
        next.validate()?;
        Ok(next)
    }

    fn set(&mut self, key: &str, raw: &str) -> ToulminResult<()> {
        match key {
            "enable_council" => self.enable_council = parse_bool(raw),
            "strict_mode" => self.strict_mode = parse_bool(raw),
            "fail_on_weak_warrant" => self.fail_on_weak_warrant = parse_bool(raw),
            "fail_on_weak_backing" => self.fail_on_weak_backing = parse_bool(raw),
            "debug" => self.debug = parse_bool(raw),
            "log_level" => self.log_level = raw.trim().to_uppercase(),
            _ => {
                return Err(ToulminError::configuration(format!(
                    "Unknown configuration key '{}': expected one of {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ToulminResult<()> {
        self.log_level.parse::<Severity>()?;
        Ok(())
    }

    /// Breaker policy snapshot for new chains
    pub fn policy(&self) -> BreakerPolicy {
        BreakerPolicy {
            strict_mode: self.strict_mode,
            fail_on_weak_warrant: self.fail_on_weak_warrant,
            fail_on_weak_backing: self.fail_on_weak_backing,
        }
    }

    /// Effective log threshold. `debug` forces DEBUG.
    pub fn log_threshold(&self) -> Severity {
        if self.debug {
            return Severity::Debug;
        }
        self.log_level.parse().unwrap_or(Severity::Info)
    }

    /// Stderr logger at the effective threshold
    pub fn logger(&self) -> Logger {
        Logger::new(self.log_threshold())
    }
}

/// `strict_mode` -> `TOULMINI_STRICT_MODE`
pub fn env_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

fn parse_bool(raw: &str) -> bool {
    !FALSE_VALUES.contains(&raw.trim().to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToulminErrorCode;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enable_council);
        assert!(config.strict_mode);
        assert!(!config.debug);
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.policy(), BreakerPolicy::strict());
    }

    #[test]
    fn test_bool_parsing() {
        for raw in ["0", "false", "NO", " Off "] {
            assert!(!parse_bool(raw), "{}", raw);
        }
        for raw in ["1", "true", "yes", "anything", ""] {
            assert!(parse_bool(raw), "{}", raw);
        }
    }

    #[test]
    fn test_from_lookup_reads_prefixed_names() {
        let config = Config::from_lookup(lookup_from(&[
            ("TOULMINI_STRICT_MODE", "off"),
            ("TOULMINI_LOG_LEVEL", "warning"),
        ]))
        .unwrap();
        assert!(!config.strict_mode);
        assert_eq!(config.log_level, "WARNING");
        assert_eq!(config.initial_env["TOULMINI_STRICT_MODE"], Some("off".to_string()));
        assert_eq!(config.initial_env["TOULMINI_DEBUG"], None);
        assert_eq!(config.initial_env.len(), CONFIG_KEYS.len());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[("TOULMINI_LOG_LEVEL", "verbose")])).unwrap_err();
        assert_eq!(err.code(), ToulminErrorCode::InvalidConfiguration);
    }

    #[test]
    fn test_override_returns_fresh_value() {
        let base = Config::default();
        let relaxed = base.with_override("fail_on_weak_backing", "false").unwrap();
        assert!(base.fail_on_weak_backing);
        assert!(!relaxed.fail_on_weak_backing);
        assert!(!relaxed.policy().gates_backing());
    }

    #[test]
    fn test_unknown_override_key_rejected() {
        let err = Config::default().with_override("council_size", "3").unwrap_err();
        assert!(err.message().contains("council_size"));
    }

    #[test]
    fn test_debug_forces_debug_threshold() {
        let config = Config::default().with_override("log_level", "error").unwrap();
        assert_eq!(config.log_threshold(), Severity::Error);
        let config = config.with_override("debug", "1").unwrap();
        assert_eq!(config.log_threshold(), Severity::Debug);
    }
}
