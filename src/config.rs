//! Feed configuration.
//!
//! [`FeedConfig`] holds the knobs a deployment tunes: how often ads appear,
//! whether advertiser order is shuffled per session, and the storage namespace
//! for session seeds. Values come from defaults, an optional TOML file
//! (`config-file` feature) and `FEEDWEAVE_*` environment overrides, in that
//! order.

use crate::feed::{Cadence, InvalidCadence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding [`FeedConfig::ad_cadence`].
pub const ENV_AD_CADENCE: &str = "FEEDWEAVE_AD_CADENCE";
/// Environment variable overriding [`FeedConfig::shuffle_advertisers`].
pub const ENV_SHUFFLE_ADVERTISERS: &str = "FEEDWEAVE_SHUFFLE_ADVERTISERS";
/// Environment variable overriding [`FeedConfig::seed_namespace`].
pub const ENV_SEED_NAMESPACE: &str = "FEEDWEAVE_SEED_NAMESPACE";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`FeedConfig`].
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// The configured cadence is not positive.
    #[error(transparent)]
    InvalidCadence(#[from] InvalidCadence),
    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// The seed namespace is empty.
    #[error("seed namespace must not be empty")]
    EmptyNamespace,
}

/// Feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// One ad slot before every `ad_cadence`-th post.
    pub ad_cadence: Cadence,
    /// Shuffle advertisers with the session seed before interleaving.
    pub shuffle_advertisers: bool,
    /// Storage namespace for persisted session seeds.
    pub seed_namespace: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ad_cadence: Cadence::DEFAULT,
            shuffle_advertisers: true,
            seed_namespace: "feed-ad-seed".to_owned(),
        }
    }
}

impl FeedConfig {
    /// Sets the ad cadence.
    #[must_use]
    pub const fn with_ad_cadence(mut self, cadence: Cadence) -> Self {
        self.ad_cadence = cadence;
        self
    }

    /// Enables or disables per-session advertiser shuffling.
    #[must_use]
    pub const fn with_shuffle_advertisers(mut self, shuffle: bool) -> Self {
        self.shuffle_advertisers = shuffle;
        self
    }

    /// Sets the seed storage namespace.
    #[must_use]
    pub fn with_seed_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.seed_namespace = namespace.into();
        self
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(())
    }

    /// Parses a TOML document. Missing keys take their defaults.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    #[cfg(feature = "config-file")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies `FEEDWEAVE_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Applies `FEEDWEAVE_*` overrides from an arbitrary lookup.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_AD_CADENCE) {
            let value: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_AD_CADENCE,
                value: raw.clone(),
            })?;
            self.ad_cadence = Cadence::try_from(value)?;
        }
        if let Some(raw) = lookup(ENV_SHUFFLE_ADVERTISERS) {
            self.shuffle_advertisers =
                parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                    var: ENV_SHUFFLE_ADVERTISERS,
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup(ENV_SEED_NAMESPACE) {
            self.seed_namespace = raw;
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.ad_cadence.get(), 6);
        assert!(config.shuffle_advertisers);
        assert_eq!(config.seed_namespace, "feed-ad-seed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply() {
        let config = FeedConfig::default()
            .apply_env_with(lookup_from(&[
                (ENV_AD_CADENCE, "4"),
                (ENV_SHUFFLE_ADVERTISERS, "off"),
                (ENV_SEED_NAMESPACE, "beta-seed"),
            ]))
            .expect("valid overrides");
        assert_eq!(config.ad_cadence.get(), 4);
        assert!(!config.shuffle_advertisers);
        assert_eq!(config.seed_namespace, "beta-seed");
    }

    #[test]
    fn env_rejects_zero_cadence() {
        let err = FeedConfig::default()
            .apply_env_with(lookup_from(&[(ENV_AD_CADENCE, "0")]))
            .expect_err("zero cadence");
        assert!(matches!(err, ConfigError::InvalidCadence(_)));
    }

    #[test]
    fn env_rejects_garbage() {
        let err = FeedConfig::default()
            .apply_env_with(lookup_from(&[(ENV_SHUFFLE_ADVERTISERS, "maybe")]))
            .expect_err("bad bool");
        assert!(err.to_string().contains(ENV_SHUFFLE_ADVERTISERS));

        let err = FeedConfig::default()
            .apply_env_with(lookup_from(&[(ENV_AD_CADENCE, "six")]))
            .expect_err("bad int");
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn empty_namespace_rejected() {
        let config = FeedConfig::default().with_seed_namespace("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyNamespace)));
    }

    #[test]
    fn builders_chain() {
        let config = FeedConfig::default()
            .with_ad_cadence(Cadence::new(2).expect("positive"))
            .with_shuffle_advertisers(false);
        assert_eq!(config.ad_cadence.get(), 2);
        assert!(!config.shuffle_advertisers);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn parses_toml() {
        let config = FeedConfig::from_toml_str(
            r#"
ad_cadence = 8
shuffle_advertisers = false
"#,
        )
        .expect("valid toml");
        assert_eq!(config.ad_cadence.get(), 8);
        assert!(!config.shuffle_advertisers);
        assert_eq!(config.seed_namespace, "feed-ad-seed");
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_rejects_zero_cadence_and_unknown_keys() {
        assert!(FeedConfig::from_toml_str("ad_cadence = 0").is_err());
        assert!(FeedConfig::from_toml_str("cadence = 3").is_err());
    }
}
