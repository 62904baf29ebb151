//! Runtime settings loaded from an optional TOML file.
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! the config file, and `FERMWATCH_`-prefixed environment variables. CLI
//! flags are applied on top by `main`.
//!
//! # Example file
//!
//! ```toml
//! [sampler]
//! tick_ms = 2000
//!
//! [thresholds.temperature]
//! normal = { min = 22.0, max = 28.0 }
//! warning = { min = 20.0, max = 30.0 }
//! ```

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::Thresholds;

/// Default sampler period in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 2000;

/// Top-level settings for the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sampler: SamplerSettings,
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Sampler timing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerSettings {
    /// Period between readings while connected, in milliseconds.
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sampler: SamplerSettings {
                tick_ms: DEFAULT_TICK_MS,
            },
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings, merging defaults, an optional file, and environment
    /// variables (e.g. `FERMWATCH_SAMPLER__TICK_MS=500`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().set_default("sampler.tick_ms", DEFAULT_TICK_MS)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("FERMWATCH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Sampler period as a `Duration`.
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sampler.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.sampler.tick_ms, 2000);
        assert_eq!(settings.thresholds, Thresholds::default());
    }

    #[test]
    fn test_file_overrides_sampler_and_one_metric() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[sampler]
tick_ms = 500

[thresholds.temperature]
normal = {{ min = 30.0, max = 38.0 }}
warning = {{ min = 28.0, max = 40.0 }}
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.sampler.tick_ms, 500);
        assert_eq!(settings.thresholds.temperature.normal.min, 30.0);
        assert_eq!(settings.thresholds.temperature.warning.max, 40.0);

        // Untouched metrics keep their defaults
        assert_eq!(settings.thresholds.ph, Thresholds::default().ph);
    }

    #[test]
    fn test_tick_period_conversion() {
        let settings = Settings::default();
        assert_eq!(settings.tick_period(), std::time::Duration::from_millis(2000));
    }
}
