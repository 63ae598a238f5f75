//! # Configuration
//!
//! Settings for hosts of the calculator engine, loaded in layers:
//!
//! 1. Default values (compile-time)
//! 2. Config file (`buildcalc.toml`, or the path in `BUILDCALC_CONFIG`)
//! 3. Environment variables (`BUILDCALC_*`)
//!
//! Each layer overrides the previous. Saved [preferences](crate::preferences)
//! are applied on top by the host.
//!
//! ## File format
//!
//! ```toml
//! [display]
//! currency = "EUR"
//! locale = "de-DE"
//!
//! [storage]
//! preferences_path = "/home/me/.config/buildcalc/preferences.json"
//!
//! [logging]
//! filter = "calc_core=debug"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{Currency, Formatter, NumberLocale};
use crate::errors::{CalcError, CalcResult};
use crate::file_io::DEFAULT_PREFERENCES_FILE;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "buildcalc.toml";

pub const ENV_CONFIG: &str = "BUILDCALC_CONFIG";
pub const ENV_CURRENCY: &str = "BUILDCALC_CURRENCY";
pub const ENV_LOCALE: &str = "BUILDCALC_LOCALE";
pub const ENV_PREFERENCES: &str = "BUILDCALC_PREFERENCES";
pub const ENV_LOG: &str = "BUILDCALC_LOG";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// All host settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from TOML. Missing sections and keys keep defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError { reason: e.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency: Currency,
    pub locale: NumberLocale,
}

impl DisplaySettings {
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.locale, self.currency)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub preferences_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```rust,no_run
/// use calc_core::config::ConfigLoader;
///
/// let settings = ConfigLoader::new()
///     .with_config_file("buildcalc.toml")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), calc_core::errors::CalcError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Explicit config file; must exist when set
    config_file: Option<PathBuf>,
    skip_env: bool,
    /// Replaces the process environment when set
    env_override: Option<BTreeMap<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this config file instead of the default lookup.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Read `BUILDCALC_*` values from this map instead of the process
    /// environment.
    #[must_use]
    pub fn with_env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_override = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// `CalcError::ConfigError` if an explicitly named config file is
    /// missing, any config file cannot be parsed, or an environment value is
    /// invalid. A missing default config file is ignored.
    pub fn load(&self) -> CalcResult<Settings> {
        let mut settings = Settings::default();

        let (path, required) = self.config_path();
        if let Some(file_settings) = load_file(&path, required)? {
            debug!(path = %path.display(), "Loaded config file");
            settings = file_settings;
        }

        if !self.skip_env {
            self.apply_env_vars(&mut settings)?;
        }

        Ok(settings)
    }

    /// Config file to read and whether it must exist.
    fn config_path(&self) -> (PathBuf, bool) {
        if let Some(path) = &self.config_file {
            return (path.clone(), true);
        }
        if !self.skip_env {
            if let Some(path) = self.env_var(ENV_CONFIG) {
                return (PathBuf::from(path), true);
            }
        }
        (PathBuf::from(DEFAULT_CONFIG_FILE), false)
    }

    /// Non-blank value of an environment variable.
    fn env_var(&self, key: &str) -> Option<String> {
        let value = match &self.env_override {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(&self, settings: &mut Settings) -> CalcResult<()> {
        if let Some(val) = self.env_var(ENV_CURRENCY) {
            settings.display.currency = val
                .parse()
                .map_err(|e: CalcError| CalcError::config_error(ENV_CURRENCY, e.to_string()))?;
        }
        if let Some(val) = self.env_var(ENV_LOCALE) {
            settings.display.locale = val
                .parse()
                .map_err(|e: CalcError| CalcError::config_error(ENV_LOCALE, e.to_string()))?;
        }
        if let Some(val) = self.env_var(ENV_PREFERENCES) {
            settings.storage.preferences_path = PathBuf::from(val);
        }
        if let Some(val) = self.env_var(ENV_LOG) {
            settings.logging.filter = val;
        }
        Ok(())
    }
}

/// Loads a config file, returning None if an optional file doesn't exist.
fn load_file(path: &Path, required: bool) -> CalcResult<Option<Settings>> {
    if !path.exists() {
        if required {
            return Err(CalcError::config_error(path.display().to_string(), "file not found"));
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
    let settings =
        Settings::from_toml(&content).map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("buildcalc.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_defaults_only() {
        let temp = TempDir::new().unwrap();
        let settings = ConfigLoader::new()
            .with_config_file(create_config_file(temp.path(), ""))
            .skip_env_vars()
            .load()
            .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.display.formatter(), Formatter::default());
    }

    #[test]
    fn load_config_file() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
[display]
currency = "EUR"
locale = "de-DE"
"#,
        );

        let settings = ConfigLoader::new().with_config_file(&path).skip_env_vars().load().unwrap();
        assert_eq!(settings.display.currency, Currency::Eur);
        assert_eq!(settings.display.locale, NumberLocale::DeDe);
        // untouched sections keep defaults
        assert_eq!(settings.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(
            temp.path(),
            r#"
[display]
currency = "EUR"

[logging]
filter = "info"
"#,
        );

        let settings = ConfigLoader::new()
            .with_config_file(&path)
            .with_env_vars([(ENV_CURRENCY, "gbp"), (ENV_PREFERENCES, "/tmp/prefs.json")])
            .load()
            .unwrap();
        assert_eq!(settings.display.currency, Currency::Gbp);
        assert_eq!(settings.storage.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn env_names_config_file() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "[display]\nlocale = \"fr-FR\"\n");

        let settings = ConfigLoader::new()
            .with_env_vars([(ENV_CONFIG, path.display().to_string())])
            .load()
            .unwrap();
        assert_eq!(settings.display.locale, NumberLocale::FrFr);
    }

    #[test]
    fn invalid_env_value() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "");
        let err = ConfigLoader::new()
            .with_config_file(&path)
            .with_env_vars([(ENV_LOCALE, "xx-YY")])
            .load()
            .unwrap_err();
        assert!(matches!(err, CalcError::ConfigError { ref source_name, .. } if source_name == ENV_LOCALE));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let err = ConfigLoader::new()
            .with_config_file("/nonexistent/path/buildcalc.toml")
            .skip_env_vars()
            .load()
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn malformed_toml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = create_config_file(temp.path(), "[display\ncurrency = ");
        assert!(ConfigLoader::new().with_config_file(&path).skip_env_vars().load().is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let mut settings = Settings::default();
        settings.display.currency = Currency::Cad;
        let text = settings.to_toml().unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }
}
