// GUI configuration module
pub mod theme;

use anyhow::Context;
use client::BackendSettings;
use serde::Deserialize;
use std::path::Path;

pub use theme::ThemePalette;

/// Overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "STOCK_SIM_BACKEND_URL";
/// Path of a user config file read instead of the embedded default.
pub const CONFIG_PATH_ENV: &str = "STOCK_SIM_CONFIG";

/// Mirrors assets/config/default.json.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub theme: String, // "dark" or "light"
    pub language: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Symbol the price chart opens with.
    pub default_symbol: String,
    pub candle: CandleStyle,
    pub grid: GridStyle,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CandleStyle {
    pub bullish_color: String,
    pub bearish_color: String,
    pub wick_width: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GridStyle {
    pub color: String,
    pub enabled: bool,
}

impl AppConfig {
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig =
            serde_json::from_str(config_str).context("embedded default config is invalid")?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("config file {} is invalid", path.display()))?;
        Ok(config)
    }

    /// Reads the file named by `STOCK_SIM_CONFIG` if set, else the embedded
    /// default, then applies environment overrides and validates.
    pub fn load() -> anyhow::Result<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(path)?,
            _ => Self::load_default()?,
        };
        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.backend.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::info!(base_url = %url, "Backend URL overridden from environment");
            self.backend.base_url = url;
        }
        self
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::by_name(&self.app.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.chart.default_symbol, "AAPL");
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_without_backend_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "version": "0.2.0",
                "app": {{"theme": "light", "language": "en-US"}},
                "chart": {{
                    "width": 640, "height": 320, "margin": 40, "default_symbol": "MSFT",
                    "candle": {{"bullish_color": "#0f0", "bearish_color": "#f00", "wick_width": 1}},
                    "grid": {{"color": "#333", "enabled": false}}
                }}
            }}"##
        )
        .unwrap();
        file.flush().unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.version, "0.2.0");
        assert_eq!(config.backend, BackendSettings::default());
        assert_eq!(config.palette(), ThemePalette::default_light());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = AppConfig::load_from_file("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn test_env_override_replaces_backend_url() {
        let config = AppConfig::load_default()
            .unwrap()
            .with_overrides(|key| (key == BACKEND_URL_ENV).then(|| "http://10.1.1.5:5000".to_string()));
        assert_eq!(config.backend.base_url, "http://10.1.1.5:5000");

        let untouched = AppConfig::load_default().unwrap().with_overrides(|_| None);
        assert_eq!(untouched.backend.base_url, "http://localhost:5000");
    }
}
