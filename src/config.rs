//! Locator configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::Coordinate;

/// Environment variable consulted for the Maps API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub maps: MapsConfig,
    pub search: SearchConfig,
    pub region: RegionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    /// Base URL of the web services, ending in a slash
    pub base_url: String,
    /// ISO 3166-1 country the geocoder is restricted to
    pub country: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://maps.googleapis.com/maps/api/".to_string(),
            country: "SG".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub radius_m: u32,
    pub place_type: String,
    /// Keyword restricting results to the library network
    pub keyword: String,
    /// Viewport span after a postal code is resolved
    pub search_delta: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: 7000,
            place_type: "library".to_string(),
            keyword: "NLB".to_string(),
            search_delta: 0.08,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegionConfig {
    /// Home region shown when the device location is unknown
    pub default_center: Coordinate,
    pub wide_delta: f64,
    pub narrow_delta: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(1.3521, 103.8198),
            wide_delta: 0.1,
            narrow_delta: 0.02,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the API key: explicit override, then environment, then file
    pub fn resolve_api_key(&mut self, cli_key: Option<String>) -> Result<&str> {
        if let Some(key) = cli_key.or_else(|| std::env::var(API_KEY_ENV).ok()) {
            self.maps.api_key = Some(key);
        }

        match self.maps.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!(
                "No Maps API key configured (use --api-key, {} or [maps].api_key)",
                API_KEY_ENV
            ),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.region.default_center.is_valid() {
            anyhow::bail!(
                "region.default_center {} is outside valid latitude/longitude range",
                self.region.default_center
            );
        }
        for (name, delta) in [
            ("region.wide_delta", self.region.wide_delta),
            ("region.narrow_delta", self.region.narrow_delta),
            ("search.search_delta", self.search.search_delta),
        ] {
            if delta.is_nan() || delta <= 0.0 {
                anyhow::bail!("{} must be positive, got {}", name, delta);
            }
        }
        if self.search.radius_m == 0 {
            anyhow::bail!("search.radius_m must be positive");
        }
        url::Url::parse(&self.maps.base_url).context("maps.base_url is not a valid URL")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.radius_m, 7000);
        assert_eq!(config.search.place_type, "library");
        assert_eq!(config.search.keyword, "NLB");
        assert_eq!(config.maps.country, "SG");
        assert_eq!(config.region.default_center, Coordinate::new(1.3521, 103.8198));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[maps]
api_key = "from-file"

[search]
radius_m = 3000

[region]
default_center = {{ latitude = 51.5, longitude = -0.12 }}
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.maps.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.search.radius_m, 3000);
        assert_eq!(config.search.keyword, "NLB");
        assert_eq!(config.region.default_center, Coordinate::new(51.5, -0.12));
        assert_eq!(config.region.wide_delta, 0.1);
    }

    #[test]
    fn test_load_rejects_bad_delta() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[region]\nwide_delta = 0.0").unwrap();

        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_cli_key_overrides_file() {
        let mut config = Config::default();
        config.maps.api_key = Some("from-file".to_string());

        let key = config.resolve_api_key(Some("from-cli".to_string())).unwrap();
        assert_eq!(key, "from-cli");
    }
}
