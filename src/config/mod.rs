use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub map: MapViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Initial viewport of the rendered map. Marker radii, explorer default
/// colors and the voyage table itself are fixed domain constants owned by
/// the itinerary builder, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapViewConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom_start: u8,
    pub min_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            map: MapViewConfig {
                // opening view over Paris
                center_lat: 48.8566,
                center_lon: 2.3522,
                zoom_start: 12,
                min_zoom: 3,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_file, contents)?;
            Ok(default_config)
        }
    }
}
