//! Application configuration loaded from environment variables.

use crate::context::Language;
use crate::services::projection::Canvas;
use std::env;
use std::path::PathBuf;

/// Public Natural Earth mirror of the world country boundaries.
pub const DEFAULT_GEOJSON_MIRROR: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_admin_0_countries.geojson";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the travel backend, e.g. `http://localhost:3000`
    pub backend_url: String,
    /// Local world boundaries file
    pub geojson_path: PathBuf,
    /// Remote mirror tried when the local file cannot be read; empty
    /// disables the remote attempt
    pub geojson_fallback_url: String,
    /// Map drawing surface
    pub canvas: Canvas,
    /// Name of the backend's session cookie
    pub session_cookie: String,
    /// Language used when the viewer has no `lang` cookie
    pub default_language: Language,
    /// Serve from the in-memory demo backend instead of `backend_url`
    pub offline_demo: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            backend_url: "http://localhost:3000".to_string(),
            geojson_path: PathBuf::from("data/countries.geojson"),
            geojson_fallback_url: DEFAULT_GEOJSON_MIRROR.to_string(),
            canvas: Canvas::default(),
            session_cookie: "session".to_string(),
            default_language: Language::English,
            offline_demo: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let canvas = Canvas {
            width: parse_var("MAP_WIDTH", defaults.canvas.width)?,
            height: parse_var("MAP_HEIGHT", defaults.canvas.height)?,
        };
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ConfigError::Invalid {
                name: "MAP_WIDTH/MAP_HEIGHT",
                value: format!("{}x{}", canvas.width, canvas.height),
            });
        }

        let default_language = match env::var("DEFAULT_LANGUAGE") {
            Ok(tag) => Language::from_tag(&tag).ok_or(ConfigError::Invalid {
                name: "DEFAULT_LANGUAGE",
                value: tag,
            })?,
            Err(_) => defaults.default_language,
        };

        let offline_demo = env::var("OFFLINE_DEMO")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let backend_url = match env::var("BACKEND_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) if offline_demo => defaults.backend_url,
            Err(_) => return Err(ConfigError::Missing("BACKEND_URL")),
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            backend_url,
            geojson_path: env::var("GEOJSON_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.geojson_path),
            geojson_fallback_url: env::var("GEOJSON_FALLBACK_URL")
                .map(|url| url.trim().to_string())
                .unwrap_or(defaults.geojson_fallback_url),
            canvas,
            session_cookie: env::var("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            default_language,
            offline_demo,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
