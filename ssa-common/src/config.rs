//! Configuration loading
//!
//! All settings are resolved once at startup and never mutated afterwards.
//! Priority order: command-line argument (applied by the binary), environment
//! variable, compiled default.

use serde::Serialize;

/// Default scoring-service base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default map center (longitude, latitude) — center of India
pub const DEFAULT_MAP_CENTER: [f64; 2] = [78.9629, 20.5937];

/// Default map zoom level
pub const DEFAULT_MAP_ZOOM: f64 = 5.0;

/// Default listen port for the UI module
pub const DEFAULT_UI_PORT: u16 = 5173;

/// Process-wide UI module configuration
#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    /// Base URL of the remote scoring service
    pub api_base_url: String,
    /// Map provider access token (empty disables the base map)
    pub map_token: String,
    /// Initial map center (longitude, latitude)
    pub map_center: [f64; 2],
    /// Initial map zoom level
    pub map_zoom: f64,
    /// Listen port for the UI module's HTTP surface
    pub listen_port: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            map_token: String::new(),
            map_center: DEFAULT_MAP_CENTER,
            map_zoom: DEFAULT_MAP_ZOOM,
            listen_port: DEFAULT_UI_PORT,
        }
    }
}

impl UiConfig {
    /// Resolve configuration from environment variables, falling back to
    /// compiled defaults for anything absent or unparseable
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SSA_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(token) = std::env::var("SSA_MAP_TOKEN") {
            config.map_token = token;
        }
        if let Ok(center) = std::env::var("SSA_MAP_CENTER") {
            match parse_center(&center) {
                Some(pair) => config.map_center = pair,
                None => {
                    tracing::warn!(value = %center, "Ignoring malformed SSA_MAP_CENTER (expected \"lon,lat\")")
                }
            }
        }
        if let Ok(zoom) = std::env::var("SSA_MAP_ZOOM") {
            match zoom.parse() {
                Ok(z) => config.map_zoom = z,
                Err(_) => tracing::warn!(value = %zoom, "Ignoring malformed SSA_MAP_ZOOM"),
            }
        }
        if let Ok(port) = std::env::var("SSA_UI_PORT") {
            match port.parse() {
                Ok(p) => config.listen_port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring malformed SSA_UI_PORT"),
            }
        }

        config
    }
}

/// Parse a "lon,lat" pair
fn parse_center(value: &str) -> Option<[f64; 2]> {
    let (lon, lat) = value.split_once(',')?;
    Some([lon.trim().parse().ok()?, lat.trim().parse().ok()?])
}
