use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Client configuration, stored as JSON under the platform config
/// directory. Environment variables override the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub directions_url: String,
    pub directions_token: String,
    pub directions_profile: String,
    /// Delay before the delivery screen's order-status check, in
    /// seconds.
    pub status_check_delay_secs: u64,
    /// Refresh period of the unassigned-order feed, in seconds.
    pub feed_refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
            directions_url: "https://api.mapbox.com".to_string(),
            directions_token: String::new(),
            directions_profile: "driving".to_string(),
            status_check_delay_secs: 20,
            feed_refresh_secs: 50,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = Self::from_disk().unwrap_or_default();
        if let Ok(url) = std::env::var("COURIER_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Ok(token) = std::env::var("COURIER_DIRECTIONS_TOKEN") {
            config.directions_token = token;
        }
        config
    }

    fn from_disk() -> Option<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("courier").join("config.json"))
    }

    /// Where the persisted client state lives.
    pub fn state_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("courier").join("state.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_intervals() {
        let config = Config::default();
        assert_eq!(config.status_check_delay_secs, 20);
        assert_eq!(config.feed_refresh_secs, 50);
        assert_eq!(config.directions_profile, "driving");
    }

    #[test]
    fn partial_file_fills_missing_fields_from_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"backend_url": "http://staging:4000"}"#).unwrap();
        assert_eq!(config.backend_url, "http://staging:4000");
        assert_eq!(config.feed_refresh_secs, 50);
    }
}
