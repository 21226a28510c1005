/// Configuration for the tutorbase server
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address to bind the HTTP server to
    #[serde(default = "default_address")]
    pub address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_db_path() -> String {
    "tutorbase.db".to_string()
}

impl AppConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// Fields absent from the file keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            db_path: default_db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, "tutorbase.db");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "port": 8080 }"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "127.0.0.1");
    }
}
