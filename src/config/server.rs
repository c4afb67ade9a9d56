//! Server configuration, read from the environment with sensible defaults.

use std::env;
use std::path::PathBuf;

use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LEADERBOARD_FILE: &str = "leaderboard.jsonl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON-lines file backing the leaderboard.
    pub leaderboard_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            leaderboard_file: PathBuf::from(DEFAULT_LEADERBOARD_FILE),
        }
    }
}

impl ServerConfig {
    /// Build the config from `FORAGING_HOST`, `FORAGING_PORT` and `FORAGING_LEADERBOARD_FILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = match lookup("FORAGING_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("[Config] Invalid FORAGING_PORT '{}', using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };
        Self {
            host: lookup("FORAGING_HOST").unwrap_or(defaults.host),
            port,
            leaderboard_file: lookup("FORAGING_LEADERBOARD_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.leaderboard_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("FORAGING_HOST", "0.0.0.0"),
            ("FORAGING_PORT", "9000"),
            ("FORAGING_LEADERBOARD_FILE", "/tmp/scores.jsonl"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.leaderboard_file, PathBuf::from("/tmp/scores.jsonl"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[("FORAGING_PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
