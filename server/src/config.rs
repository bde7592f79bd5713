use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::ServerError;

/// Path of a JSON config file overriding the defaults.
pub const CONFIG_ENV: &str = "PONG_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP/WebSocket listener binds to.
    pub listen: String,
    /// Simulation RNG seed. Random per process when absent.
    pub seed: Option<u64>,
    pub game: game_core::Config,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            seed: None,
            game: game_core::Config::new(),
        }
    }
}

impl ServerConfig {
    /// Load from the file named by `PONG_CONFIG`, or fall back to defaults
    /// when the variable is unset.
    pub fn load() -> Result<Self, ServerError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ServerError::ConfigParse {
            path: path.to_string(),
            source,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listen.parse().map_err(|source| ServerError::ListenAddr {
            addr: self.listen.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen, "0.0.0.0:3000");
        assert!(config.seed.is_none());
        assert_eq!(config.game.winning_score, 11);
        assert!(config.listen_addr().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config: ServerConfig = serde_json::from_str(
            r#"{"listen":"127.0.0.1:8080","game":{"winning_score":5}}"#,
        )
        .unwrap();
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.game.winning_score, 5);
        assert_eq!(config.game.court_width, 800.0, "untouched fields keep defaults");
    }

    #[test]
    fn test_bad_listen_address() {
        let config = ServerConfig {
            listen: "not an address".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.listen_addr().is_err());
    }
}
