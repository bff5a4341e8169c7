//! Server settings read from the environment.

use std::net::SocketAddr;

const ADDR_VAR: &str = "PHOTOLINE_ADDR";
const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Malformed values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ADDR_VAR) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.addr = addr,
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "Invalid {ADDR_VAR}, using {}", config.addr);
                }
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_addr_override() {
        let config = ServerConfig::from_lookup(|key| {
            (key == ADDR_VAR).then(|| "127.0.0.1:8080".to_string())
        });
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn test_malformed_addr_falls_back() {
        let config = ServerConfig::from_lookup(|_| Some("localhost".to_string()));
        assert_eq!(config, ServerConfig::default());
    }
}
