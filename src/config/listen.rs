//! Network listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "127.0.0.1:8888").
    pub address: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_config_deserialize() {
        let toml_str = r#"
            address = "0.0.0.0:8888"
        "#;
        let cfg: ListenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.address.port(), 8888);
        assert!(cfg.address.ip().is_unspecified());
    }

    #[test]
    fn listen_config_ipv6() {
        let toml_str = r#"
            address = "[::1]:9000"
        "#;
        let cfg: ListenConfig = toml::from_str(toml_str).unwrap();
        assert!(cfg.address.is_ipv6());
        assert_eq!(cfg.address.port(), 9000);
    }

    #[test]
    fn listen_config_rejects_missing_port() {
        let toml_str = r#"
            address = "127.0.0.1"
        "#;
        assert!(toml::from_str::<ListenConfig>(toml_str).is_err());
    }
}
