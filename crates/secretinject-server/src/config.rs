//! Server configuration.

use clap::Parser;
use std::net::SocketAddr;

/// Server configuration, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "secretinject-server")]
#[command(about = "Converter extension injecting secret resources", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "DRONE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Shared secret used to verify request signatures
    #[arg(long, env = "DRONE_SECRET", hide_env_values = true, default_value = "")]
    pub secret: String,

    /// Enable debug logging
    #[arg(long, env = "DRONE_DEBUG")]
    pub debug: bool,
}

impl ServerConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "secretinject-server",
            "--bind",
            "127.0.0.1:8080",
            "--secret",
            "correct-horse",
            "--debug",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.secret, "correct-horse");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_invalid_bind_address() {
        let result =
            ServerConfig::try_parse_from(["secretinject-server", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }
}
