use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sampler: SamplerConfig,
    pub db: DbConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    pub interval_seconds: u64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg: Config = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("MONITOR__").split("__"))
            .extract()?;

        // DATABASE_URL wins over the file and MONITOR__DB__URL, matching the
        // conventional container deployment where only that variable is set.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.db.url = url;
        }

        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                enable_cors: false,
                request_timeout_secs: 30,
            },
            sampler: SamplerConfig {
                interval_seconds: 180,
                enabled: true,
            },
            db: DbConfig {
                url: "sqlite://monitor.db".to_string(),
                max_connections: 5,
                acquire_timeout_secs: 30,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_parses() {
        let cfg = Config::default();
        let addr = cfg.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn default_sampler_interval() {
        let cfg = Config::default();
        assert_eq!(cfg.sampler.interval_seconds, 180);
        assert!(cfg.sampler.enabled);
    }
}
