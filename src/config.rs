use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::http::parser::Limits;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Names the YAML file to load settings from.
pub const CONFIG_ENV: &str = "HELLOHTTP_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Upper bound on live connection workers; unbounded when absent
    pub max_connections: Option<usize>,
    /// How long shutdown waits for open connections before aborting them
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_connections: None,
            shutdown_grace_ms: 5_000,
        }
    }
}

impl Config {
    /// Loads the process configuration.
    ///
    /// Defaults, then the YAML file named by `HELLOHTTP_CONFIG` if set, then
    /// the `LISTEN` and `MAX_CONNECTIONS` variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading variables through `var`.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match var(CONFIG_ENV) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(listen_addr) = var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }
        if let Some(max) = var("MAX_CONNECTIONS") {
            let max = max
                .parse::<usize>()
                .with_context(|| format!("invalid MAX_CONNECTIONS {max:?}"))?;
            cfg.server.max_connections = Some(max);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
