// Server Configuration
//
// Resolution order: defaults, then environment variables, then CLI flags.
//
//   --host HOST        (env: CAT_CATALOG_HOST, default 0.0.0.0)
//   --port N           (env: CAT_CATALOG_PORT, default 3000)
//   --data-file PATH   (env: CAT_CATALOG_DATA_FILE, default: built-in cats)

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_HOST: &str = "CAT_CATALOG_HOST";
pub const ENV_PORT: &str = "CAT_CATALOG_PORT";
pub const ENV_DATA_FILE: &str = "CAT_CATALOG_DATA_FILE";

pub const USAGE: &str = "cat-server\n\nUSAGE:\n  cat-server [--host HOST] [--port N] [--data-file PATH]\n\nOPTIONS:\n  --host HOST        Bind address (env: CAT_CATALOG_HOST, default 0.0.0.0)\n  --port N           HTTP port (env: CAT_CATALOG_PORT, default 3000)\n  --data-file PATH   JSON dataset to serve (env: CAT_CATALOG_DATA_FILE, default: built-in cats)\n  -h, --help         Print this help\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: None,
        }
    }
}

impl ServerConfig {
    /// Resolve from the process environment and the given arguments
    pub fn from_env(args: &[String]) -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), args)
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve<F>(env: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        // Environment
        if let Some(host) = env(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = env(ENV_PORT) {
            config.port = parse_port(&port).with_context(|| format!("invalid {}", ENV_PORT))?;
        }
        if let Some(path) = env(ENV_DATA_FILE) {
            config.data_file = Some(PathBuf::from(path));
        }

        // CLI arguments override environment
        if let Some(host) = flag_value(args, "--host")? {
            config.host = host;
        }
        if let Some(port) = flag_value(args, "--port")? {
            config.port = parse_port(&port).context("invalid --port")?;
        }
        if let Some(path) = flag_value(args, "--data-file")? {
            config.data_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`, if the flag is present
pub fn flag_value(args: &[String], flag: &str) -> Result<Option<String>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .filter(|value| !value.starts_with("--"))
            .cloned()
            .map(Some)
            .ok_or_else(|| anyhow!("{} requires a value", flag)),
        None => Ok(None),
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .with_context(|| format!("'{}' is not a valid port", value))
}

// ============================================================================
// TESTS
// ============================================================================
