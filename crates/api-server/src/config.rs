//! Server configuration read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "tasks.db";
const DEFAULT_API_KEY: &str = "12345";

/// Which repository backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub store: StoreKind,
    pub api_key: String,
    pub seed: bool,
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

impl ServerConfig {
    /// Read `TASKS_*` variables, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("TASKS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("invalid TASKS_BIND_ADDR '{}'", raw_addr))?;

        let store = match lookup("TASKS_STORE")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("sqlite") => StoreKind::Sqlite,
            Some("memory") => StoreKind::Memory,
            Some(other) => bail!("unsupported TASKS_STORE '{}'", other),
        };

        Ok(Self {
            bind_addr,
            db_path: lookup("TASKS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            store,
            api_key: lookup("TASKS_API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            seed: parse_flag(lookup("TASKS_SEED"), true),
        })
    }
}
