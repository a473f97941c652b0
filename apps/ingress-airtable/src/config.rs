use std::net::SocketAddr;

use anyhow::{Context, Result};
use qn_core::DEFAULT_API_BASE;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Startup settings. WhatsApp secrets are not part of this; they are read
/// per request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = bind_raw
            .parse()
            .with_context(|| format!("invalid BIND address {bind_raw:?}"))?;
        let api_base = lookup("WA_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());
        Ok(Self { bind, api_base })
    }
}
