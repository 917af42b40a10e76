use std::collections::HashMap;

use anyhow::{anyhow, Context};
use uuid::Uuid;

use crate::domain::order::{Actor, Role};

// ============================================================================
// Configuration - Environment-based settings
// ============================================================================
//
// Everything is read from the environment at startup:
//
//   GAZMAN_HTTP_ADDR     bind address            (default 0.0.0.0)
//   GAZMAN_HTTP_PORT     bind port               (default 8080)
//   DATABASE_URL         Postgres connection URL
//   GAZMAN_API_TOKENS    static bearer tokens, "token=role:uuid" pairs
//                        separated by commas
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: String,
    pub http_port: u16,
    pub database_url: String,
    pub api_tokens: HashMap<String, Actor>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let http_addr =
            std::env::var("GAZMAN_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = std::env::var("GAZMAN_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("GAZMAN_HTTP_PORT must be a valid port number")?;
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let api_tokens = parse_api_tokens(
            &std::env::var("GAZMAN_API_TOKENS").unwrap_or_default(),
        )?;

        Ok(Self {
            http_addr,
            http_port,
            database_url,
            api_tokens,
        })
    }
}

/// Parse `"token=role:uuid,token2=role:uuid"` into a token lookup table.
/// An empty string yields an empty table (every request will get 401).
pub fn parse_api_tokens(raw: &str) -> anyhow::Result<HashMap<String, Actor>> {
    let mut tokens = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (token, actor_part) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Token entry '{}' is missing '='", entry))?;
        let (role, id) = actor_part
            .split_once(':')
            .ok_or_else(|| anyhow!("Token entry '{}' is missing 'role:uuid'", entry))?;

        let role = match role {
            "client" => Role::Client,
            "admin" => Role::Admin,
            "driver" => Role::Driver,
            other => return Err(anyhow!("Unknown role '{}' in token entry", other)),
        };
        let id = Uuid::parse_str(id)
            .with_context(|| format!("Invalid actor id in token entry '{}'", entry))?;

        tokens.insert(token.to_string(), Actor::new(id, role));
    }

    Ok(tokens)
}
