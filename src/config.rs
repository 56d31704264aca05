use std::{error::Error, str::FromStr};

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_IDENTITY_HEADER: &str = "x-authenticated-email";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub search_page_size: u32,
    /// Header the fronting auth layer puts the signed-in email in.
    pub identity_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_owned(),
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            db_max_connections: 16,
            search_page_size: DEFAULT_PAGE_SIZE,
            identity_header: DEFAULT_IDENTITY_HEADER.to_owned(),
        }
    }
}

impl Config {
    /// Reads settings from the process environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Config> {
        let defaults = Config::default();

        let config = Config {
            database_url: dotenv::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            bind_addr: dotenv::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            search_page_size: parsed_var("SEARCH_PAGE_SIZE", defaults.search_page_size)?,
            identity_header: dotenv::var("IDENTITY_HEADER")
                .map(|header| header.to_ascii_lowercase())
                .unwrap_or(defaults.identity_header),
        };

        if config.search_page_size == 0 {
            anyhow::bail!("SEARCH_PAGE_SIZE must be at least 1");
        }

        Ok(config)
    }
}

fn parsed_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    match dotenv::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
