use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;

pub const DEFAULT_COVER_API_URL: &str = "https://covers.openlibrary.org";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_user: String,
    pub db_host: String,
    pub db_name: String,
    pub db_password: String,
    pub db_port: u16,
    pub port: u16,
    pub cover_api_url: String,
    pub public_dir: PathBuf,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let port = |key: &str, default: &str| -> Result<u16> {
            let raw = var(key, default);
            raw.parse()
                .with_context(|| format!("{} must be a port number, got {:?}", key, raw))
        };

        Ok(AppConfig {
            db_user: var("DB_USER", "postgres"),
            db_host: var("DB_HOST", "localhost"),
            db_name: var("DB_NAME", "book_tracker"),
            db_password: var("DB_PASSWORD", ""),
            db_port: port("DB_PORT", "5432")?,
            port: port("PORT", "3000")?,
            cover_api_url: var("COVER_API_URL", DEFAULT_COVER_API_URL),
            public_dir: PathBuf::from(var("PUBLIC_DIR", "public")),
        })
    }

    /// `PgConnectOptions::new()` seeds itself from `PG*` variables and
    /// `~/.pgpass`; every field configured here overrides those, an empty
    /// password included.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
