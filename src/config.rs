//! We can have a little hard-coded config, [as a
//! snack](https://knowyourmeme.com/memes/cats-can-have-a-little-salami).
//! Everything that varies per deployment comes from the environment (or a
//! `.env` file, loaded in `main`).

use anyhow::Result;
use std::{env, net::SocketAddr};

/// Storage key holding the JSON array of raw notes.
pub const NOTES_KEY: &str = "NOTES";

/// Storage key holding the JSON array of tags.
pub const TAGS_KEY: &str = "tags";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// The store sees one writer at a time, so a handful of connections is
/// plenty.
pub const PG_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// `None` when no durable store is configured; the app then keeps
    /// everything in memory.
    pub postgres_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()?;

        Ok(Config {
            listen_addr,
            postgres_url: postgres_url(
                env::var("POSTGRES_USER").ok(),
                env::var("POSTGRES_PASSWORD").ok(),
                env::var("POSTGRES_DB").ok(),
                env::var("POSTGRES_HOST").ok(),
            ),
        })
    }
}

fn postgres_url(
    user: Option<String>,
    password: Option<String>,
    db: Option<String>,
    host: Option<String>,
) -> Option<String> {
    let host = host.unwrap_or_else(|| "localhost".to_string());
    match (user, password, db) {
        (Some(user), Some(password), Some(db)) => {
            Some(format!("postgres://{user}:{password}@{host}:5432/{db}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_url_needs_all_credentials() {
        assert_eq!(
            postgres_url(Some("jack".into()), None, Some("notes".into()), None),
            None
        );
    }

    #[test]
    fn test_postgres_url_defaults_host() {
        assert_eq!(
            postgres_url(
                Some("jack".into()),
                Some("pw".into()),
                Some("notes".into()),
                None
            )
            .as_deref(),
            Some("postgres://jack:pw@localhost:5432/notes")
        );
    }
}
