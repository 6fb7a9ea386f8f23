//! A string-keyed durable store, and a typed value mirrored into it.
//!
//! `PersistentValue<T>` is the building block for all app state: it loads
//! its value from the store once, and writes the whole value back on every
//! change. Reads never fail; a missing or unparseable slot just yields the
//! caller's default.

use super::config;
use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
#[cfg(test)]
use std::{collections::HashMap, sync::Mutex};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites whatever was previously stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
#[derive(Default, Debug)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One row per key in `local_storage`.
#[derive(Clone, Debug)]
pub struct PgStorage {
    db: PgPool,
}

impl PgStorage {
    pub async fn connect(url: &str) -> Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config::PG_MAX_CONNECTIONS)
            .connect(url)
            .await?;
        sqlx::query(
            "create table if not exists local_storage (
                key text primary key,
                value text not null
            )",
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "select value from local_storage where key = $1",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;

        Ok(value)
    }
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "insert into local_storage (key, value) values ($1, $2)
            on conflict (key)
            do update set value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

/// A value of `T` kept in memory and mirrored, as JSON, to a storage slot.
///
/// When `storage` is `None` there is no durable store in this context; the
/// value then lives in memory only and reads/writes to the store are
/// skipped.
pub struct PersistentValue<T> {
    key: String,
    value: T,
    storage: Option<Arc<dyn Storage>>,
}

impl<T> PersistentValue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub async fn load(
        storage: Option<Arc<dyn Storage>>,
        key: &str,
        initial: T,
    ) -> Self {
        Self::load_with(storage, key, || initial).await
    }

    /// `init` is only called when the stored value can't be used.
    pub async fn load_with<F>(
        storage: Option<Arc<dyn Storage>>,
        key: &str,
        init: F,
    ) -> Self
    where
        F: FnOnce() -> T,
    {
        let stored = match &storage {
            Some(s) => read_slot(s.as_ref(), key).await,
            None => None,
        };
        let value = stored.unwrap_or_else(init);
        let slot = Self {
            key: key.to_string(),
            value,
            storage,
        };
        // Mirror the resolved value back, so a missing or corrupt slot is
        // replaced with the default right away.
        if let Err(e) = slot.persist(&slot.value).await {
            tracing::warn!(key, error = %e, "could not write initial value");
        }

        slot
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Persist `value`, then make it current. If the write fails, the
    /// current value is left alone and the error is returned.
    pub async fn set(&mut self, value: T) -> Result<()> {
        self.persist(&value).await?;
        self.value = value;
        Ok(())
    }

    pub async fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next).await
    }

    async fn persist(&self, value: &T) -> Result<()> {
        if let Some(storage) = &self.storage {
            let json = serde_json::to_string(value)?;
            storage.set_item(&self.key, &json).await?;
        }
        Ok(())
    }
}

async fn read_slot<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Option<T> {
    let raw = match storage.get_item(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "nothing stored yet");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read storage");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(
                key,
                error = %e,
                "discarding malformed stored value"
            );
            None
        }
    }
}
