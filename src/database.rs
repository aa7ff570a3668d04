use crate::errors::ApiError;
use crate::models::ApiKey;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const API_KEY_COLUMNS: &str = "id, name, value, usage, created_at";

/// SQLite-backed key store. The store owns `id` and `created_at`.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, ApiError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ApiError> {
        conn.execute_batch(include_str!("../db/schema.sql"))?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.conn.lock().map_err(|_| ApiError::LockPoisoned)
    }

    /// All keys, newest first. Keys created within the same millisecond keep
    /// insertion order reversed.
    pub fn list_api_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {API_KEY_COLUMNS} FROM api_key ORDER BY created_at DESC, rowid DESC"
        ))?;

        let keys = stmt
            .query_map([], row_to_api_key)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(keys)
    }

    pub fn insert_api_key(&self, name: &str, value: &str, usage: i64) -> Result<ApiKey, ApiError> {
        let conn = self.lock()?;
        let api_key = conn.query_row(
            &format!("INSERT INTO api_key (name, value, usage) VALUES (?1, ?2, ?3) RETURNING {API_KEY_COLUMNS}"),
            params![name, value, usage],
            row_to_api_key,
        )?;

        Ok(api_key)
    }

    /// Fails with `QueryReturnedNoRows` when `id` matches nothing.
    pub fn update_api_key_name(&self, id: &str, name: &str) -> Result<ApiKey, ApiError> {
        let conn = self.lock()?;
        let api_key = conn.query_row(
            &format!("UPDATE api_key SET name = ?1 WHERE id = ?2 RETURNING {API_KEY_COLUMNS}"),
            params![name, id],
            row_to_api_key,
        )?;

        Ok(api_key)
    }

    /// Returns the number of rows removed; zero is not an error.
    pub fn delete_api_key(&self, id: &str) -> Result<usize, ApiError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM api_key WHERE id = ?1", params![id])?;
        Ok(removed)
    }
}

fn row_to_api_key(row: &Row<'_>) -> rusqlite::Result<ApiKey> {
    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(ApiKey {
        id: row.get(0)?,
        name: row.get(1)?,
        value: row.get(2)?,
        usage: row.get(3)?,
        created_at,
    })
}
