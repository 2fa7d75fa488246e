//! SQLite-backed storage via libsql. Implements the user and app outbound ports.
//!
//! One database file holds two tables: `users` (email unique) and `apps`.
//! Each call opens its own connection from the shared `Database`.

use crate::domain::{App, StorageError, User};
use crate::ports::{AppProvider, UserProvider, UserSaver};
use libsql::{params, Connection, Database};
use std::path::Path;
use tracing::info;

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    pass_hash TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0
)"#;
const USERS_EMAIL_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)";

const APPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS apps (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    secret TEXT NOT NULL
)"#;

const SQLITE_CONSTRAINT: i32 = 19;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

fn backend(e: libsql::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

/// Only UNIQUE violations count; NOT NULL, CHECK and other constraint failures stay backend errors.
/// Without extended result codes SQLite reports the bare primary code, so the message decides.
fn is_unique_violation(e: &libsql::Error) -> bool {
    match e {
        libsql::Error::SqliteFailure(SQLITE_CONSTRAINT_UNIQUE, _) => true,
        libsql::Error::SqliteFailure(SQLITE_CONSTRAINT, msg) => {
            msg.contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}

/// SQLite storage. Safe to share via Arc.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Open (or create) the database at `path` and ensure the schema exists.
    /// Call once at startup.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(backend)?;
        let conn = db.connect().map_err(backend)?;

        // PRAGMA returns a row; drain it instead of `execute`.
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| StorageError::Backend(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(backend)?.is_some() {}

        conn.execute(USERS_TABLE, ()).await.map_err(backend)?;
        conn.execute(USERS_EMAIL_INDEX, ()).await.map_err(backend)?;
        conn.execute(APPS_TABLE, ()).await.map_err(backend)?;

        info!(path = %db_path.display(), "SQLite storage ready");

        Ok(Self { db })
    }

    /// Insert or update a client application. Used to seed the configured default app.
    pub async fn upsert_app(&self, app: &App) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO apps (id, name, secret) VALUES (?1, ?2, ?3)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name, secret = excluded.secret
            "#,
            params![app.id, app.name.as_str(), app.secret.as_str()],
        )
        .await
        .map_err(backend)?;
        Ok(())
    }

    fn conn(&self) -> Result<Connection, StorageError> {
        self.db.connect().map_err(backend)
    }
}

#[async_trait::async_trait]
impl UserSaver for SqliteStorage {
    async fn save_user(&self, email: &str, pass_hash: &str) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        match conn
            .execute(
                "INSERT INTO users (email, pass_hash) VALUES (?1, ?2)",
                params![email, pass_hash],
            )
            .await
        {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::UserExists),
            Err(e) => Err(backend(e)),
        }
    }
}

#[async_trait::async_trait]
impl UserProvider for SqliteStorage {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, email, pass_hash, is_admin FROM users WHERE email = ?1",
                params![email],
            )
            .await
            .map_err(backend)?;
        let row = rows
            .next()
            .await
            .map_err(backend)?
            .ok_or(StorageError::UserNotFound)?;
        Ok(User {
            id: row.get(0).map_err(backend)?,
            email: row.get(1).map_err(backend)?,
            pass_hash: row.get(2).map_err(backend)?,
            is_admin: row.get::<i64>(3).map_err(backend)? != 0,
        })
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query("SELECT is_admin FROM users WHERE id = ?1", params![user_id])
            .await
            .map_err(backend)?;
        let row = rows
            .next()
            .await
            .map_err(backend)?
            .ok_or(StorageError::UserNotFound)?;
        Ok(row.get::<i64>(0).map_err(backend)? != 0)
    }
}

#[async_trait::async_trait]
impl AppProvider for SqliteStorage {
    async fn app(&self, app_id: i32) -> Result<App, StorageError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, name, secret FROM apps WHERE id = ?1",
                params![app_id],
            )
            .await
            .map_err(backend)?;
        let row = rows
            .next()
            .await
            .map_err(backend)?
            .ok_or(StorageError::AppNotFound)?;
        Ok(App {
            id: row.get(0).map_err(backend)?,
            name: row.get(1).map_err(backend)?,
            secret: row.get(2).map_err(backend)?,
        })
    }
}
